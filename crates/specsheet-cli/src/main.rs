mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specsheet",
    version,
    about = "Extract catalog records from manufacturer PDF spec sheets"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every document in a manifest and append to the master table
    Run {
        /// Run manifest (default: the builtin manifest)
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Directory that manifest paths are relative to
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,

        /// Write outputs here instead of the manifest's output_dir
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract records from a single spec sheet without writing any table
    Extract {
        /// Path to the PDF
        input_file: PathBuf,

        /// Variant key (default: resolved from the file name)
        #[arg(long, value_name = "KEY")]
        variant: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List supported document variants
    Variants,
    /// Print the canonical record fields and their defaults
    Schema,
    /// Inspect and validate run manifests
    Manifest {
        #[command(subcommand)]
        action: ManifestAction,
    },
}

#[derive(Subcommand)]
enum ManifestAction {
    /// Print the builtin manifest
    Show,
    /// Validate a manifest file
    Validate {
        /// Path to JSON manifest
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            manifest,
            workdir,
            output_dir,
            output,
        } => commands::run::run(manifest, workdir, output_dir, &output),
        Commands::Extract {
            input_file,
            variant,
            output,
        } => commands::extract::run(input_file, variant, &output),
        Commands::Variants => commands::variants::list(),
        Commands::Schema => commands::schema::print(),
        Commands::Manifest { action } => match action {
            ManifestAction::Show => commands::manifest::show(),
            ManifestAction::Validate { file } => commands::manifest::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
