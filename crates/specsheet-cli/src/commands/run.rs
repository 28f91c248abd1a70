use specsheet_core::error::SpecSheetError;
use specsheet_core::extraction::pdftotext::PdftotextLoader;
use specsheet_core::manifest::{self, builtin};
use specsheet_core::sink::FileSink;
use specsheet_core::BatchOptions;
use std::path::PathBuf;

use crate::output;

pub fn run(
    manifest_file: Option<PathBuf>,
    workdir: PathBuf,
    output_dir: Option<PathBuf>,
    output_format: &str,
) -> Result<(), SpecSheetError> {
    let manifest = match manifest_file {
        Some(path) => manifest::load_manifest(&path)?,
        None => builtin::load_default()?,
    };
    if let Some(ref name) = manifest.name {
        tracing::info!(manifest = %name, documents = manifest.documents.len(), "starting run");
    }

    if !PdftotextLoader::is_available() {
        return Err(SpecSheetError::PdftotextNotFound);
    }
    let loader = PdftotextLoader::new();

    let options = BatchOptions {
        workdir,
        output_dir,
    };
    let report = specsheet_core::run_batch(&manifest, &options, &loader, &FileSink)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
