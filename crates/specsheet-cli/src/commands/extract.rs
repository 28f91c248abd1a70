use specsheet_core::error::SpecSheetError;
use specsheet_core::extraction::pdftotext::PdftotextLoader;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    variant: Option<String>,
    output_format: &str,
) -> Result<(), SpecSheetError> {
    let loader = PdftotextLoader::new();
    let records = specsheet_core::extract_document(&input_file, variant.as_deref(), &loader)?;

    match output_format {
        "json" => output::json::print(&records)?,
        _ => output::table::print_records(&records),
    }

    Ok(())
}
