use specsheet_core::error::SpecSheetError;
use specsheet_core::manifest::{self, builtin};
use specsheet_core::registry;
use std::path::Path;

pub fn show() -> Result<(), SpecSheetError> {
    let m = builtin::load_default()?;
    println!("{}", serde_json::to_string_pretty(&m)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), SpecSheetError> {
    let m = manifest::load_manifest(file)?;
    println!(
        "Valid manifest: {} ({} document(s))",
        m.name.as_deref().unwrap_or("unnamed"),
        m.documents.len()
    );

    for doc in &m.documents {
        match registry::resolve(doc.identity()) {
            Some(v) => println!("  {}  -> {}", doc.file, v.key()),
            None => println!("  {}  -> no matching variant, will be skipped", doc.file),
        }
    }
    Ok(())
}
