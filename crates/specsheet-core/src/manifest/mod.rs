pub mod builtin;
pub mod schema;

use crate::error::SpecSheetError;
use crate::registry;
use schema::RunManifest;
use std::path::Path;

/// Load a run manifest from a JSON file.
pub fn load_manifest(path: &Path) -> Result<RunManifest, SpecSheetError> {
    let content = std::fs::read_to_string(path).map_err(|e| SpecSheetError::ManifestLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_manifest(&content, path)
}

/// Parse a manifest from a JSON string.
pub fn parse_manifest(json: &str, source: &Path) -> Result<RunManifest, SpecSheetError> {
    let manifest: RunManifest =
        serde_json::from_str(json).map_err(|e| SpecSheetError::ManifestLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Parse a manifest from a JSON string (no file path context).
pub fn parse_manifest_str(json: &str) -> Result<RunManifest, SpecSheetError> {
    let manifest: RunManifest = serde_json::from_str(json)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validate that a manifest is well-formed.
///
/// Documents whose file name matches no variant are allowed (they are
/// skipped at run time), but an explicit `variant` key must exist.
pub fn validate_manifest(manifest: &RunManifest) -> Result<(), SpecSheetError> {
    if manifest.documents.is_empty() {
        return Err(SpecSheetError::ManifestInvalid(
            "documents must not be empty".into(),
        ));
    }

    if manifest.master_sheet.trim().is_empty() {
        return Err(SpecSheetError::ManifestInvalid(
            "master_sheet must not be empty".into(),
        ));
    }

    if manifest.master_output.trim().is_empty() {
        return Err(SpecSheetError::ManifestInvalid(
            "master_output must not be empty".into(),
        ));
    }

    for doc in &manifest.documents {
        if doc.file.trim().is_empty() {
            return Err(SpecSheetError::ManifestInvalid(
                "document file must not be empty".into(),
            ));
        }

        if let Some(ref key) = doc.variant {
            if registry::by_key(key).is_none() {
                return Err(SpecSheetError::ManifestInvalid(format!(
                    "document '{}' names unknown variant '{}' (known: {})",
                    doc.file,
                    key,
                    registry::keys().join(", ")
                )));
            }
        }
    }

    Ok(())
}
