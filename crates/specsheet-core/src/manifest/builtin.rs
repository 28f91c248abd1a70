use crate::error::SpecSheetError;
use crate::manifest::schema::RunManifest;

const DEFAULT_MANIFEST_JSON: &str = include_str!("../../../../manifests/default.json");

/// The manifest used when no `--manifest` is given: the catalog update the
/// tool was first written for.
pub fn load_default() -> Result<RunManifest, SpecSheetError> {
    super::parse_manifest_str(DEFAULT_MANIFEST_JSON)
}
