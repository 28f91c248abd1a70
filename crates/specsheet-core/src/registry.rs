use crate::locate::FieldLocator;
use crate::variants::{ProCuity, SterilGardE3, SterilGardSgx04};

/// Every supported document variant. Closed set: adding a variant means
/// adding it here.
pub static VARIANTS: &[&(dyn FieldLocator + 'static)] =
    &[&ProCuity, &SterilGardSgx04, &SterilGardE3];

/// Registry keys of all supported variants.
pub fn keys() -> Vec<&'static str> {
    VARIANTS.iter().map(|v| v.key()).collect()
}

/// Look up a variant by its registry key.
pub fn by_key(key: &str) -> Option<&'static dyn FieldLocator> {
    VARIANTS.iter().copied().find(|v| v.key() == key)
}

/// Resolve a file identity to its strategy.
///
/// The identity may be a registry key or a filename (a bare name or a path,
/// compared by final component). Unknown identities return `None`.
pub fn resolve(identity: &str) -> Option<&'static dyn FieldLocator> {
    by_key(identity).or_else(|| {
        let filename = std::path::Path::new(identity)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(identity);
        VARIANTS
            .iter()
            .copied()
            .find(|v| v.source_filename() == filename)
    })
}
