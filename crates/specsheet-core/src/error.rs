use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SpecSheetError {
    #[error("cannot open {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("could not locate fields for '{variant}': {reason}")]
    LocateFailed { variant: String, reason: String },

    #[error("malformed value '{token}' for field '{field}': {reason}")]
    Normalization {
        field: String,
        token: String,
        reason: String,
    },

    #[error("unknown document variant '{0}'")]
    UnknownVariant(String),

    #[error("failed to load master table from {path}: {reason}")]
    MasterLoad { path: PathBuf, reason: String },

    #[error("failed to write table to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("failed to load manifest from {path}: {reason}")]
    ManifestLoad { path: PathBuf, reason: String },

    #[error("invalid manifest: {0}")]
    ManifestInvalid(String),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpecSheetError {
    pub(crate) fn locate(variant: &str, reason: impl Into<String>) -> Self {
        SpecSheetError::LocateFailed {
            variant: variant.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures that mean the input file could not be read at all,
    /// as opposed to a readable file whose layout did not match.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            SpecSheetError::Open { .. }
                | SpecSheetError::PdftotextNotFound
                | SpecSheetError::PdftotextFailed { .. }
        )
    }
}
