use serde::{Deserialize, Serialize};

/// A run configuration: which master table to extend, which sheets to read,
/// and where the results go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    #[serde(default)]
    pub name: Option<String>,
    /// Pre-existing catalog, relative to the working directory. When unset
    /// the run starts from an empty table.
    #[serde(default)]
    pub master: Option<String>,
    #[serde(default = "default_sheet")]
    pub master_sheet: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// File name of the appended catalog inside `output_dir`.
    pub master_output: String,
    pub documents: Vec<DocumentEntry>,
}

/// One input sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Path relative to the working directory.
    pub file: String,
    /// Registry key. When unset the variant is resolved from the file name.
    #[serde(default)]
    pub variant: Option<String>,
}

impl DocumentEntry {
    /// The identity handed to the registry.
    pub fn identity(&self) -> &str {
        self.variant.as_deref().unwrap_or(&self.file)
    }
}

fn default_sheet() -> String {
    "Master".into()
}

fn default_output_dir() -> String {
    "output".into()
}
