pub mod pdftotext;
pub mod table;

use crate::error::SpecSheetError;
use std::path::Path;

/// Row/column grid of cell strings reconstructed from a page.
pub type Grid = Vec<Vec<String>>;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Plain text of the page in reading order.
    pub text: String,
    /// Table grid, present only for table-bearing pages.
    pub table: Option<Grid>,
}

/// An opened input document.
///
/// Owned by the extraction call for one file; dropping it is the close.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub pages: Vec<PageContent>,
}

impl Document {
    pub fn new(pages: Vec<PageContent>) -> Self {
        Document { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain text of the page at `page_index` (0-based).
    pub fn page_text(&self, page_index: usize) -> Option<&str> {
        self.pages.get(page_index).map(|p| p.text.as_str())
    }

    /// Table grid of the page at `page_index` (0-based), if it has one.
    pub fn page_table(&self, page_index: usize) -> Option<&Grid> {
        self.pages.get(page_index).and_then(|p| p.table.as_ref())
    }

    /// All page texts joined by newlines; the haystack for pattern rules.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for PDF loading backends.
pub trait DocumentLoader: Send + Sync {
    /// Build a document from raw PDF bytes.
    fn load_bytes(&self, pdf_bytes: &[u8]) -> Result<Document, SpecSheetError>;

    /// Name of this loading backend (for diagnostics).
    fn backend_name(&self) -> &str;

    /// Open the file at `path`. A missing or unreadable file is
    /// `SpecSheetError::Open`.
    fn open(&self, path: &Path) -> Result<Document, SpecSheetError> {
        let bytes = std::fs::read(path).map_err(|e| SpecSheetError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.load_bytes(&bytes)
    }
}
