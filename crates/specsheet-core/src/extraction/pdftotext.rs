use crate::error::SpecSheetError;
use crate::extraction::table::grid_from_layout;
use crate::extraction::{Document, DocumentLoader, PageContent};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF loading backend using pdftotext (from poppler-utils).
///
/// Page text comes from the default reading-order mode; table grids are
/// rebuilt from a second `-layout` pass, which keeps column alignment.
pub struct PdftotextLoader;

impl PdftotextLoader {
    pub fn new() -> Self {
        PdftotextLoader
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for PdftotextLoader {
    fn load_bytes(&self, pdf_bytes: &[u8]) -> Result<Document, SpecSheetError> {
        // pdftotext wants a path, so spill the bytes to a temp file
        let mut tmpfile = tempfile::NamedTempFile::new()?;
        tmpfile.write_all(pdf_bytes)?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext(&tmp_path, &[])?;
        let layout = run_pdftotext(&tmp_path, &["-layout"])?;

        let text_pages = split_pages(&text);
        let layout_pages = split_pages(&layout);
        tracing::debug!(pages = text_pages.len(), "pdftotext produced page text");

        let pages = text_pages
            .iter()
            .enumerate()
            .map(|(i, page_text)| PageContent {
                page_number: i + 1,
                text: page_text.to_string(),
                table: layout_pages.get(i).and_then(|l| grid_from_layout(l)),
            })
            .collect();

        Ok(Document::new(pages))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(pdf_path: &Path, flags: &[&str]) -> Result<String, SpecSheetError> {
    let output = Command::new("pdftotext")
        .args(flags)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpecSheetError::PdftotextNotFound
            } else {
                SpecSheetError::Open {
                    path: pdf_path.to_path_buf(),
                    reason: format!("pdftotext failed: {}", e),
                }
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(SpecSheetError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Split pdftotext output into pages (form feed \x0c separates pages and
/// also terminates the last one).
fn split_pages(text: &str) -> Vec<&str> {
    let body = text.strip_suffix('\x0c').unwrap_or(text);
    if body.is_empty() {
        return Vec::new();
    }
    body.split('\x0c').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_drops_trailing_feed() {
        let pages = split_pages("page one\n\x0cpage two\n\x0c");
        assert_eq!(pages, vec!["page one\n", "page two\n"]);
    }

    #[test]
    fn test_split_pages_keeps_blank_middle_page() {
        let pages = split_pages("a\x0c\x0cc\x0c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1], "");
    }

    #[test]
    fn test_split_pages_empty_output() {
        assert!(split_pages("").is_empty());
        assert!(split_pages("\x0c").is_empty());
    }
}
