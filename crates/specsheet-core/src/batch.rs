//! Batch driver: resolve, open, locate, assemble, then sink once.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::assemble::{assemble_all, Provenance};
use crate::error::SpecSheetError;
use crate::extraction::{Document, DocumentLoader};
use crate::locate::FieldLocator;
use crate::manifest::schema::{DocumentEntry, RunManifest};
use crate::master::MasterTable;
use crate::registry;
use crate::schema::CanonicalRecord;
use crate::sink::RecordSink;

/// Furthest point a file reached in the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    DocumentOpened,
    FieldsLocated,
    Normalized,
    Assembled,
    Sunk,
    OpenFailed,
    LocateFailed,
}

/// Per-file outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Extracted { records: usize },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub variant: Option<&'static str>,
    pub status: FileStatus,
    pub stage: Stage,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    /// Records appended to the master table in this run.
    pub records_written: usize,
    /// Every table written, master output first.
    pub outputs: Vec<PathBuf>,
}

impl BatchReport {
    pub fn extracted(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Extracted { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }
}

/// Where a run reads its inputs and writes its outputs.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Document and master paths in the manifest are relative to this.
    pub workdir: PathBuf,
    /// Overrides the manifest's `output_dir` (which is relative to `workdir`).
    pub output_dir: Option<PathBuf>,
}

impl BatchOptions {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        BatchOptions {
            workdir: workdir.into(),
            output_dir: None,
        }
    }

    fn resolve_output_dir(&self, manifest: &RunManifest) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.workdir.join(&manifest.output_dir))
    }
}

/// Process every document in the manifest and persist the results.
///
/// A file that cannot be resolved or opened is skipped; a file whose layout
/// does not match its strategy fails without producing records. Neither
/// stops the batch. Only master loading and sink errors abort the run.
pub fn run_batch(
    manifest: &RunManifest,
    options: &BatchOptions,
    loader: &dyn DocumentLoader,
    sink: &dyn RecordSink,
) -> Result<BatchReport, SpecSheetError> {
    let mut master = match &manifest.master {
        Some(master) => MasterTable::load(&options.workdir.join(master), &manifest.master_sheet)?,
        None => MasterTable::empty(),
    };

    let mut files = Vec::with_capacity(manifest.documents.len());
    let mut new_records = Vec::new();
    let mut per_variant: BTreeMap<&'static str, Vec<CanonicalRecord>> = BTreeMap::new();

    for entry in &manifest.documents {
        let (report, records) = process_document(entry, options, loader);
        if let (Some(key), false) = (report.variant, records.is_empty()) {
            per_variant
                .entry(key)
                .or_default()
                .extend(records.iter().cloned());
            new_records.extend(records);
        }
        files.push(report);
    }

    master.append(&new_records);

    let output_dir = options.resolve_output_dir(manifest);
    std::fs::create_dir_all(&output_dir).map_err(|e| SpecSheetError::Write {
        path: output_dir.clone(),
        reason: e.to_string(),
    })?;

    let mut outputs = Vec::with_capacity(per_variant.len() + 1);
    let master_path = output_dir.join(&manifest.master_output);
    sink.write_table(&master, &master_path, &manifest.master_sheet)?;
    outputs.push(master_path);

    for (key, records) in &per_variant {
        let Some(variant) = registry::by_key(key) else {
            continue;
        };
        let path = output_dir.join(variant.output_filename());
        sink.write_table(&MasterTable::from_records(records), &path, &manifest.master_sheet)?;
        outputs.push(path);
    }

    for report in &mut files {
        if matches!(report.status, FileStatus::Extracted { .. }) {
            report.stage = Stage::Sunk;
        }
    }

    let report = BatchReport {
        files,
        records_written: new_records.len(),
        outputs,
    };
    tracing::info!(
        extracted = report.extracted(),
        skipped = report.skipped(),
        failed = report.failed(),
        records = report.records_written,
        "batch complete"
    );
    Ok(report)
}

fn process_document(
    entry: &DocumentEntry,
    options: &BatchOptions,
    loader: &dyn DocumentLoader,
) -> (FileReport, Vec<CanonicalRecord>) {
    let span = tracing::info_span!("document", file = %entry.file);
    let _guard = span.enter();

    let mut report = FileReport {
        file: entry.file.clone(),
        variant: None,
        status: FileStatus::Skipped {
            reason: String::new(),
        },
        stage: Stage::Idle,
    };

    let Some(variant) = registry::resolve(entry.identity()) else {
        let reason = format!("no strategy for '{}'", entry.identity());
        tracing::warn!(%reason, "skipping document");
        report.status = FileStatus::Skipped { reason };
        return (report, Vec::new());
    };
    report.variant = Some(variant.key());

    let path = options.workdir.join(&entry.file);
    match extract_tracked(variant, &path, loader, &mut report.stage) {
        Ok(records) => {
            tracing::info!(variant = variant.key(), records = records.len(), "document extracted");
            report.status = FileStatus::Extracted {
                records: records.len(),
            };
            (report, records)
        }
        Err(e) if e.is_open_failure() => {
            tracing::warn!(error = %e, "skipping document");
            report.status = FileStatus::Skipped {
                reason: e.to_string(),
            };
            (report, Vec::new())
        }
        Err(e) => {
            tracing::warn!(error = %e, "document failed");
            report.status = FileStatus::Failed {
                reason: e.to_string(),
            };
            (report, Vec::new())
        }
    }
}

fn extract_tracked(
    variant: &dyn FieldLocator,
    path: &Path,
    loader: &dyn DocumentLoader,
    stage: &mut Stage,
) -> Result<Vec<CanonicalRecord>, SpecSheetError> {
    let document = match loader.open(path) {
        Ok(d) => d,
        Err(e) => {
            *stage = Stage::OpenFailed;
            return Err(e);
        }
    };
    *stage = Stage::DocumentOpened;

    if let Err(e) = check_page_count(variant, &document) {
        *stage = Stage::LocateFailed;
        return Err(e);
    }

    // strategies locate and normalize in one pass; a normalization error
    // means the fields were found but a value was malformed
    let extraction = match variant.extract(&document) {
        Ok(extraction) => extraction,
        Err(e) => {
            *stage = match e {
                SpecSheetError::Normalization { .. } => Stage::FieldsLocated,
                _ => Stage::LocateFailed,
            };
            return Err(e);
        }
    };
    *stage = Stage::Normalized;

    let records = assemble_all(&extraction, &provenance(variant, &source_file_name(path)));
    *stage = Stage::Assembled;
    Ok(records)
}

fn check_page_count(
    variant: &dyn FieldLocator,
    document: &Document,
) -> Result<(), SpecSheetError> {
    match variant.expected_pages() {
        Some(expected) if document.page_count() != expected => Err(SpecSheetError::locate(
            variant.key(),
            format!(
                "expected {expected} pages, document has {}",
                document.page_count()
            ),
        )),
        _ => Ok(()),
    }
}

fn provenance(variant: &dyn FieldLocator, source_file: &str) -> Provenance {
    Provenance {
        source_file: source_file.to_string(),
        manufacturer: variant.manufacturer(),
    }
}

/// Run one strategy over an opened document and assemble its records.
///
/// The page count is checked first when the strategy declares one.
pub fn extract_records(
    variant: &dyn FieldLocator,
    document: &Document,
    source_file: &str,
) -> Result<Vec<CanonicalRecord>, SpecSheetError> {
    check_page_count(variant, document)?;
    let extraction = variant.extract(document)?;
    Ok(assemble_all(&extraction, &provenance(variant, source_file)))
}

/// Extract records from a single file without touching any table.
///
/// `identity` is a registry key or filename; when `None` the path's own
/// filename is used.
pub fn extract_document(
    path: &Path,
    identity: Option<&str>,
    loader: &dyn DocumentLoader,
) -> Result<Vec<CanonicalRecord>, SpecSheetError> {
    let source_file = source_file_name(path);
    let identity = identity.unwrap_or(&source_file);
    let variant = registry::resolve(identity)
        .ok_or_else(|| SpecSheetError::UnknownVariant(identity.to_string()))?;

    let document = loader.open(path)?;
    extract_records(variant, &document, &source_file)
}

fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PageContent;
    use crate::locate::{Extraction, Manufacturer};
    use crate::variants::SterilGardSgx04;

    struct FixedLoader(Document);

    impl DocumentLoader for FixedLoader {
        fn load_bytes(&self, _pdf_bytes: &[u8]) -> Result<Document, SpecSheetError> {
            Ok(self.0.clone())
        }

        fn backend_name(&self) -> &str {
            "fixed"
        }

        fn open(&self, _path: &Path) -> Result<Document, SpecSheetError> {
            Ok(self.0.clone())
        }
    }

    /// Finds its fields but cannot convert one of them.
    struct MalformedHeight;

    impl FieldLocator for MalformedHeight {
        fn key(&self) -> &'static str {
            "malformed-height"
        }

        fn description(&self) -> &'static str {
            "always fails normalization"
        }

        fn manufacturer(&self) -> Manufacturer {
            Manufacturer {
                name: "Baker",
                website: "https://www.bakerco.com",
                product_url: "https://www.bakerco.com",
            }
        }

        fn source_filename(&self) -> &'static str {
            "malformed.pdf"
        }

        fn extract(&self, _document: &Document) -> Result<Extraction, SpecSheetError> {
            Err(SpecSheetError::Normalization {
                field: "height".into(),
                token: "19S6".into(),
                reason: "not a whole number of millimetres".into(),
            })
        }
    }

    fn stage_after(variant: &dyn FieldLocator, document: Document) -> Stage {
        let mut stage = Stage::Idle;
        let _ = extract_tracked(variant, Path::new("x.pdf"), &FixedLoader(document), &mut stage);
        stage
    }

    fn pages(n: usize) -> Document {
        Document::new(
            (0..n)
                .map(|i| PageContent {
                    page_number: i + 1,
                    text: String::new(),
                    table: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_page_count_mismatch_is_locate_failure() {
        let procuity = registry::by_key("procuity").unwrap();
        let err = extract_records(procuity, &pages(3), "x.pdf").unwrap_err();
        assert!(matches!(err, SpecSheetError::LocateFailed { .. }));
    }

    #[test]
    fn test_stage_after_success_is_assembled() {
        assert_eq!(stage_after(&SterilGardSgx04, pages(1)), Stage::Assembled);
    }

    #[test]
    fn test_stage_after_page_count_mismatch() {
        let procuity = registry::by_key("procuity").unwrap();
        assert_eq!(stage_after(procuity, pages(5)), Stage::LocateFailed);
    }

    #[test]
    fn test_stage_after_normalization_error() {
        assert_eq!(stage_after(&MalformedHeight, pages(1)), Stage::FieldsLocated);
    }

    #[test]
    fn test_source_file_stamped() {
        let records = extract_records(&SterilGardSgx04, &pages(1), "sheet.pdf").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get(crate::schema::Field::SpecSheet),
            "sheet.pdf"
        );
    }

    #[test]
    fn test_report_counts() {
        let file = |status| FileReport {
            file: "f".into(),
            variant: None,
            status,
            stage: Stage::Idle,
        };
        let report = BatchReport {
            files: vec![
                file(FileStatus::Extracted { records: 3 }),
                file(FileStatus::Skipped { reason: "x".into() }),
                file(FileStatus::Failed { reason: "y".into() }),
                file(FileStatus::Extracted { records: 1 }),
            ],
            records_written: 4,
            outputs: Vec::new(),
        };
        assert_eq!(report.extracted(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_source_file_name_from_path() {
        assert_eq!(source_file_name(Path::new("docs/a b.pdf")), "a b.pdf");
    }
}
