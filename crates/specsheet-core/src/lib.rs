pub mod assemble;
pub mod batch;
pub mod error;
pub mod extraction;
pub mod locate;
pub mod manifest;
pub mod master;
pub mod normalize;
pub mod registry;
pub mod schema;
pub mod sink;
pub mod variants;

use error::SpecSheetError;
use extraction::DocumentLoader;
use schema::CanonicalRecord;

pub use batch::{extract_document, run_batch, BatchOptions, BatchReport};

/// Main API entry point: extract canonical records from one PDF.
///
/// `identity` selects the strategy (a registry key or the sheet's
/// filename); `source_file` is stamped on every record as provenance.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    loader: &dyn DocumentLoader,
    identity: &str,
    source_file: &str,
) -> Result<Vec<CanonicalRecord>, SpecSheetError> {
    let variant = registry::resolve(identity)
        .ok_or_else(|| SpecSheetError::UnknownVariant(identity.to_string()))?;

    let document = loader.load_bytes(pdf_bytes)?;
    batch::extract_records(variant, &document, source_file)
}
