use crate::locate::{CandidateFieldSet, Extraction, Manufacturer};
use crate::schema::{CanonicalRecord, Field};

/// Where a record came from: the sheet file and the fixed manufacturer
/// identity of the strategy that read it.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source_file: String,
    pub manufacturer: Manufacturer,
}

/// Build a canonical record from a candidate field set.
///
/// Starts from the schema defaults, overlays every located field, then
/// stamps provenance. Provenance always wins over located values for the
/// fields it owns.
pub fn assemble(candidate: &CandidateFieldSet, provenance: &Provenance) -> CanonicalRecord {
    let mut record = CanonicalRecord::template();

    for (field, value) in candidate.present() {
        record.set(field, value);
    }

    record.set(Field::MfrName, provenance.manufacturer.name);
    record.set(Field::MfrWebsite, provenance.manufacturer.website);
    record.set(Field::ProductUrl, provenance.manufacturer.product_url);
    record.set(Field::SpecSheet, provenance.source_file.as_str());

    record
}

/// One record per product described by the extraction.
pub fn assemble_all(extraction: &Extraction, provenance: &Provenance) -> Vec<CanonicalRecord> {
    extraction
        .candidates()
        .iter()
        .map(|c| assemble(c, provenance))
        .collect()
}
