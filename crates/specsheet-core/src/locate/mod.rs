pub mod pattern;
pub mod positional;

use crate::error::SpecSheetError;
use crate::extraction::Document;
use crate::schema::Field;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw, possibly partial field mapping produced by a locator.
///
/// A `None` value is an explicit absence marker: the field was looked for
/// and not found. Fields never mentioned are treated the same way at
/// assembly time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFieldSet {
    fields: BTreeMap<Field, Option<String>>,
}

impl CandidateFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a located value. Empty or whitespace-only values count as absent.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.mark_absent(field);
        } else {
            self.fields.insert(field, Some(trimmed.to_string()));
        }
    }

    /// Record an optional value, keeping the absence marker for `None`.
    pub fn set_opt(&mut self, field: Field, value: Option<String>) {
        match value {
            Some(v) => self.set(field, v),
            None => self.mark_absent(field),
        }
    }

    pub fn mark_absent(&mut self, field: Field) {
        self.fields.insert(field, None);
    }

    /// The located value, or `None` if absent or never looked for.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).and_then(|v| v.as_deref())
    }

    pub fn is_absent(&self, field: Field) -> bool {
        self.get(field).is_none()
    }

    /// Fields with a located value, in schema order.
    pub fn present(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields
            .iter()
            .filter_map(|(f, v)| v.as_deref().map(|v| (*f, v)))
    }

    /// Overlay `other` on top of `self`: present values in `other` win,
    /// absence markers in `other` never erase a value in `self`.
    pub fn merged_with(&self, other: &CandidateFieldSet) -> CandidateFieldSet {
        let mut merged = self.clone();
        for (field, value) in &other.fields {
            match value {
                Some(v) => {
                    merged.fields.insert(*field, Some(v.clone()));
                }
                None => {
                    merged.fields.entry(*field).or_insert(None);
                }
            }
        }
        merged
    }
}

/// Output of one strategy run over one document.
///
/// `shared` holds fields common to every product on the sheet; `models`
/// holds one set per sibling model. A single-product sheet leaves `models`
/// empty.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub shared: CandidateFieldSet,
    pub models: Vec<CandidateFieldSet>,
}

impl Extraction {
    pub fn single(fields: CandidateFieldSet) -> Self {
        Extraction {
            shared: fields,
            models: Vec::new(),
        }
    }

    /// One candidate per product, each with the shared fields underneath.
    pub fn candidates(&self) -> Vec<CandidateFieldSet> {
        if self.models.is_empty() {
            vec![self.shared.clone()]
        } else {
            self.models
                .iter()
                .map(|m| self.shared.merged_with(m))
                .collect()
        }
    }
}

/// Fixed manufacturer identity stamped on every record of a variant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Manufacturer {
    pub name: &'static str,
    pub website: &'static str,
    pub product_url: &'static str,
}

/// Extraction strategy for one exact document revision.
pub trait FieldLocator: Send + Sync {
    /// Registry key, e.g. `"procuity"`.
    fn key(&self) -> &'static str;

    /// Human-readable description for listings.
    fn description(&self) -> &'static str;

    fn manufacturer(&self) -> Manufacturer;

    /// Source filename the original sheet is distributed under.
    fn source_filename(&self) -> &'static str;

    /// Page count this revision must have; checked before extraction.
    fn expected_pages(&self) -> Option<usize> {
        None
    }

    /// Locate and normalize every field this variant knows about.
    fn extract(&self, document: &Document) -> Result<Extraction, SpecSheetError>;

    /// Fixed name of the per-variant output table.
    fn output_filename(&self) -> String {
        format!("{}-records.xlsx", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_value_is_absent() {
        let mut set = CandidateFieldSet::new();
        set.set(Field::Volts, "   ");
        assert!(set.is_absent(Field::Volts));
        assert_eq!(set.present().count(), 0);
    }

    #[test]
    fn test_set_trims() {
        let mut set = CandidateFieldSet::new();
        set.set(Field::Amps, " 12 ");
        assert_eq!(set.get(Field::Amps), Some("12"));
    }

    #[test]
    fn test_merge_absence_does_not_erase() {
        let mut shared = CandidateFieldSet::new();
        shared.set(Field::Volts, "115");
        let mut model = CandidateFieldSet::new();
        model.mark_absent(Field::Volts);
        model.set(Field::MfrNumber, "SG404");

        let merged = shared.merged_with(&model);
        assert_eq!(merged.get(Field::Volts), Some("115"));
        assert_eq!(merged.get(Field::MfrNumber), Some("SG404"));
    }

    #[test]
    fn test_candidates_single_and_multi() {
        let mut shared = CandidateFieldSet::new();
        shared.set(Field::ProductDescription, "Cabinet");
        assert_eq!(Extraction::single(shared.clone()).candidates().len(), 1);

        let models = (0..3)
            .map(|i| {
                let mut m = CandidateFieldSet::new();
                m.set(Field::MfrNumber, format!("M{i}"));
                m
            })
            .collect();
        let extraction = Extraction { shared, models };
        let candidates = extraction.candidates();
        assert_eq!(candidates.len(), 3);
        assert!(candidates
            .iter()
            .all(|c| c.get(Field::ProductDescription) == Some("Cabinet")));
        assert_eq!(candidates[2].get(Field::MfrNumber), Some("M2"));
    }
}
