//! Baker SterilGARD e3 family brochure (9 pages).
//!
//! One sheet covers three cabinet widths. The per-model numbers come from
//! the specification table on page 8; the electrical service line is shared
//! by all three models.

use crate::error::SpecSheetError;
use crate::extraction::Document;
use crate::locate::pattern::{apply_rules, PatternRule};
use crate::locate::positional::TableView;
use crate::locate::{CandidateFieldSet, Extraction, FieldLocator, Manufacturer};
use crate::normalize::{mm_to_inches, strip_opt, AMP_UNITS, HERTZ_UNITS, POUND_UNITS, VOLT_UNITS};
use crate::schema::Field;

pub const KEY: &str = "sterilgard-e3";

const TABLE_PAGE: usize = 7;
const HEADER_MARKER: &str = "Model";
const MODEL_COLUMNS: usize = 3;

/// Table rows below the header, with the label each must carry.
const TABLE_ROWS: &[(usize, Field, &str)] = &[
    (1, Field::Width, "Exterior Width"),
    (2, Field::Depth, "Exterior Depth"),
    (3, Field::Height, "Exterior Height"),
    (4, Field::Weight, "Net Weight"),
    (5, Field::ShipWeight, "Shipping Weight"),
];

const PATTERNS: &[PatternRule] = &[
    PatternRule::group(Field::Volts, r"Electrical Service:\s*(\d+\s*V\s*AC)", 1),
    PatternRule::group(Field::Amps, r"Electrical Service:.*?(\d+\s*A),", 1),
    PatternRule::group(Field::Hertz, r"Electrical Service:.*?(\d+/\d+\s*Hz)", 1),
    PatternRule::group(Field::PlugType, r"Power Cord:\s*(.+)", 1),
];

const DESCRIPTION: &str = "SterilGARD e3 Class II, Type A2 Biosafety Cabinet.";

pub struct SterilGardE3;

impl FieldLocator for SterilGardE3 {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self) -> &'static str {
        "Baker SterilGARD e3 family brochure (9 pages, 3 models)"
    }

    fn manufacturer(&self) -> Manufacturer {
        Manufacturer {
            name: "Baker",
            website: "https://www.bakerco.com",
            product_url: "https://www.bakerco.com",
        }
    }

    fn source_filename(&self) -> &'static str {
        "SterilGARD-e3-Brochure.pdf"
    }

    fn expected_pages(&self) -> Option<usize> {
        Some(9)
    }

    fn extract(&self, document: &Document) -> Result<Extraction, SpecSheetError> {
        let mut shared = apply_rules(&document.full_text(), PATTERNS)?;
        let volts = strip_opt(shared.get(Field::Volts), VOLT_UNITS);
        shared.set_opt(Field::Volts, volts);
        let amps = strip_opt(shared.get(Field::Amps), AMP_UNITS);
        shared.set_opt(Field::Amps, amps);
        let hertz = strip_opt(shared.get(Field::Hertz), HERTZ_UNITS);
        shared.set_opt(Field::Hertz, hertz);
        shared.set(Field::ModelName, "SterilGARD e3");
        shared.set(Field::ProductDescription, DESCRIPTION);

        let table = TableView::locate(
            document,
            TABLE_PAGE,
            HEADER_MARKER,
            MODEL_COLUMNS + 1,
            TABLE_ROWS.len(),
            KEY,
        )?;

        for (row, _, label) in TABLE_ROWS {
            if !table.label(*row).is_some_and(|l| l.starts_with(*label)) {
                return Err(SpecSheetError::locate(
                    KEY,
                    format!("table row {row} should be '{label}'"),
                ));
            }
        }

        let mut models = Vec::with_capacity(MODEL_COLUMNS);
        for col in 1..=MODEL_COLUMNS {
            models.push(read_model_column(&table, col)?);
        }

        tracing::debug!(models = models.len(), "e3 table located");
        Ok(Extraction { shared, models })
    }
}

fn read_model_column(
    table: &TableView<'_>,
    col: usize,
) -> Result<CandidateFieldSet, SpecSheetError> {
    let mut fields = CandidateFieldSet::new();
    fields.set_opt(Field::MfrNumber, table.cell(0, col).map(str::to_string));

    for (row, field, _) in TABLE_ROWS {
        let raw = table.cell(*row, col);
        let value = match field {
            Field::Width | Field::Depth | Field::Height => {
                mm_to_inches(raw, *field)?.map(|v| v.to_string())
            }
            _ => strip_opt(raw, POUND_UNITS),
        };
        fields.set_opt(*field, value);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{Grid, PageContent};

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn spec_table() -> Grid {
        grid(&[
            &["Model", "SG404", "SG504", "SG604"],
            &["Exterior Width [mm]", "1346", "1651", "1956"],
            &["Exterior Depth [mm]", "813", "813", "813"],
            &["Exterior Height [mm]", "1575", "1575", "1575"],
            &["Net Weight [lbs]", "550 lbs", "640 lbs", "730 lbs"],
            &["Shipping Weight [lbs]", "650 lbs", "750 lbs", "850 lbs"],
        ])
    }

    fn doc(table: Grid) -> Document {
        let pages = (0..9)
            .map(|i| PageContent {
                page_number: i + 1,
                text: if i == 2 {
                    "Electrical Service: 115 V AC, 16 A, 50/60 Hz\nPower Cord: NEMA 5-20P, 10 ft\n"
                        .into()
                } else {
                    format!("page {}\n", i + 1)
                },
                table: (i == TABLE_PAGE).then(|| table.clone()),
            })
            .collect();
        Document::new(pages)
    }

    #[test]
    fn test_three_models() {
        let extraction = SterilGardE3.extract(&doc(spec_table())).unwrap();
        assert_eq!(extraction.models.len(), 3);

        let numbers: Vec<_> = extraction
            .models
            .iter()
            .map(|m| m.get(Field::MfrNumber).unwrap())
            .collect();
        assert_eq!(numbers, vec!["SG404", "SG504", "SG604"]);

        let sg504 = &extraction.models[1];
        assert_eq!(sg504.get(Field::Width), Some("65.0000351"));
        assert_eq!(sg504.get(Field::Depth), Some("32.0078913"));
        assert_eq!(sg504.get(Field::Weight), Some("640"));
        assert_eq!(sg504.get(Field::ShipWeight), Some("750"));
    }

    #[test]
    fn test_shared_electrical_line() {
        let shared = SterilGardE3.extract(&doc(spec_table())).unwrap().shared;
        assert_eq!(shared.get(Field::Volts), Some("115"));
        assert_eq!(shared.get(Field::Amps), Some("16"));
        assert_eq!(shared.get(Field::Hertz), Some("50/60"));
        assert_eq!(shared.get(Field::PlugType), Some("NEMA 5-20P, 10 ft"));
    }

    #[test]
    fn test_relabelled_row_fails() {
        let mut table = spec_table();
        table[2][0] = "Interior Depth [mm]".into();
        let err = SterilGardE3.extract(&doc(table)).unwrap_err();
        assert!(matches!(err, SpecSheetError::LocateFailed { .. }));
    }

    #[test]
    fn test_missing_table_fails() {
        let mut d = doc(spec_table());
        d.pages[TABLE_PAGE].table = None;
        assert!(matches!(
            SterilGardE3.extract(&d),
            Err(SpecSheetError::LocateFailed { .. })
        ));
    }

    #[test]
    fn test_malformed_millimetres_is_normalization_error() {
        let mut table = spec_table();
        table[1][3] = "19S6".into();
        let err = SterilGardE3.extract(&doc(table)).unwrap_err();
        assert!(matches!(err, SpecSheetError::Normalization { .. }));
    }
}
