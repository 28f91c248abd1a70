//! Stryker ProCuity bed, 2020 spec sheet (Mkt Lit 2077, rev C).
//!
//! Dimensions and model number are found by pattern search. The electrical
//! block on page 2 has no reliable labels in reading-order text, so it is
//! read by fixed offsets from the "iBed Wireless" feature line.

use crate::error::SpecSheetError;
use crate::extraction::Document;
use crate::locate::pattern::{apply_rules, PatternRule};
use crate::locate::positional::{OffsetRule, PageLines};
use crate::locate::{Extraction, FieldLocator, Manufacturer};
use crate::normalize::{collapse_whitespace, strip_opt, AMP_UNITS, HERTZ_UNITS, VOLT_UNITS};
use crate::schema::Field;

pub const KEY: &str = "procuity";

pub const ANCHOR: &str = "iBed Wireless and Secure Connect ready";
const SECTION_LABEL: &str = "Electrical requirements";
const ELECTRICAL_PAGE: usize = 1;

const PATTERNS: &[PatternRule] = &[
    PatternRule::group(Field::MfrNumber, r"Model number\s*(\d+)", 1),
    PatternRule::group(Field::Width, r"Width\s*(\d+.*?cm)", 1),
    PatternRule::range(
        Field::Height,
        r"(?s)Height range.*?High:\s*(\d+.*?cm).*?Low:\s*(\d+.*?cm)",
        1,
        2,
    ),
    PatternRule::group(Field::ProductDescription, r"(?s)Brilliance in a bed(.*?)L model", 1),
];

/// Offsets from the anchor line; offset 1 is the section label.
const ELECTRICAL_BLOCK: &[OffsetRule] = &[
    OffsetRule::new(Field::Volts, 2),
    OffsetRule::new(Field::Amps, 3),
    OffsetRule::new(Field::Hertz, 4),
    OffsetRule::new(Field::PlugType, 5),
    OffsetRule::new(Field::Weight, 6),
];

pub struct ProCuity;

impl FieldLocator for ProCuity {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self) -> &'static str {
        "Stryker ProCuity bed spec sheet (2 pages, rev C)"
    }

    fn manufacturer(&self) -> Manufacturer {
        Manufacturer {
            name: "Stryker",
            website: "https://www.stryker.com",
            product_url: "https://www.stryker.com",
        }
    }

    fn source_filename(&self) -> &'static str {
        "2020 ProCuity Spec Sheet JB Mkt Lit 2077 07 OCT 2020 REV C 1.pdf"
    }

    fn expected_pages(&self) -> Option<usize> {
        Some(2)
    }

    fn extract(&self, document: &Document) -> Result<Extraction, SpecSheetError> {
        let mut fields = apply_rules(&document.full_text(), PATTERNS)?;
        fields.set(Field::ModelName, "ProCuity");

        if let Some(desc) = fields.get(Field::ProductDescription) {
            let desc = collapse_whitespace(desc);
            fields.set(Field::ProductDescription, desc);
        }

        let lines = PageLines::from_page(document, ELECTRICAL_PAGE, KEY)?;
        let label = lines
            .find_anchor(ANCHOR)
            .and_then(|anchor| lines.line(anchor + 1));
        if label.is_some_and(|l| l != SECTION_LABEL) {
            return Err(SpecSheetError::locate(
                KEY,
                format!("expected '{SECTION_LABEL}' after anchor line"),
            ));
        }

        let electrical = lines.read_after_anchor(ANCHOR, ELECTRICAL_BLOCK, KEY)?;
        fields.set_opt(Field::Volts, strip_opt(electrical.get(Field::Volts), VOLT_UNITS));
        fields.set_opt(Field::Amps, strip_opt(electrical.get(Field::Amps), AMP_UNITS));
        fields.set_opt(Field::Hertz, strip_opt(electrical.get(Field::Hertz), HERTZ_UNITS));
        fields.set_opt(
            Field::PlugType,
            electrical.get(Field::PlugType).map(str::to_string),
        );
        fields.set_opt(Field::Weight, electrical.get(Field::Weight).map(str::to_string));

        tracing::debug!(located = fields.present().count(), "procuity fields located");
        Ok(Extraction::single(fields))
    }
}
