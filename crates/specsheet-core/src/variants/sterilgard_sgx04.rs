//! Baker SterilGARD SGX04 biosafety cabinet, product specifications rev E.

use crate::error::SpecSheetError;
use crate::extraction::Document;
use crate::locate::pattern::{apply_rules, PatternRule};
use crate::locate::{Extraction, FieldLocator, Manufacturer};
use crate::normalize::{mm_to_inches, strip_opt, strip_units, AMP_UNITS, HERTZ_UNITS, VOLT_UNITS};
use crate::schema::Field;

pub const KEY: &str = "sterilgard-sgx04";

const PATTERNS: &[PatternRule] = &[
    PatternRule::group(Field::MfrNumber, r"MODEL\s*(SG\d+)", 1),
    PatternRule::group(Field::Width, r"Nominal Size\s*(\d+.*?Meters)", 1),
    PatternRule::group(Field::Height, r"(?s)Cabinet Height.*?(\d+)\s*\[?mm\]?", 1),
    PatternRule::group(Field::Volts, r"(?s)Service Requirements.*?(\d+ V AC)", 1),
    PatternRule::group(Field::Amps, r"(\d+ A), 50/60 Hz", 1),
    PatternRule::group(Field::Weight, r"(?s)Weight.*?(\d+ Kg)", 1),
];

// Not printed on the sheet in a locatable form; fixed for this revision.
const HERTZ: &str = "50/60 Hz";
const PLUG_TYPE: &str = "Listed plug for destination country";
const DESCRIPTION: &str = "SterilGARD SGX04 Class II, Type A2 Biosafety Cabinet.";

pub struct SterilGardSgx04;

impl FieldLocator for SterilGardSgx04 {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self) -> &'static str {
        "Baker SterilGARD SGX04 product specifications (rev E)"
    }

    fn manufacturer(&self) -> Manufacturer {
        Manufacturer {
            name: "Baker",
            website: "https://www.bakerco.com",
            product_url: "https://www.bakerco.com",
        }
    }

    fn source_filename(&self) -> &'static str {
        "SterilGARD-SGX04-Product-Specifications-RevE.pdf"
    }

    fn extract(&self, document: &Document) -> Result<Extraction, SpecSheetError> {
        let mut fields = apply_rules(&document.full_text(), PATTERNS)?;

        let height = mm_to_inches(fields.get(Field::Height), Field::Height)?;
        fields.set_opt(Field::Height, height.map(|h| h.to_string()));

        let volts = strip_opt(fields.get(Field::Volts), VOLT_UNITS);
        fields.set_opt(Field::Volts, volts);
        let amps = strip_opt(fields.get(Field::Amps), AMP_UNITS);
        fields.set_opt(Field::Amps, amps);

        fields.set(Field::ModelName, "SterilGARD SGX04");
        fields.set(Field::ProductDescription, DESCRIPTION);
        fields.set_opt(Field::Hertz, strip_units(HERTZ, HERTZ_UNITS));
        fields.set(Field::PlugType, PLUG_TYPE);

        tracing::debug!(located = fields.present().count(), "sgx04 fields located");
        Ok(Extraction::single(fields))
    }
}
