use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One column of the canonical catalog record.
///
/// `Field::ALL` is the single schema definition shared by every variant:
/// its order is the column order of written tables, and `default()` is the
/// value a record holds when the field was not located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    MfrWebsite,
    MfrName,
    ModelName,
    MfrNumber,
    ProductDescription,
    Volts,
    Amps,
    Hertz,
    Phase,
    PlugType,
    Btu,
    Width,
    Depth,
    Height,
    Weight,
    ShipWeight,
    EmergencyPower,
    DedicatedCircuit,
    NetworkConnection,
    WaterSupply,
    Drain,
    Exhaust,
    MedicalGas,
    SpecSheet,
    ProductUrl,
}

impl Field {
    pub const ALL: [Field; 25] = [
        Field::MfrWebsite,
        Field::MfrName,
        Field::ModelName,
        Field::MfrNumber,
        Field::ProductDescription,
        Field::Volts,
        Field::Amps,
        Field::Hertz,
        Field::Phase,
        Field::PlugType,
        Field::Btu,
        Field::Width,
        Field::Depth,
        Field::Height,
        Field::Weight,
        Field::ShipWeight,
        Field::EmergencyPower,
        Field::DedicatedCircuit,
        Field::NetworkConnection,
        Field::WaterSupply,
        Field::Drain,
        Field::Exhaust,
        Field::MedicalGas,
        Field::SpecSheet,
        Field::ProductUrl,
    ];

    /// Column header as it appears in the master catalog.
    pub fn name(self) -> &'static str {
        match self {
            Field::MfrWebsite => "mfr website",
            Field::MfrName => "mfr name",
            Field::ModelName => "model name",
            Field::MfrNumber => "mfr number",
            Field::ProductDescription => "product description",
            Field::Volts => "volts",
            Field::Amps => "amps",
            Field::Hertz => "hertz",
            Field::Phase => "phase",
            Field::PlugType => "plug_type",
            Field::Btu => "btu",
            Field::Width => "width",
            Field::Depth => "depth",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::ShipWeight => "ship_weight",
            Field::EmergencyPower => "emergency power",
            Field::DedicatedCircuit => "dedicated circuit",
            Field::NetworkConnection => "network connection",
            Field::WaterSupply => "water supply",
            Field::Drain => "drain",
            Field::Exhaust => "exhaust",
            Field::MedicalGas => "medical gas",
            Field::SpecSheet => "Specification Sheet (pdf)",
            Field::ProductUrl => "Product URL",
        }
    }

    /// Value held by a record when the field was not located.
    ///
    /// Facility-requirement flags are `"Y"`/`"N"` and default to `"N"`;
    /// everything else defaults to the empty string.
    pub fn default_value(self) -> &'static str {
        if self.is_facility_flag() {
            "N"
        } else {
            ""
        }
    }

    pub fn is_facility_flag(self) -> bool {
        matches!(
            self,
            Field::EmergencyPower
                | Field::DedicatedCircuit
                | Field::NetworkConnection
                | Field::WaterSupply
                | Field::Drain
                | Field::Exhaust
                | Field::MedicalGas
        )
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of all schema columns, in table order.
pub fn column_names() -> Vec<&'static str> {
    Field::ALL.iter().map(|f| f.name()).collect()
}

/// A fully-keyed catalog record.
///
/// Always holds a value for every `Field`; construction goes through
/// `CanonicalRecord::template()` so no key can be missing, and there are no
/// public setters, so a record is frozen once the assembler hands it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    values: Vec<String>,
}

impl CanonicalRecord {
    /// A record holding every field's default.
    pub(crate) fn template() -> Self {
        CanonicalRecord {
            values: Field::ALL
                .iter()
                .map(|f| f.default_value().to_string())
                .collect(),
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Look up a value by its column header.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        Field::from_name(name).map(|f| self.get(f))
    }

    /// `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        column_names()
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}
