use calamine::Data;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::error::SpecSheetError;
use crate::master::{cell_text, MasterTable};

/// Destination for finished tables.
pub trait RecordSink {
    /// Overwrite `destination` with the full table (header plus all rows).
    fn write_table(
        &self,
        table: &MasterTable,
        destination: &Path,
        sheet_name: &str,
    ) -> Result<(), SpecSheetError>;
}

/// Writes `.xlsx` workbooks with a single named sheet.
///
/// The document creation time is pinned so that the same table always
/// produces the same bytes.
#[derive(Debug, Default)]
pub struct XlsxSink;

/// Writes comma-separated files; the sheet name is ignored.
#[derive(Debug, Default)]
pub struct CsvSink;

/// Chooses `CsvSink` for `.csv` destinations and `XlsxSink` otherwise.
#[derive(Debug, Default)]
pub struct FileSink;

fn write_err(destination: &Path, reason: impl ToString) -> SpecSheetError {
    SpecSheetError::Write {
        path: destination.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl RecordSink for XlsxSink {
    fn write_table(
        &self,
        table: &MasterTable,
        destination: &Path,
        sheet_name: &str,
    ) -> Result<(), SpecSheetError> {
        let err = |e: rust_xlsxwriter::XlsxError| write_err(destination, e);

        let mut workbook = Workbook::new();
        let created = ExcelDateTime::from_ymd(2000, 1, 1).map_err(err)?;
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).map_err(err)?;

        for (col, name) in table.columns().iter().enumerate() {
            let col = u16::try_from(col).map_err(|e| write_err(destination, e))?;
            sheet.write_string(0, col, name).map_err(err)?;
        }

        let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let duration_format = Format::new().set_num_format("[h]:mm:ss");

        for (i, row) in table.rows().iter().enumerate() {
            let row_num = u32::try_from(i + 1).map_err(|e| write_err(destination, e))?;
            for (col, cell) in row.iter().enumerate() {
                let col = u16::try_from(col).map_err(|e| write_err(destination, e))?;
                write_cell(sheet, row_num, col, cell, &date_format, &duration_format)
                    .map_err(err)?;
            }
        }

        workbook.save(destination).map_err(err)?;
        Ok(())
    }
}

/// Write one cell keeping its type. Empty cells are left unwritten so they
/// read back as blank.
fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Data,
    date_format: &Format,
    duration_format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        Data::Empty => {}
        Data::String(s) => {
            sheet.write_string(row, col, s)?;
        }
        Data::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Data::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Data::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            let format = if dt.is_duration() {
                duration_format
            } else {
                date_format
            };
            sheet.write_number_with_format(row, col, dt.as_f64(), format)?;
        }
        other => {
            sheet.write_string(row, col, cell_text(other))?;
        }
    }
    Ok(())
}

impl RecordSink for CsvSink {
    fn write_table(
        &self,
        table: &MasterTable,
        destination: &Path,
        _sheet_name: &str,
    ) -> Result<(), SpecSheetError> {
        let err = |e: csv::Error| write_err(destination, e);

        let mut writer = csv::Writer::from_path(destination).map_err(err)?;
        writer.write_record(table.columns()).map_err(err)?;
        for row in table.rows() {
            writer
                .write_record(row.iter().map(cell_text))
                .map_err(err)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl RecordSink for FileSink {
    fn write_table(
        &self,
        table: &MasterTable,
        destination: &Path,
        sheet_name: &str,
    ) -> Result<(), SpecSheetError> {
        let is_csv = destination
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        tracing::info!(
            path = %destination.display(),
            rows = table.len(),
            "writing table"
        );
        if is_csv {
            CsvSink.write_table(table, destination, sheet_name)
        } else {
            XlsxSink.write_table(table, destination, sheet_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{assemble, Provenance};
    use crate::locate::{CandidateFieldSet, Manufacturer};
    use crate::schema::Field;

    fn table() -> MasterTable {
        MasterTable::from_records(&[table_record()])
    }

    fn table_record() -> crate::schema::CanonicalRecord {
        let mut c = CandidateFieldSet::new();
        c.set(Field::MfrNumber, "SG404");
        c.set(Field::ProductDescription, "Class II, Type A2");
        assemble(
            &c,
            &Provenance {
                source_file: "sheet.pdf".into(),
                manufacturer: Manufacturer {
                    name: "Baker",
                    website: "https://www.bakerco.com",
                    product_url: "https://www.bakerco.com",
                },
            },
        )
    }

    #[test]
    fn test_xlsx_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        FileSink.write_table(&table(), &path, "Master").unwrap();

        let loaded = MasterTable::load(&path, "Master").unwrap();
        assert_eq!(loaded, table());
    }

    #[test]
    fn test_xlsx_output_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xlsx");
        let b = dir.path().join("b.xlsx");
        XlsxSink.write_table(&table(), &a, "Master").unwrap();
        XlsxSink.write_table(&table(), &b, "Master").unwrap();
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        FileSink.write_table(&table(), &path, "ignored").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("mfr website,mfr name,model name,mfr number"));
        assert!(text.contains("\"Class II, Type A2\""));

        let loaded = MasterTable::load(&path, "ignored").unwrap();
        assert_eq!(loaded, table());
    }

    #[test]
    fn test_existing_cells_keep_type_and_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Master").unwrap();
        sheet.write_string(0, 0, "mfr number").unwrap();
        sheet.write_string(0, 1, "legacy qty").unwrap();
        sheet.write_string(0, 2, "in stock").unwrap();
        sheet.write_string(1, 0, "  A100 ").unwrap();
        sheet.write_number(1, 1, 42.5).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        sheet.write_string(3, 0, "A200").unwrap();
        sheet.write_number(3, 1, 3.0).unwrap();
        sheet.write_boolean(3, 2, false).unwrap();
        workbook.save(&seed).unwrap();

        let mut master = MasterTable::load(&seed, "Master").unwrap();
        assert_eq!(master.len(), 3);
        master.append(&[table_record()]);

        let out = dir.path().join("out.xlsx");
        XlsxSink.write_table(&master, &out, "Master").unwrap();
        let reread = MasterTable::load(&out, "Master").unwrap();

        assert_eq!(reread.len(), 4);
        assert_eq!(
            reread.rows()[0][..3],
            [
                Data::String("  A100 ".into()),
                Data::Float(42.5),
                Data::Bool(true)
            ]
        );
        assert!(reread.rows()[1].iter().all(|c| *c == Data::Empty));
        assert_eq!(
            reread.rows()[2][..3],
            [Data::String("A200".into()), Data::Float(3.0), Data::Bool(false)]
        );
        assert_eq!(reread.rows()[3][0], Data::String("SG404".into()));
    }

    #[test]
    fn test_csv_writes_numbers_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.csv");
        std::fs::write(&seed, "mfr number,qty\nA100,42.5\n").unwrap();
        let master = MasterTable::load(&seed, "Master").unwrap();

        let out = dir.path().join("out.csv");
        CsvSink.write_table(&master, &out, "Master").unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "mfr number,qty\nA100,42.5\n");
    }

    #[test]
    fn test_invalid_sheet_name_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let err = XlsxSink
            .write_table(&table(), &path, "bad[name]")
            .unwrap_err();
        assert!(matches!(err, SpecSheetError::Write { .. }));
    }
}
