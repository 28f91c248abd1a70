use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::error::SpecSheetError;
use crate::schema::{column_names, CanonicalRecord};

/// The persisted catalog: a header plus typed rows.
///
/// Rows are only ever appended; existing rows keep their cells exactly as
/// read (numbers stay numbers, strings keep their whitespace, blank rows
/// stay). Columns are the pre-existing header in its original order
/// followed by any schema fields the header lacked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterTable {
    columns: Vec<String>,
    rows: Vec<Vec<Data>>,
}

impl MasterTable {
    /// An empty table with the schema columns.
    pub fn empty() -> Self {
        MasterTable {
            columns: column_names().into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// A fresh table holding just `records`.
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let mut table = Self::empty();
        table.append(records);
        table
    }

    /// Read the pre-existing catalog from a workbook sheet or a CSV file.
    pub fn load(path: &Path, sheet_name: &str) -> Result<Self, SpecSheetError> {
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let table = if is_csv {
            load_csv(path)?
        } else {
            load_workbook(path, sheet_name)?
        };
        tracing::info!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = table.columns.len(),
            "loaded master table"
        );
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Data>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append records, adding any schema columns the table does not have yet.
    ///
    /// Record values become string cells; empty values become empty cells.
    pub fn append(&mut self, records: &[CanonicalRecord]) {
        if records.is_empty() {
            return;
        }

        for name in column_names() {
            if !self.columns.iter().any(|c| c == name) {
                self.columns.push(name.to_string());
            }
        }
        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, Data::Empty);
        }

        for record in records {
            let row = self
                .columns
                .iter()
                .map(|col| match record.get_by_name(col) {
                    Some(value) if !value.is_empty() => Data::String(value.to_string()),
                    _ => Data::Empty,
                })
                .collect();
            self.rows.push(row);
        }
    }

    fn from_grid(mut grid: Vec<Vec<Data>>) -> Self {
        if grid.is_empty() {
            return Self::empty();
        }
        let header = grid.remove(0);
        let columns: Vec<String> = header.iter().map(cell_text).collect();
        let width = columns.len();
        let rows = grid
            .into_iter()
            .map(|mut row| {
                row.resize(width, Data::Empty);
                row
            })
            .collect();
        MasterTable { columns, rows }
    }
}

fn load_workbook(path: &Path, sheet_name: &str) -> Result<MasterTable, SpecSheetError> {
    let load_err = |reason: String| SpecSheetError::MasterLoad {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| load_err(e.to_string()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| load_err(format!("sheet '{sheet_name}' not found: {e}")))?;

    let grid = range.rows().map(<[Data]>::to_vec).collect();
    Ok(MasterTable::from_grid(grid))
}

fn load_csv(path: &Path) -> Result<MasterTable, SpecSheetError> {
    let load_err = |e: csv::Error| SpecSheetError::MasterLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(load_err)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(load_err)?;
        grid.push(
            record
                .iter()
                .map(|field| match field {
                    "" => Data::Empty,
                    text => Data::String(text.to_string()),
                })
                .collect(),
        );
    }
    Ok(MasterTable::from_grid(grid))
}

/// Text form of a cell, untrimmed; used for headers and CSV output.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}
