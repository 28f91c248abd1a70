//! Positional-indexing locating discipline.
//!
//! Fields are read from fixed line offsets (relative to an anchor line) or
//! fixed table cells. These offsets only hold for the exact document
//! revision they were written against, so every read is preceded by a
//! structural check; a failed check is `LocateFailed` for the whole document
//! rather than a silently shifted value.

use crate::error::SpecSheetError;
use crate::extraction::{Document, Grid};
use crate::locate::CandidateFieldSet;
use crate::schema::Field;

/// A field read from `offset` lines after an anchor line.
#[derive(Debug, Clone, Copy)]
pub struct OffsetRule {
    pub field: Field,
    pub offset: usize,
}

impl OffsetRule {
    pub const fn new(field: Field, offset: usize) -> Self {
        OffsetRule { field, offset }
    }
}

/// A page split into trimmed, non-empty lines.
#[derive(Debug, Clone)]
pub struct PageLines {
    lines: Vec<String>,
}

impl PageLines {
    pub fn from_text(text: &str) -> Self {
        PageLines {
            lines: text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Lines of page `page_index`; a missing page is `LocateFailed`.
    pub fn from_page(
        document: &Document,
        page_index: usize,
        variant: &str,
    ) -> Result<Self, SpecSheetError> {
        let text = document.page_text(page_index).ok_or_else(|| {
            SpecSheetError::locate(variant, format!("page {} not present", page_index + 1))
        })?;
        Ok(Self::from_text(text))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Index of the first line equal to `marker`.
    pub fn find_anchor(&self, marker: &str) -> Option<usize> {
        self.lines.iter().position(|l| l == marker)
    }

    /// Read `rules` relative to the line equal to `marker`.
    ///
    /// Fails with `LocateFailed` if the anchor is missing or the page ends
    /// before the furthest offset.
    pub fn read_after_anchor(
        &self,
        marker: &str,
        rules: &[OffsetRule],
        variant: &str,
    ) -> Result<CandidateFieldSet, SpecSheetError> {
        let anchor = self.find_anchor(marker).ok_or_else(|| {
            SpecSheetError::locate(variant, format!("anchor line '{marker}' not found"))
        })?;

        let furthest = rules.iter().map(|r| r.offset).max().unwrap_or(0);
        if anchor + furthest >= self.lines.len() {
            return Err(SpecSheetError::locate(
                variant,
                format!(
                    "expected {} lines after '{marker}', page has {}",
                    furthest,
                    self.lines.len() - anchor - 1
                ),
            ));
        }

        let mut fields = CandidateFieldSet::new();
        for rule in rules {
            let line = &self.lines[anchor + rule.offset];
            fields.set(rule.field, value_after_label(line));
        }
        Ok(fields)
    }
}

/// The part of `line` after its first colon, or the whole line if it has
/// no `Label:` prefix.
pub fn value_after_label(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, value)) => value.trim(),
        None => line.trim(),
    }
}

/// Fixed-layout view over one page's table grid.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    grid: &'a Grid,
    header_row: usize,
}

impl<'a> TableView<'a> {
    /// Locate the table on `page_index` whose header row starts with
    /// `header_marker` and has at least `columns` cells, with at least
    /// `rows_below` rows following the header.
    pub fn locate(
        document: &'a Document,
        page_index: usize,
        header_marker: &str,
        columns: usize,
        rows_below: usize,
        variant: &str,
    ) -> Result<Self, SpecSheetError> {
        let grid = document.page_table(page_index).ok_or_else(|| {
            SpecSheetError::locate(variant, format!("no table on page {}", page_index + 1))
        })?;

        let header_row = grid
            .iter()
            .position(|row| row.first().map(String::as_str) == Some(header_marker))
            .ok_or_else(|| {
                SpecSheetError::locate(
                    variant,
                    format!("table header '{header_marker}' not found on page {}", page_index + 1),
                )
            })?;

        if grid[header_row].len() < columns {
            return Err(SpecSheetError::locate(
                variant,
                format!(
                    "table header has {} columns, expected {columns}",
                    grid[header_row].len()
                ),
            ));
        }

        if header_row + rows_below >= grid.len() {
            return Err(SpecSheetError::locate(
                variant,
                format!(
                    "expected {rows_below} table rows below header, found {}",
                    grid.len() - header_row - 1
                ),
            ));
        }

        Ok(TableView { grid, header_row })
    }

    /// Cell `row_offset` rows below the header, in column `col`.
    pub fn cell(&self, row_offset: usize, col: usize) -> Option<&'a str> {
        self.grid
            .get(self.header_row + row_offset)
            .and_then(|row| row.get(col))
            .map(String::as_str)
    }

    /// Row label (first cell) `row_offset` rows below the header.
    pub fn label(&self, row_offset: usize) -> Option<&'a str> {
        self.cell(row_offset, 0)
    }
}
