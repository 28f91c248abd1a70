use crate::extraction::Grid;

/// Reconstruct table rows from pdftotext -layout output.
///
/// pdftotext -layout keeps column alignment with runs of spaces, so a line
/// with two or more gap-separated segments is treated as a table row.
/// Single-segment lines (prose, headings) are dropped. Returns `None` when
/// the page has no table-like line at all.
pub fn grid_from_layout(layout_text: &str) -> Option<Grid> {
    let rows: Grid = layout_text
        .lines()
        .map(split_by_whitespace_gaps)
        .filter(|cells| cells.len() >= 2)
        .map(|cells| cells.into_iter().map(str::to_string).collect())
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

/// Split a line by gaps of 2+ whitespace characters.
///
/// Slices end at the byte where the gap begins, so multi-byte whitespace
/// such as U+00A0 never splits a character.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut gap_start = 0;
    let mut gap_len = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if gap_len == 0 {
                gap_start = i;
            }
            gap_len += 1;
            if gap_len == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..gap_start]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            gap_len = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}
