//! Pipe table recognition.
//!
//! A table starts at a line containing `|` that is directly followed by a
//! separator line. Body rows run until a blank line, a line without a pipe,
//! or another separator line.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Alignment, Block, Span, Table};
use crate::inline::parse_inline;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s|:-]+$").unwrap());

/// Whether `line` is a separator line such as `| :--- | ---: |`.
pub fn is_separator(line: &str) -> bool {
    let line = line.trim();
    line.contains('-') && SEPARATOR_RE.is_match(line)
}

/// Split a row into trimmed cells. One leading and one trailing pipe are
/// optional.
pub fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(str::trim).collect()
}

/// Try to read a table starting at `lines[start]`.
///
/// Returns the table and the number of lines it spans.
pub fn table_block(lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let header_line = lines.get(start)?.trim();
    let separator = lines.get(start + 1)?;
    if !header_line.contains('|') || !is_separator(separator) {
        return None;
    }

    let header_cells = split_row(header_line);
    let width = header_cells.len();

    let markers = split_row(separator);
    let columns = (0..width)
        .map(|col| {
            markers
                .get(col)
                .map_or(Alignment::Left, |cell| Alignment::from_separator_cell(cell))
        })
        .collect();

    let header = header_cells.iter().map(|cell| parse_inline(cell)).collect();

    let mut end = start + 2;
    let mut rows = Vec::new();
    while let Some(line) = lines.get(end) {
        let row = line.trim();
        if row.is_empty() || !row.contains('|') || is_separator(row) {
            break;
        }
        // Short rows are padded, long rows truncated to the header width.
        let mut cells = split_row(row);
        cells.resize(width, "");
        rows.push(cells.iter().map(|cell| parse_inline(cell)).collect::<Vec<Vec<Span>>>());
        end += 1;
    }

    Some((
        Block::Table(Table {
            columns,
            header,
            rows,
        }),
        end - start,
    ))
}
