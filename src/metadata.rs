//! Header metadata: the school / department / teacher lines at the top of
//! a plan, grouped into one left-aligned block.

use crate::block::Block;
use crate::inline::parse_inline;
use crate::parser::Grammar;

/// Group a run of header field lines starting at `lines[start]`.
///
/// Blank lines inside the run are absorbed. Entries keep the untrimmed line
/// so leading spaces reach the inline parser.
pub fn header_block(grammar: &Grammar, lines: &[&str], start: usize) -> Option<(Block, usize)> {
    if !grammar.is_header_field(lines.get(start)?.trim()) {
        return None;
    }

    let mut entries = Vec::new();
    let mut end = start;
    while let Some(line) = lines.get(end) {
        let trimmed = line.trim();
        if grammar.is_header_field(trimmed) {
            entries.push(parse_inline(line));
        } else if !trimmed.is_empty() {
            break;
        }
        end += 1;
    }

    Some((Block::HeaderMetadata { lines: entries }, end - start))
}

/// Read a fenced metadata block such as
///
/// ````text
/// ```document_header
/// **Trường:** THPT A
/// ```
/// ````
///
/// An unclosed fence runs to the end of the buffer, which happens while the
/// text is still streaming in.
pub fn fenced_block(grammar: &Grammar, lines: &[&str], start: usize) -> Option<(Block, usize)> {
    let info = lines.get(start)?.trim().strip_prefix("```")?;
    if grammar.metadata_fence().is_empty() || info.trim() != grammar.metadata_fence() {
        return None;
    }

    let mut entries = Vec::new();
    let mut end = start + 1;
    while let Some(line) = lines.get(end) {
        end += 1;
        let trimmed = line.trim();
        if trimmed == "```" {
            break;
        }
        if !trimmed.is_empty() {
            entries.push(parse_inline(line));
        }
    }

    Some((Block::HeaderMetadata { lines: entries }, end - start))
}
