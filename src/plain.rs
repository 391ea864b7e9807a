//! Plain-text rendering, used as the text alternative when copying.

use crate::block::{Block, Document, Span};
use crate::inline::push_plain_text;

/// Convert a document to plain text, one blank line between blocks.
pub fn document_to_text(document: &Document) -> String {
    let blocks: Vec<String> = document.blocks.iter().map(block_to_text).collect();
    blocks.join("\n\n")
}

fn block_to_text(block: &Block) -> String {
    let mut out = String::new();
    match block {
        Block::HeaderMetadata { lines } => push_lines(lines, "", &mut out),
        Block::Heading { content, .. }
        | Block::BoldLabel { content, .. }
        | Block::Paragraph { content } => push_plain_text(content, &mut out),
        Block::List { items } => push_lines(items, "• ", &mut out),
        Block::Table(table) => {
            push_row(&table.header, &mut out);
            for row in &table.rows {
                out.push('\n');
                push_row(row, &mut out);
            }
        }
    }
    out
}

fn push_lines(lines: &[Vec<Span>], prefix: &str, out: &mut String) {
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        push_plain_text(line, out);
    }
}

fn push_row(cells: &[Vec<Span>], out: &mut String) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push('\t');
        }
        push_plain_text(cell, out);
    }
}
