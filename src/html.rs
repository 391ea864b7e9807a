use html_escape::encode_text;

use crate::block::{Alignment, Block, Document, Span, Table};
use crate::math::{MathMode, MathRenderer};

/// Convert a document to an HTML fragment for on-screen display.
pub fn document_to_html(document: &Document, math: &dyn MathRenderer) -> String {
    let mut out = String::new();
    for block in &document.blocks {
        emit_block(block, math, &mut out);
    }
    out
}

fn emit_block(block: &Block, math: &dyn MathRenderer, out: &mut String) {
    match block {
        Block::HeaderMetadata { lines } => {
            out.push_str("<div class=\"text-left\">\n");
            for line in lines {
                out.push_str("<p>");
                spans_to_html(line, math, out);
                out.push_str("</p>\n");
            }
            out.push_str("</div>\n");
        }
        Block::Heading { level, content } => {
            let class = match level {
                1 => " class=\"text-center uppercase\"",
                2 => " class=\"uppercase\"",
                _ => "",
            };
            out.push_str(&format!("<h{level}{class}>"));
            spans_to_html(content, math, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::BoldLabel { centered, content } => {
            if *centered {
                out.push_str("<p class=\"text-center font-bold\">");
            } else {
                out.push_str("<p class=\"font-bold\">");
            }
            spans_to_html(content, math, out);
            out.push_str("</p>\n");
        }
        Block::List { items } => {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str("<li>");
                spans_to_html(item, math, out);
                out.push_str("</li>\n");
            }
            out.push_str("</ul>\n");
        }
        Block::Table(table) => table_to_html(table, math, out),
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, math, out);
            out.push_str("</p>\n");
        }
    }
}

fn alignment_class(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "text-left",
        Alignment::Center => "text-center",
        Alignment::Right => "text-right",
    }
}

fn table_to_html(table: &Table, math: &dyn MathRenderer, out: &mut String) {
    out.push_str("<table>\n<thead>\n<tr>\n");
    for (col, cell) in table.header.iter().enumerate() {
        out.push_str(&format!("<th class=\"{}\"", alignment_class(table.columns[col])));
        // Two-column tables give the first column most of the width
        if col == 0 && table.header.len() == 2 {
            out.push_str(" style=\"width: 66%\"");
        }
        out.push('>');
        spans_to_html(cell, math, out);
        out.push_str("</th>\n");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for (index, row) in table.rows.iter().enumerate() {
        let shade = if index % 2 == 0 { "row-even" } else { "row-odd" };
        out.push_str(&format!("<tr class=\"{shade}\">\n"));
        for (col, cell) in row.iter().enumerate() {
            out.push_str(&format!("<td class=\"{}\">", alignment_class(table.columns[col])));
            spans_to_html(cell, math, out);
            out.push_str("</td>\n");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
}

fn spans_to_html(spans: &[Span], math: &dyn MathRenderer, out: &mut String) {
    for span in spans {
        span_to_html(span, math, out);
    }
}

fn span_to_html(span: &Span, math: &dyn MathRenderer, out: &mut String) {
    match span {
        Span::Text(text) => out.push_str(&encode_text(text)),
        Span::Bold(inner) => {
            out.push_str("<strong>");
            spans_to_html(inner, math, out);
            out.push_str("</strong>");
        }
        Span::InlineMath(source) => math_to_html(source, MathMode::Inline, math, out),
        Span::BlockMath(source) => math_to_html(source, MathMode::Display, math, out),
        Span::LineBreak => out.push_str("<br>"),
    }
}

/// A failed expression only affects its own span.
fn math_to_html(source: &str, mode: MathMode, math: &dyn MathRenderer, out: &mut String) {
    match math.render(source, mode) {
        Ok(html) => out.push_str(&html),
        Err(err) => {
            log::warn!("{err}");
            let delimiter = match mode {
                MathMode::Inline => "$",
                MathMode::Display => "$$",
            };
            out.push_str("<code>");
            out.push_str(&encode_text(&format!("{delimiter}{source}{delimiter}")));
            out.push_str("</code>");
        }
    }
}
