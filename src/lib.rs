mod block;
pub mod clipboard;
mod config;
mod error;
pub mod export;
mod html;
pub mod inline;
pub mod math;
mod metadata;
mod parser;
mod plain;
pub mod stream;
pub mod table;

pub use block::{Alignment, Block, Document, Span, Table};
pub use config::{Config, ExportConfig, MarkersConfig, MathOutput, StatusLabels};
pub use error::{Error, Result};
pub use parser::{Grammar, classify, parse_with};

use math::MathRenderer;

/// Parse plan text into a document using the default markers.
pub fn parse(text: &str) -> Document {
    parser::parse(text)
}

/// A document as displayed: the HTML fragment and its visible text.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub html: String,
    pub text: String,
}

impl Presentation {
    pub fn render(document: &Document, math: &dyn MathRenderer) -> Self {
        Self {
            html: html::document_to_html(document, math),
            text: plain::document_to_text(document),
        }
    }
}

/// Convert plan text to a standalone styled HTML document.
pub fn text_to_html(text: &str, config: &Config) -> Result<String> {
    let grammar = Grammar::from_markers(&config.markers)?;
    let document = parse_with(text, &grammar);
    let presentation = Presentation::render(&document, config.export.math_renderer());
    Ok(export::styled_document(&presentation.html, &config.export))
}

/// Convert plan text to its plain-text rendering.
pub fn text_to_plain(text: &str, config: &Config) -> Result<String> {
    let grammar = Grammar::from_markers(&config.markers)?;
    Ok(plain::document_to_text(&parse_with(text, &grammar)))
}
