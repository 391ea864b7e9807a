use crate::block::Document;
use crate::parser::{Grammar, parse_with};

/// Text that arrives in chunks, with the document parsed from everything
/// received so far.
///
/// Every chunk triggers a full re-parse of the whole buffer, so the held
/// document never mixes two buffer versions.
#[derive(Debug, Clone, Default)]
pub struct LiveDocument {
    grammar: Grammar,
    buffer: String,
    document: Document,
}

impl LiveDocument {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            buffer: String::new(),
            document: Document::default(),
        }
    }

    /// Append a chunk and re-parse.
    pub fn push(&mut self, chunk: &str) -> &Document {
        self.buffer.push_str(chunk);
        self.reparse()
    }

    /// Replace the whole buffer and re-parse.
    pub fn replace(&mut self, text: &str) -> &Document {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.reparse()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn reparse(&mut self) -> &Document {
        self.document = parse_with(&self.buffer, &self.grammar);
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn chunks_match_whole_parse() {
        let text = "**KẾ HOẠCH BÀI DẠY**\n| A | B |\n|---|---|\n| 1 | 2 |\n- x\n- y\n";
        let chars: Vec<char> = text.chars().collect();
        let mut live = LiveDocument::default();
        for chunk in chars.chunks(7) {
            let chunk: String = chunk.iter().collect();
            live.push(&chunk);
        }
        assert_eq!(live.text(), text);
        assert_eq!(live.document(), &parse(text));
    }

    #[test]
    fn table_appears_once_separator_arrives() {
        let mut live = LiveDocument::default();
        live.push("| A | B |\n");
        assert!(matches!(live.document().blocks[0], Block::Paragraph { .. }));
        live.push("|---|");
        assert!(matches!(live.document().blocks[0], Block::Table(_)));
        assert_eq!(live.text(), "| A | B |\n|---|");

        let document = live.replace("- x");
        assert!(matches!(document.blocks[0], Block::List { .. }));
    }
}
