use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Span {
    Text(String),
    /// Children never contain another `Bold`.
    Bold(Vec<Span>),
    /// Raw TeX source without the `$` delimiters.
    InlineMath(String),
    /// Raw TeX source without the `$$` delimiters.
    BlockMath(String),
    LineBreak,
}

/// Column alignment taken from a table separator line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Classify one separator cell such as `:---:`.
    pub fn from_separator_cell(cell: &str) -> Self {
        if cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

/// A pipe table. Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Alignment>,
    pub header: Vec<Vec<Span>>,
    pub rows: Vec<Vec<Vec<Span>>>,
}

/// Block-level elements parsed from the plan text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Institution / department / author lines grouped together.
    HeaderMetadata {
        lines: Vec<Vec<Span>>,
    },
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    /// A whole-line bold label. Centered for the top-of-section fields,
    /// left aligned for lettered sub-labels.
    BoldLabel {
        centered: bool,
        content: Vec<Span>,
    },
    List {
        items: Vec<Vec<Span>>,
    },
    Table(Table),
    Paragraph {
        content: Vec<Span>,
    },
}

/// The parsed document, in input line order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
