use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, Document, Span};
use crate::config::MarkersConfig;
use crate::error::{Error, Result};
use crate::inline::parse_inline;
use crate::{metadata, table};

static SECTION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([IVX]+\.\s.+)\*\*$").unwrap());
static SUBSECTION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([0-9]+\..+)\*\*$").unwrap());
static SUB_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[a-z]\).+\*\*$").unwrap());

static DEFAULT_GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::from_markers(&MarkersConfig::default()).expect("default markers compile")
});

/// Template markers compiled for matching.
#[derive(Debug, Clone)]
pub struct Grammar {
    title: String,
    header_fields: Vec<String>,
    section_fields: Vec<String>,
    appendix: Regex,
    metadata_fence: String,
}

impl Grammar {
    /// Compile the markers. Empty markers are rejected: an empty prefix would
    /// match every line.
    pub fn from_markers(markers: &MarkersConfig) -> Result<Self> {
        if markers.title.trim().is_empty() {
            return Err(Error::EmptyMarker("title"));
        }
        if markers.header_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::EmptyMarker("header_fields"));
        }
        if markers.section_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::EmptyMarker("section_fields"));
        }
        if markers.metadata_fence.trim().is_empty() {
            return Err(Error::EmptyMarker("metadata_fence"));
        }

        Ok(Self {
            title: markers.title.clone(),
            header_fields: markers.header_fields.clone(),
            section_fields: markers.section_fields.clone(),
            appendix: Regex::new(&markers.appendix)?,
            metadata_fence: markers.metadata_fence.clone(),
        })
    }

    pub(crate) fn is_header_field(&self, trimmed: &str) -> bool {
        self.header_fields
            .iter()
            .any(|prefix| trimmed.starts_with(prefix.as_str()))
    }

    pub(crate) fn metadata_fence(&self) -> &str {
        &self.metadata_fence
    }
}

impl Default for Grammar {
    fn default() -> Self {
        DEFAULT_GRAMMAR.clone()
    }
}

/// A line classifier. On a match it returns the block and how many lines it
/// consumed, always at least one.
type Classifier = fn(&Grammar, &[&str], usize) -> Option<(Block, usize)>;

/// Tried in order at every non-blank line; the first match wins.
const CLASSIFIERS: &[(&str, Classifier)] = &[
    ("metadata fence", metadata::fenced_block),
    ("header metadata", metadata::header_block),
    ("table", pipe_table),
    ("title", title),
    ("section field", section_field),
    ("section heading", section_heading),
    ("subsection heading", subsection_heading),
    ("sub-label", sub_label),
    ("list", list),
];

/// Parse plan text using the default template markers.
pub fn parse(text: &str) -> Document {
    parse_with(text, &Grammar::default())
}

/// Parse plan text into a document.
///
/// Total over any input: unrecognised lines become paragraphs, so a buffer
/// cut off mid-stream still parses.
pub fn parse_with(text: &str, grammar: &Grammar) -> Document {
    // U+FEFF is not whitespace, so a leading BOM would hide the first marker
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match classify(grammar, &lines, i) {
            Some((block, consumed)) => {
                blocks.push(block);
                i += consumed;
            }
            None => i += 1,
        }
    }

    log::debug!("parsed {} lines into {} blocks", lines.len(), blocks.len());
    Document { blocks }
}

/// Classify the line at `lines[i]`, returning the block and the number of
/// lines it spans. Blank lines and indices past the end yield `None`.
pub fn classify(grammar: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let line = lines.get(i)?;
    if line.trim().is_empty() {
        return None;
    }
    for (name, classifier) in CLASSIFIERS {
        if let Some((block, consumed)) = classifier(grammar, lines, i) {
            log::trace!("line {}: {} spanning {} lines", i + 1, name, consumed);
            return Some((block, consumed.max(1)));
        }
    }
    Some((paragraph(line), 1))
}

fn pipe_table(_: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    table::table_block(lines, i)
}

fn title(grammar: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let line = lines[i].trim();
    (line == grammar.title).then(|| (heading(1, line), 1))
}

fn section_field(grammar: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let line = lines[i].trim();
    grammar
        .section_fields
        .iter()
        .any(|prefix| line.starts_with(prefix.as_str()))
        .then(|| {
            let block = Block::BoldLabel {
                centered: true,
                content: parse_inline(lines[i]),
            };
            (block, 1)
        })
}

fn section_heading(grammar: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let line = lines[i].trim();
    (SECTION_HEADING_RE.is_match(line) || grammar.appendix.is_match(line))
        .then(|| (heading(2, line), 1))
}

fn subsection_heading(_: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let line = lines[i].trim();
    SUBSECTION_HEADING_RE
        .is_match(line)
        .then(|| (heading(3, line), 1))
}

fn sub_label(_: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let line = lines[i].trim();
    SUB_LABEL_RE.is_match(line).then(|| {
        let block = Block::BoldLabel {
            centered: false,
            content: parse_inline(line),
        };
        (block, 1)
    })
}

fn list(_: &Grammar, lines: &[&str], i: usize) -> Option<(Block, usize)> {
    let items: Vec<Vec<Span>> = lines[i..]
        .iter()
        .map(|line| line.trim())
        .take_while(|line| is_bullet(line))
        .map(|line| parse_inline(&line[2..]))
        .collect();

    if items.is_empty() {
        None
    } else {
        let consumed = items.len();
        Some((Block::List { items }, consumed))
    }
}

fn is_bullet(trimmed: &str) -> bool {
    trimmed.starts_with("- ") || trimmed.starts_with("* ")
}

/// Headings drop every `**` pair before inline parsing.
fn heading(level: u8, trimmed: &str) -> Block {
    Block::Heading {
        level,
        content: parse_inline(&trimmed.replace("**", "")),
    }
}

fn paragraph(line: &str) -> Block {
    Block::Paragraph {
        content: parse_inline(line),
    }
}
