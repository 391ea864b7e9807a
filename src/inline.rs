//! Inline span parsing for a single line or table cell.
//!
//! One alternation is scanned left to right. At each position the first
//! alternative that matches wins: block math, inline math, bold, line break.
//! Text between matches is plain text with stray `*` removed.

use std::sync::LazyLock;

use regex::{Match, Matches, Regex};

use crate::block::Span;

static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\$(?s:.*?)\$\$|\$[^$]+\$|\*\*.*?\*\*|<br\s*/?>").unwrap()
});

/// Lazily parse `text` into spans.
///
/// Each call starts from scratch, so parsing the same text twice yields the
/// same sequence.
pub fn spans(text: &str) -> Spans<'_> {
    Spans {
        text,
        matches: INLINE_RE.find_iter(text),
        cursor: 0,
        pending: None,
    }
}

/// Parse `text` into an owned span list.
pub fn parse_inline(text: &str) -> Vec<Span> {
    spans(text).collect()
}

/// Iterator returned by [`spans`].
pub struct Spans<'t> {
    text: &'t str,
    matches: Matches<'static, 't>,
    cursor: usize,
    pending: Option<Match<'t>>,
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if let Some(m) = self.pending.take() {
                return Some(delimited(m.as_str()));
            }

            match self.matches.next() {
                Some(m) => {
                    let gap = &self.text[self.cursor..m.start()];
                    self.cursor = m.end();
                    self.pending = Some(m);
                    if let Some(span) = plain(gap) {
                        return Some(span);
                    }
                }
                None => {
                    let rest = &self.text[self.cursor..];
                    self.cursor = self.text.len();
                    return plain(rest);
                }
            }
        }
    }
}

/// Build the span for one matched fragment, delimiters included.
fn delimited(fragment: &str) -> Span {
    if fragment.starts_with("$$") {
        Span::BlockMath(fragment[2..fragment.len() - 2].to_string())
    } else if fragment.starts_with('$') {
        Span::InlineMath(fragment[1..fragment.len() - 1].to_string())
    } else if fragment.starts_with("**") {
        Span::Bold(parse_inline(&fragment[2..fragment.len() - 2]))
    } else {
        Span::LineBreak
    }
}

fn plain(fragment: &str) -> Option<Span> {
    let text = fragment.replace('*', "");
    if text.is_empty() {
        None
    } else {
        Some(Span::Text(text))
    }
}

/// Concatenated visible text of `spans`, math as raw source.
pub fn plain_text(spans: &[Span]) -> String {
    let mut out = String::new();
    push_plain_text(spans, &mut out);
    out
}

pub(crate) fn push_plain_text(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(text),
            Span::Bold(inner) => push_plain_text(inner, out),
            Span::InlineMath(source) | Span::BlockMath(source) => out.push_str(source),
            Span::LineBreak => out.push('\n'),
        }
    }
}
