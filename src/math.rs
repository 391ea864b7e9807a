//! Math rendering for `$...$` and `$$...$$` spans.

use html_escape::encode_text;
use latex2mathml::{DisplayStyle, latex_to_mathml};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Display,
}

#[derive(Debug, Error)]
#[error("cannot render math `{source_text}`: {reason}")]
pub struct MathError {
    pub source_text: String,
    pub reason: String,
}

/// Turns TeX source into an HTML fragment.
///
/// Renderers should degrade malformed input into some markup of their own.
/// An `Err` makes the caller emit the literal delimited source instead.
pub trait MathRenderer {
    fn render(&self, source: &str, mode: MathMode) -> Result<String, MathError>;
}

/// Typesets TeX as presentation MathML. Sources the converter cannot parse
/// (unknown environments, missing closing braces) come back as `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathMl;

impl MathRenderer for MathMl {
    fn render(&self, source: &str, mode: MathMode) -> Result<String, MathError> {
        let style = match mode {
            MathMode::Inline => DisplayStyle::Inline,
            MathMode::Display => DisplayStyle::Block,
        };
        latex_to_mathml(source, style).map_err(|err| MathError {
            source_text: source.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Emits the escaped TeX source in a `span.math`, leaving typesetting to
/// whatever reads the HTML. Never fails; sources with unbalanced braces are
/// still emitted, marked with `math-error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceMath;

impl MathRenderer for SourceMath {
    fn render(&self, source: &str, mode: MathMode) -> Result<String, MathError> {
        let mut class = String::from("math");
        if mode == MathMode::Display {
            class.push_str(" math-display");
        }
        if !braces_balanced(source) {
            class.push_str(" math-error");
        }
        Ok(format!(
            "<span class=\"{class}\">{}</span>",
            encode_text(source)
        ))
    }
}

fn braces_balanced(source: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                // `\{` and `\}` are literal braces
                chars.next();
            }
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_source() {
        assert_eq!(
            SourceMath.render("x^2 < y", MathMode::Inline).unwrap(),
            "<span class=\"math\">x^2 &lt; y</span>"
        );
    }

    #[test]
    fn display_source() {
        assert_eq!(
            SourceMath.render("\\frac{a}{b}", MathMode::Display).unwrap(),
            "<span class=\"math math-display\">\\frac{a}{b}</span>"
        );
    }

    #[test]
    fn mathml_inline_and_display() {
        let inline = MathMl.render("\\frac{a}{b}", MathMode::Inline).unwrap();
        assert!(inline.starts_with("<math"));
        assert!(inline.contains("display=\"inline\""));
        assert!(inline.contains("<mfrac>"));

        let display = MathMl.render("x^2", MathMode::Display).unwrap();
        assert!(display.contains("display=\"block\""));
        assert!(display.contains("<msup>"));
    }

    #[test]
    fn mathml_rejects_unknown_environment() {
        let err = MathMl
            .render("\\begin{foo}x\\end{foo}", MathMode::Inline)
            .unwrap_err();
        assert_eq!(err.source_text, "\\begin{foo}x\\end{foo}");
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn malformed_source_still_renders() {
        let html = SourceMath.render("\\frac{a", MathMode::Inline).unwrap();
        assert_eq!(html, "<span class=\"math math-error\">\\frac{a</span>");
        assert!(SourceMath.render("a}", MathMode::Inline).unwrap().contains("math-error"));
        assert!(!SourceMath.render("\\{a", MathMode::Inline).unwrap().contains("math-error"));
    }
}
