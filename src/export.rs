//! Copying a rendered plan to the clipboard as styled rich text.
//!
//! The styled HTML document goes first. If the clipboard rejects it, the raw
//! plan text is written instead. Each outcome maps to a [`CopyStatus`] that
//! the UI shows for a short while.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::Presentation;
use crate::clipboard::{Clipboard, ClipboardError};
use crate::config::{ExportConfig, StatusLabels};

/// Styles embedded in every exported document so word processors keep the
/// on-screen layout.
pub const STYLE_SHEET: &str = r#"body { font-family: 'Inter', sans-serif; color: #1f2937; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1rem; }
th, td { border: 1px solid #d1d5db; padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background-color: #f3f4f6; font-weight: 600; }
tr.row-odd { background-color: #f9fafb; }
.text-left { text-align: left; }
.text-center { text-align: center; }
.text-right { text-align: right; }
.font-bold { font-weight: 700; }
.uppercase { text-transform: uppercase; }
h1 { font-size: 1.25rem; font-weight: 700; text-align: center; margin-bottom: 1rem; text-transform: uppercase; color: #111827; }
h2 { font-size: 1.125rem; font-weight: 700; text-transform: uppercase; margin-top: 1.5rem; margin-bottom: 0.5rem; color: #4338ca; border-bottom: 1px solid #e0e7ff; padding-bottom: 0.25rem; }
h3 { font-size: 1rem; font-weight: 700; margin-top: 1rem; margin-bottom: 0.25rem; color: #111827; }
ul { list-style-type: disc; padding-left: 1.5rem; margin-bottom: 1rem; }
li { margin-bottom: 0.25rem; }
p { margin-bottom: 0.5rem; }
strong { font-weight: 700; }
.math-display { display: block; text-align: center; margin: 0.5rem 0; }
.math-error { color: #cc0000; }
"#;

/// Wrap a rendered fragment into a standalone HTML document.
pub fn styled_document(fragment: &str, config: &ExportConfig) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <link rel=\"stylesheet\" href=\"{}\">\n<style>\n{STYLE_SHEET}</style>\n</head>\n\
         <body>\n{fragment}</body>\n</html>\n",
        html_escape::encode_double_quoted_attribute(&config.math_stylesheet)
    )
}

/// Outcome of a copy, as shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CopyStatus {
    #[default]
    Idle,
    /// Styled HTML and plain text were written.
    Copied,
    /// Only the raw source text was written.
    CopiedAsText,
    Failed,
}

impl CopyStatus {
    pub fn label<'a>(&self, labels: &'a StatusLabels) -> &'a str {
        match self {
            CopyStatus::Idle => &labels.idle,
            CopyStatus::Copied => &labels.copied,
            CopyStatus::CopiedAsText => &labels.copied_text,
            CopyStatus::Failed => &labels.failed,
        }
    }
}

type Attempt<'a, C> = Box<dyn FnOnce(&mut C) -> Result<(), ClipboardError> + 'a>;

/// Copy the current document.
///
/// `source` is the raw plan text, written only when the styled copy fails.
/// Nothing is retried; the first attempt that succeeds decides the status.
pub fn copy_document<C: Clipboard + ?Sized>(
    clipboard: &mut C,
    presentation: &Presentation,
    source: &str,
    config: &ExportConfig,
) -> CopyStatus {
    let html = styled_document(&presentation.html, config);

    let attempts: [(CopyStatus, Attempt<'_, C>); 2] = [
        (
            CopyStatus::Copied,
            Box::new(|clipboard: &mut C| clipboard.write_rich(&html, &presentation.text)),
        ),
        (
            CopyStatus::CopiedAsText,
            Box::new(|clipboard: &mut C| clipboard.write_text(source)),
        ),
    ];

    for (status, attempt) in attempts {
        match attempt(&mut *clipboard) {
            Ok(()) => {
                log::debug!("copy finished: {status:?}");
                return status;
            }
            Err(err) => log::warn!("copy attempt {status:?} failed: {err}"),
        }
    }

    CopyStatus::Failed
}

/// Holds the last copy status and reverts it to [`CopyStatus::Idle`] once
/// the hold duration has elapsed. The CLI shows one copy; an editor keeps
/// one indicator per copy button.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    status: CopyStatus,
    shown_at: Option<Instant>,
    hold: Duration,
}

impl StatusIndicator {
    pub fn new(hold: Duration) -> Self {
        Self {
            status: CopyStatus::Idle,
            shown_at: None,
            hold,
        }
    }

    pub fn for_export(config: &ExportConfig) -> Self {
        Self::new(config.status_hold())
    }

    /// Copy the document and show the outcome from `now`.
    pub fn copy<C: Clipboard + ?Sized>(
        &mut self,
        clipboard: &mut C,
        presentation: &Presentation,
        source: &str,
        config: &ExportConfig,
        now: Instant,
    ) -> CopyStatus {
        let status = copy_document(clipboard, presentation, source, config);
        self.show(status, now);
        status
    }

    pub fn show(&mut self, status: CopyStatus, now: Instant) {
        self.status = status;
        self.shown_at = Some(now);
    }

    pub fn status_at(&self, now: Instant) -> CopyStatus {
        match self.shown_at {
            Some(shown) if now.duration_since(shown) < self.hold => self.status,
            _ => CopyStatus::Idle,
        }
    }

    pub fn label_at<'a>(&self, now: Instant, labels: &'a StatusLabels) -> &'a str {
        self.status_at(now).label(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SourceMath;
    use crate::parse;

    #[derive(Default)]
    struct FakeClipboard {
        rich_fails: bool,
        text_fails: bool,
        rich: Option<(String, String)>,
        text: Option<String>,
    }

    impl Clipboard for FakeClipboard {
        fn write_rich(&mut self, html: &str, text: &str) -> Result<(), ClipboardError> {
            if self.rich_fails {
                return Err(ClipboardError::PermissionDenied);
            }
            self.rich = Some((html.to_string(), text.to_string()));
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.text_fails {
                return Err(ClipboardError::Unavailable("no clipboard".to_string()));
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    const SOURCE: &str = "**KẾ HOẠCH BÀI DẠY**\n- $x$";

    fn presentation() -> Presentation {
        Presentation::render(&parse(SOURCE), &SourceMath)
    }

    #[test]
    fn styled_copy() {
        let mut clipboard = FakeClipboard::default();
        let status = copy_document(&mut clipboard, &presentation(), SOURCE, &ExportConfig::default());
        assert_eq!(status, CopyStatus::Copied);

        let (html, text) = clipboard.rich.unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("katex.min.css"));
        assert!(html.contains("<h1 class=\"text-center uppercase\">KẾ HOẠCH BÀI DẠY</h1>"));
        assert_eq!(text, "KẾ HOẠCH BÀI DẠY\n\n• x");
        assert!(clipboard.text.is_none());
    }

    #[test]
    fn falls_back_to_source_text() {
        let mut clipboard = FakeClipboard {
            rich_fails: true,
            ..Default::default()
        };
        let status = copy_document(&mut clipboard, &presentation(), SOURCE, &ExportConfig::default());
        assert_eq!(status, CopyStatus::CopiedAsText);
        assert_eq!(clipboard.text.as_deref(), Some(SOURCE));
    }

    #[test]
    fn total_failure() {
        let mut clipboard = FakeClipboard {
            rich_fails: true,
            text_fails: true,
            ..Default::default()
        };
        let status = copy_document(&mut clipboard, &presentation(), SOURCE, &ExportConfig::default());
        assert_eq!(status, CopyStatus::Failed);
    }

    #[test]
    fn labels_are_distinct() {
        let labels = StatusLabels::default();
        assert_eq!(CopyStatus::Idle.label(&labels), "Sao chép");
        assert_eq!(CopyStatus::Copied.label(&labels), "Đã sao chép!");
        assert_eq!(CopyStatus::CopiedAsText.label(&labels), "Đã sao chép (Text)!");
        assert_eq!(CopyStatus::Failed.label(&labels), "Lỗi!");
    }

    #[test]
    fn status_reverts_after_hold() {
        let labels = StatusLabels::default();
        let start = Instant::now();
        let mut indicator = StatusIndicator::new(Duration::from_millis(2000));
        assert_eq!(indicator.status_at(start), CopyStatus::Idle);

        indicator.show(CopyStatus::CopiedAsText, start);
        assert_eq!(
            indicator.status_at(start + Duration::from_millis(1999)),
            CopyStatus::CopiedAsText
        );
        assert_eq!(
            indicator.label_at(start + Duration::from_millis(2000), &labels),
            "Sao chép"
        );
    }

    #[test]
    fn indicator_shows_copy_outcome() {
        let config = ExportConfig {
            status_hold_ms: 500,
            ..ExportConfig::default()
        };
        let mut clipboard = FakeClipboard {
            rich_fails: true,
            text_fails: true,
            ..Default::default()
        };
        let start = Instant::now();
        let mut indicator = StatusIndicator::for_export(&config);

        let status = indicator.copy(&mut clipboard, &presentation(), SOURCE, &config, start);
        assert_eq!(status, CopyStatus::Failed);
        assert_eq!(indicator.label_at(start, &config.labels), "Lỗi!");
        assert_eq!(
            indicator.label_at(start + Duration::from_millis(499), &config.labels),
            "Lỗi!"
        );
        assert_eq!(
            indicator.label_at(start + Duration::from_millis(500), &config.labels),
            "Sao chép"
        );
    }

    #[test]
    fn stylesheet_url_is_escaped() {
        let config = ExportConfig {
            math_stylesheet: "a\"b".to_string(),
            ..ExportConfig::default()
        };
        assert!(styled_document("", &config).contains("href=\"a&quot;b\""));
    }
}
