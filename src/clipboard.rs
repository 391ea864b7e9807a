use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard access denied")]
    PermissionDenied,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A system clipboard.
pub trait Clipboard {
    /// Write one copy carrying both an HTML and a plain-text alternative.
    fn write_rich(&mut self, html: &str, text: &str) -> Result<(), ClipboardError>;

    /// Write one copy carrying plain text only.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard stand-in that writes `clipboard.html` and `clipboard.txt` into a
/// directory, for headless use and scripting.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    dir: PathBuf,
}

impl FileClipboard {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn html_path(&self) -> PathBuf {
        self.dir.join("clipboard.html")
    }

    pub fn text_path(&self) -> PathBuf {
        self.dir.join("clipboard.txt")
    }

    fn ensure_dir(&self) -> Result<&Path, ClipboardError> {
        if self.dir.is_dir() {
            Ok(&self.dir)
        } else {
            Err(ClipboardError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )))
        }
    }
}

impl Clipboard for FileClipboard {
    fn write_rich(&mut self, html: &str, text: &str) -> Result<(), ClipboardError> {
        self.ensure_dir()?;
        fs::write(self.html_path(), html).map_err(io_error)?;
        fs::write(self.text_path(), text).map_err(io_error)?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ensure_dir()?;
        // A stale HTML alternative would no longer match the text
        let html = self.html_path();
        if html.is_file() {
            fs::remove_file(html).map_err(io_error)?;
        }
        fs::write(self.text_path(), text).map_err(io_error)?;
        Ok(())
    }
}

fn io_error(err: std::io::Error) -> ClipboardError {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        ClipboardError::PermissionDenied
    } else {
        ClipboardError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_write_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = FileClipboard::new(dir.path());
        clipboard.write_rich("<p>x</p>", "x").unwrap();
        assert_eq!(fs::read_to_string(clipboard.html_path()).unwrap(), "<p>x</p>");
        assert_eq!(fs::read_to_string(clipboard.text_path()).unwrap(), "x");
    }

    #[test]
    fn text_write_replaces_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = FileClipboard::new(dir.path());
        clipboard.write_rich("<p>old</p>", "old").unwrap();
        clipboard.write_text("new").unwrap();
        assert!(!clipboard.html_path().exists());
        assert_eq!(fs::read_to_string(clipboard.text_path()).unwrap(), "new");
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = FileClipboard::new(dir.path().join("missing"));
        assert!(matches!(
            clipboard.write_text("x"),
            Err(ClipboardError::Unavailable(_))
        ));
    }
}
