use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::math::{MathMl, MathRenderer, SourceMath};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub markers: MarkersConfig,
    pub export: ExportConfig,
}

/// Literal markers of the lesson plan template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkersConfig {
    /// Whole trimmed line that becomes the top-level heading.
    pub title: String,
    /// Line prefixes grouped into the header metadata block.
    pub header_fields: Vec<String>,
    /// Line prefixes rendered as centered bold paragraphs.
    pub section_fields: Vec<String>,
    /// Regular expression for the appendix section heading.
    pub appendix: String,
    /// Info string of the fence that may wrap the header metadata lines.
    pub metadata_fence: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            title: "**KẾ HOẠCH BÀI DẠY**".to_string(),
            header_fields: vec![
                "**Trường:**".to_string(),
                "**Tổ:**".to_string(),
                "**Họ và tên giáo viên:**".to_string(),
            ],
            section_fields: vec![
                "**TÊN BÀI DẠY:".to_string(),
                "**Môn học:".to_string(),
                "**Thời gian thực hiện:".to_string(),
            ],
            appendix: r"^\*\*IV\.\s+PHỤ\s+LỤC\*\*$".to_string(),
            metadata_fence: "document_header".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// How math spans are typeset in the HTML.
    pub math: MathOutput,
    pub math_stylesheet: String,
    /// How long a copy status stays visible before reverting to idle.
    pub status_hold_ms: u64,
    pub labels: StatusLabels,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            math: MathOutput::default(),
            math_stylesheet: "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css"
                .to_string(),
            status_hold_ms: 2000,
            labels: StatusLabels::default(),
        }
    }
}

impl ExportConfig {
    pub fn status_hold(&self) -> Duration {
        Duration::from_millis(self.status_hold_ms)
    }

    pub fn math_renderer(&self) -> &'static dyn MathRenderer {
        match self.math {
            MathOutput::MathMl => &MathMl,
            MathOutput::Source => &SourceMath,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MathOutput {
    /// Presentation MathML, readable by word processors and browsers.
    #[default]
    MathMl,
    /// Escaped TeX source in `span.math`, for pages that typeset it later.
    Source,
}

/// User-facing text for each copy status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub idle: String,
    pub copied: String,
    pub copied_text: String,
    pub failed: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            idle: "Sao chép".to_string(),
            copied: "Đã sao chép!".to_string(),
            copied_text: "Đã sao chép (Text)!".to_string(),
            failed: "Lỗi!".to_string(),
        }
    }
}

impl Config {
    /// The bundled configuration. `build.rs` checks that it parses.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
