//! Configuration types for Nodemaid exports.
//!
//! This module provides configuration structures that control how diagrams
//! are styled and wrapped. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ExportConfig`] - Default output format.
//! - [`StyleConfig`] - Styling applied to custom-colored nodes.
//! - [`HtmlConfig`] - The standalone HTML page template.
//!
//! # Example
//!
//! ```
//! # use nodemaid::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.style().stroke_color(), "#333");
//! ```

use std::str::FromStr;

use color::DynamicColor;
use serde::Deserialize;
use thiserror::Error;

use nodemaid_core::format::ExportFormat;

const DEFAULT_STROKE_COLOR: &str = "#333";
const DEFAULT_TITLE: &str = "Mermaid Diagram";
const DEFAULT_LANG: &str = "en";
const DEFAULT_SCRIPT_SRC: &str = "https://unpkg.com/mermaid/dist/mermaid.min.js";

/// A configuration value that deserialized but is not usable.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid stroke color `{value}`: {reason}")]
    StrokeColor { value: String, reason: String },

    #[error("HTML script source must not be empty")]
    EmptyScriptSrc,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// HTML page configuration section.
    #[serde(default)]
    html: HtmlConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(export: ExportConfig, style: StyleConfig, html: HtmlConfig) -> Self {
        Self {
            export,
            style,
            html,
        }
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn html(&self) -> &HtmlConfig {
        &self.html
    }

    /// Returns a copy of this configuration with a different default format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.export.format = format;
        self
    }

    /// Checks values that serde alone cannot validate.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the stroke color is not a CSS color or
    /// the HTML script source is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.style.validate()?;
        self.html.validate()
    }
}

/// Export defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExportConfig {
    /// Format used when none is given on the command line.
    #[serde(default)]
    format: ExportFormat,
}

impl ExportConfig {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }
}

/// Styling applied to custom-colored nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Stroke color of `style` directives, as a CSS color string.
    stroke_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
        }
    }
}

impl StyleConfig {
    pub fn new(stroke_color: impl Into<String>) -> Self {
        Self {
            stroke_color: stroke_color.into(),
        }
    }

    /// Returns the stroke color exactly as configured.
    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    /// The stroke is spliced into a comma-separated `style` property list,
    /// so colors written with commas or spaces are rejected even when they
    /// are valid CSS.
    fn validate(&self) -> Result<(), ValidationError> {
        if self
            .stroke_color
            .contains(|c: char| c == ',' || c.is_whitespace())
        {
            return Err(ValidationError::StrokeColor {
                value: self.stroke_color.clone(),
                reason: "must not contain commas or whitespace".to_string(),
            });
        }

        DynamicColor::from_str(&self.stroke_color)
            .map(|_| ())
            .map_err(|err| ValidationError::StrokeColor {
                value: self.stroke_color.clone(),
                reason: err.to_string(),
            })
    }
}

/// Template settings for the standalone HTML page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Contents of the `<title>` element.
    title: String,

    /// Value of the `lang` attribute on `<html>`.
    lang: String,

    /// URL the diagram renderer script is loaded from.
    script_src: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            lang: DEFAULT_LANG.to_string(),
            script_src: DEFAULT_SCRIPT_SRC.to_string(),
        }
    }
}

impl HtmlConfig {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn script_src(&self) -> &str {
        &self.script_src
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.script_src.trim().is_empty() {
            return Err(ValidationError::EmptyScriptSrc);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.export().format(), ExportFormat::Markdown);
        assert_eq!(config.style().stroke_color(), "#333");
        assert_eq!(config.html().lang(), "en");
        assert_eq!(
            config.html().script_src(),
            "https://unpkg.com/mermaid/dist/mermaid.min.js"
        );
    }

    #[test]
    fn test_with_format_overrides_default() {
        let config = AppConfig::default().with_format(ExportFormat::Html);
        assert_eq!(config.export().format(), ExportFormat::Html);
    }

    #[test]
    fn test_invalid_stroke_color() {
        let config = AppConfig::new(
            ExportConfig::default(),
            StyleConfig::new("not-a-color"),
            HtmlConfig::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::StrokeColor { .. }));
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_named_stroke_color_is_valid() {
        assert!(StyleConfig::new("rebeccapurple").validate().is_ok());
        assert!(StyleConfig::new("#112233").validate().is_ok());
    }

    #[test]
    fn test_stroke_color_with_separators_is_rejected() {
        for value in ["rgb(10, 20, 30)", "rgb(10,20,30)", " #333", "#333\t"] {
            let config = AppConfig::new(
                ExportConfig::default(),
                StyleConfig::new(value),
                HtmlConfig::default(),
            );
            let err = config.validate().unwrap_err();
            assert!(
                matches!(&err, ValidationError::StrokeColor { value: v, .. } if v == value),
                "{value:?} was accepted"
            );
            assert!(err.to_string().contains("commas or whitespace"));
        }
    }
}
