//! Output format selection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown [`ExportFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format `{0}`, expected `md` or `html`")]
pub struct UnknownFormatError(String);

/// Container the diagram is written into.
///
/// Deserializes through [`FromStr`], so configuration files accept the same
/// case-insensitive names as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ExportFormat {
    /// A Markdown file holding one fenced `mermaid` code block.
    #[default]
    #[serde(rename = "md")]
    Markdown,
    /// A standalone HTML page that renders the diagram in the browser.
    #[serde(rename = "html")]
    Html,
}

impl ExportFormat {
    /// File extension expected for this format, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            _ => Err(UnknownFormatError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = UnknownFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("md".parse(), Ok(ExportFormat::Markdown));
        assert_eq!("Markdown".parse(), Ok(ExportFormat::Markdown));
        assert_eq!("HTML".parse(), Ok(ExportFormat::Html));

        let err = "pdf".parse::<ExportFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown export format `pdf`, expected `md` or `html`"
        );
    }

    #[test]
    fn test_extension_and_display() {
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::Html.to_string(), "html");
        assert_eq!(ExportFormat::default(), ExportFormat::Markdown);
    }

    #[test]
    fn test_serde_names() {
        let format: ExportFormat = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(format, ExportFormat::Html);
        let format: ExportFormat = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(format, ExportFormat::Markdown);
        assert_eq!(serde_json::to_string(&ExportFormat::Markdown).unwrap(), "\"md\"");
    }

    #[test]
    fn test_serde_names_ignore_case() {
        let format: ExportFormat = serde_json::from_str("\"HTML\"").unwrap();
        assert_eq!(format, ExportFormat::Html);
        let format: ExportFormat = serde_json::from_str("\"Md\"").unwrap();
        assert_eq!(format, ExportFormat::Markdown);

        let err = serde_json::from_str::<ExportFormat>("\"pdf\"").unwrap_err();
        assert!(err.to_string().contains("unknown export format `pdf`"));
    }
}
