//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the crate's standard error types
//! and miette's rich diagnostic formatting. Scene snapshot errors point at
//! the offending line and column of the JSON source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceSpan};
use serde_json::error::Category;

use nodemaid::operator::ReportLevel;

use crate::error::CliError;

/// Adapter for a scene snapshot that failed to deserialize.
pub struct SceneAdapter<'a> {
    /// The wrapped JSON error
    err: &'a serde_json::Error,
    /// Snapshot source for displaying snippets
    src: &'a str,
}

impl<'a> SceneAdapter<'a> {
    /// Create a new scene adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Span of the character the JSON error points at.
    fn span(&self) -> SourceSpan {
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column());
        let len = self
            .src
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for SceneAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for SceneAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid scene snapshot")
    }
}

impl std::error::Error for SceneAdapter<'_> {}

impl MietteDiagnostic for SceneAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("nodemaid::scene"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err.classify() {
            Category::Data => {
                "a scene needs `active_object` and `objects`; nodes need `name`, `default_label` and `type`"
            }
            Category::Eof => "the snapshot ends early; check for a truncated file",
            Category::Syntax | Category::Io => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let message = self.err.to_string();
        let message = match message.rfind(" at line ") {
            Some(index) => message[..index].to_string(),
            None => message,
        };
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message), self.span()),
        )))
    }
}

/// Adapter for [`CliError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "nodemaid::io",
            CliError::Scene { .. } => "nodemaid::scene",
            CliError::Config(_) => "nodemaid::config",
            CliError::Export(_) => "nodemaid::export",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        match self.0.level() {
            ReportLevel::Info => Some(Severity::Advice),
            ReportLevel::Warning => Some(Severity::Warning),
            ReportLevel::Error => Some(Severity::Error),
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A scene snapshot error with source location information.
    Scene(SceneAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Scene(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Scene(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scene(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Scene(s) => s.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scene(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Scene(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Scene(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a 1-based JSON line and column into a byte offset into `src`.
///
/// Column 0 (reported for errors right after a newline) maps to the start of
/// the line. The result never exceeds `src.len()`.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Scene { err, src } => Reportable::Scene(SceneAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
