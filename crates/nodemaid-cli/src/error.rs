//! Error type for the Nodemaid CLI.

use std::io;

use thiserror::Error;

use nodemaid::{ExportError, operator::ReportLevel};

use crate::config::ConfigError;

/// Everything that can stop the CLI from exporting.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scene snapshot is not valid JSON or does not match the schema.
    #[error("Invalid scene snapshot: {err}")]
    Scene {
        err: serde_json::Error,
        src: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    /// Create a new `Scene` error with the associated snapshot source.
    pub fn new_scene_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Scene {
            err,
            src: src.into(),
        }
    }

    /// Level the error is reported at.
    ///
    /// Only cancelled exports with unmet preconditions are warnings.
    pub fn level(&self) -> ReportLevel {
        match self {
            Self::Export(err) => err.level(),
            _ => ReportLevel::Error,
        }
    }
}
