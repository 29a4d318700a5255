//! Error types for Nodemaid exports.
//!
//! This module provides [`ExportError`], the reason an export operation was
//! cancelled. Precondition failures are reported to the user as warnings,
//! write failures as errors.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::operator::ReportLevel;

/// Why an export operation did not finish.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing is selected, or the selection has an empty modifier stack.
    #[error("No active object or no modifiers found.")]
    NoActiveObject,

    /// The active object has no node modifier, or its first node modifier
    /// references no graph.
    #[error("No Geometry Nodes modifier found on the active object.")]
    NoNodesModifier,

    /// Writing the output file failed.
    #[error("Failed to export: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Level the failure is reported at.
    pub fn level(&self) -> ReportLevel {
        match self {
            Self::NoActiveObject | Self::NoNodesModifier => ReportLevel::Warning,
            Self::Write { .. } => ReportLevel::Error,
        }
    }
}
