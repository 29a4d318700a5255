//! CLI logic for the Nodemaid exporter.
//!
//! The binary plays the part of the host's menu action: it loads a scene
//! snapshot, runs the export operator once, and reports the outcome.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use nodemaid::{
    operator::{ExportOperator, ExportOutcome},
    scene::Scene,
};

/// Run the Nodemaid CLI application
///
/// This function loads the scene snapshot, exports the active object's node
/// graph and returns the path that was written.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Snapshot read or deserialization errors
/// - Cancelled exports (missing object or modifier, write failures)
pub fn run(args: &Args) -> Result<PathBuf, CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene snapshot"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config = app_config.with_format(format);
    }
    let format = app_config.export().format();
    debug!(format:% = format; "Resolved output format");

    // Read input file
    let source = fs::read_to_string(&args.input)?;
    let scene = load_scene(&source)?;

    let operator = ExportOperator::new(app_config);
    let outcome = operator.execute(&scene, Path::new(&args.output), format);
    let report = outcome.report();

    match outcome {
        ExportOutcome::Finished(document) => {
            info!(output_file:% = document.path().display(); "{}", report.message);
            Ok(document.path().to_path_buf())
        }
        ExportOutcome::Cancelled(err) => Err(err.into()),
    }
}

/// Deserialize a scene snapshot from JSON.
///
/// # Errors
///
/// Returns [`CliError::Scene`] carrying the source for error reporting.
pub fn load_scene(source: &str) -> Result<Scene, CliError> {
    serde_json::from_str(source).map_err(|err| CliError::new_scene_error(err, source))
}
