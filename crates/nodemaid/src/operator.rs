//! The export operation invoked from the host's menu.
//!
//! [`ExportOperator::execute`] runs one export from start to finish:
//!
//! ```text
//! Idle -> validating selection -> serializing -> writing -> Idle
//!              | warning                           | error
//!              v                                   v
//!             Idle                                Idle
//! ```
//!
//! Every path ends in an [`ExportOutcome`], which the caller reports to the
//! user through [`ExportOutcome::report`]. Nothing is retried and no failure
//! escapes as a panic.

use std::{fmt, path::Path};

use log::{debug, info};

use nodemaid_core::{format::ExportFormat, graph::NodeGraph, scene::Scene};

use crate::{config::AppConfig, error::ExportError, export::Document, mermaid::MermaidWriter};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// A message shown to the user when an export ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

/// How an export ended.
#[derive(Debug)]
pub enum ExportOutcome {
    /// The file was written to `document`'s path.
    Finished(Document),
    /// The export stopped before or while writing.
    Cancelled(ExportError),
}

impl ExportOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// The message to show the user.
    pub fn report(&self) -> Report {
        match self {
            Self::Finished(document) => Report {
                level: ReportLevel::Info,
                message: format!("Successfully exported to {}", document.path().display()),
            },
            Self::Cancelled(err) => Report {
                level: err.level(),
                message: err.to_string(),
            },
        }
    }
}

impl From<Result<Document, ExportError>> for ExportOutcome {
    fn from(result: Result<Document, ExportError>) -> Self {
        match result {
            Ok(document) => Self::Finished(document),
            Err(err) => Self::Cancelled(err),
        }
    }
}

/// Exports the node graph of the active object's first node modifier.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use nodemaid::{config::AppConfig, operator::ExportOperator};
/// use nodemaid_core::{format::ExportFormat, scene::Scene};
///
/// let scene = Scene::new();
/// let operator = ExportOperator::new(AppConfig::default());
/// let outcome = operator.execute(&scene, Path::new("tree"), ExportFormat::Markdown);
///
/// let report = outcome.report();
/// println!("{}: {}", report.level, report.message);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ExportOperator {
    config: AppConfig,
}

impl ExportOperator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs one export of `scene` to `path` in `format`.
    ///
    /// The path receives the format's extension if it lacks it. HTML exports
    /// always produce the full page, whatever the requested path ends with.
    pub fn execute(&self, scene: &Scene, path: &Path, format: ExportFormat) -> ExportOutcome {
        info!(path:% = path.display(), format:% = format; "Exporting node graph");

        let result = self
            .select_graph(scene)
            .and_then(|graph| self.export_graph(graph, path, format));

        ExportOutcome::from(result)
    }

    /// Serializes `graph` and writes it, skipping scene validation.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Write`] if the file cannot be written.
    pub fn export_graph(
        &self,
        graph: &NodeGraph,
        path: &Path,
        format: ExportFormat,
    ) -> Result<Document, ExportError> {
        if graph.is_empty() {
            debug!(graph = graph.name(); "Graph is empty, exporting the header only");
        }

        let text = MermaidWriter::new(self.config.style()).write(graph, format);
        let document = Document::new(text, format, path, self.config.html());

        document.write().map_err(|source| ExportError::Write {
            path: document.path().to_path_buf(),
            source,
        })?;

        Ok(document)
    }

    /// Finds the graph to export.
    ///
    /// Only the first node modifier is considered; if it references no
    /// graph, later node modifiers are not consulted.
    fn select_graph<'s>(&self, scene: &'s Scene) -> Result<&'s NodeGraph, ExportError> {
        let object = scene
            .active()
            .filter(|object| !object.modifiers().is_empty())
            .ok_or(ExportError::NoActiveObject)?;

        let modifier = object
            .first_nodes_modifier()
            .ok_or(ExportError::NoNodesModifier)?;
        let graph = modifier.node_group().ok_or(ExportError::NoNodesModifier)?;

        debug!(
            object:% = object.name(),
            modifier = modifier.name(),
            graph = graph.name();
            "Selected node graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use nodemaid_core::{
        graph::{Link, Node, NodeKind, SocketRef},
        scene::{Modifier, ModifierKind, SceneObject},
    };

    use super::*;

    fn passthrough() -> NodeGraph {
        NodeGraph::new("Geometry Nodes")
            .with_node(Node::new("Group Input", NodeKind::GroupInput, "Group Input"))
            .with_node(Node::new("Group Output", NodeKind::GroupOutput, "Group Output"))
            .with_link(Link::new(
                SocketRef::new("Group Input", "Geometry"),
                SocketRef::new("Group Output", "Geometry"),
            ))
    }

    fn scene_with(modifiers: Vec<Modifier>) -> Scene {
        let object = modifiers
            .into_iter()
            .fold(SceneObject::new("Cube"), SceneObject::with_modifier);
        Scene::new().with_object(object).with_active("Cube")
    }

    #[test]
    fn test_no_active_object_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let scene = Scene::new().with_object(SceneObject::new("Cube"));

        let outcome = ExportOperator::default().execute(
            &scene,
            &dir.path().join("tree"),
            ExportFormat::Markdown,
        );

        assert!(matches!(outcome, ExportOutcome::Cancelled(ExportError::NoActiveObject)));
        assert_eq!(
            outcome.report(),
            Report {
                level: ReportLevel::Warning,
                message: "No active object or no modifiers found.".to_string(),
            }
        );
        assert!(!dir.path().join("tree.md").exists());
    }

    #[test]
    fn test_empty_modifier_stack_is_warning() {
        let outcome = ExportOperator::default().execute(
            &scene_with(Vec::new()),
            Path::new("unused"),
            ExportFormat::Markdown,
        );
        assert!(matches!(outcome, ExportOutcome::Cancelled(ExportError::NoActiveObject)));
    }

    #[test]
    fn test_no_nodes_modifier_is_warning() {
        let scene = scene_with(vec![Modifier::new(
            "Subdivision",
            ModifierKind::Other("SUBSURF".to_string()),
        )]);

        let outcome =
            ExportOperator::default().execute(&scene, Path::new("unused"), ExportFormat::Html);

        let report = outcome.report();
        assert_eq!(report.level, ReportLevel::Warning);
        assert_eq!(
            report.message,
            "No Geometry Nodes modifier found on the active object."
        );
    }

    #[test]
    fn test_first_nodes_modifier_without_graph_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_with(vec![
            Modifier::new("Empty", ModifierKind::Nodes),
            Modifier::nodes("Second", passthrough()),
        ]);

        let outcome = ExportOperator::default().execute(
            &scene,
            &dir.path().join("tree"),
            ExportFormat::Markdown,
        );

        assert!(matches!(outcome, ExportOutcome::Cancelled(ExportError::NoNodesModifier)));
        assert!(!dir.path().join("tree.md").exists());
    }

    #[test]
    fn test_markdown_export() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_with(vec![Modifier::nodes("GeometryNodes", passthrough())]);

        let outcome = ExportOperator::default().execute(
            &scene,
            &dir.path().join("tree"),
            ExportFormat::Markdown,
        );

        assert!(outcome.is_finished());
        let path = dir.path().join("tree.md");
        let report = outcome.report();
        assert_eq!(report.level, ReportLevel::Info);
        assert_eq!(
            report.message,
            format!("Successfully exported to {}", path.display())
        );
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "```mermaid\ngraph TD\n    node_0[Group Input]\n    node_1[Group Output]\n    node_0 --> |Geometry| node_1\n```"
        );
    }

    #[test]
    fn test_html_export_with_and_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_with(vec![Modifier::nodes("GeometryNodes", passthrough())]);
        let operator = ExportOperator::default();

        for requested in ["bare", "named.html"] {
            let outcome =
                operator.execute(&scene, &dir.path().join(requested), ExportFormat::Html);
            let ExportOutcome::Finished(document) = outcome else {
                panic!("export to {requested} did not finish");
            };

            assert_eq!(document.path().extension().unwrap(), "html");
            let written = fs::read_to_string(document.path()).unwrap();
            assert!(written.starts_with("<!DOCTYPE html>"));
            assert!(written.contains("node_0 --> |Geometry| node_1"));
            assert!(!written.contains("```"));
        }
    }

    #[test]
    fn test_write_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_with(vec![Modifier::nodes("GeometryNodes", passthrough())]);

        let outcome = ExportOperator::default().execute(
            &scene,
            &dir.path().join("missing").join("tree"),
            ExportFormat::Markdown,
        );

        let ExportOutcome::Cancelled(ExportError::Write { path, .. }) = &outcome else {
            panic!("expected write failure, got {outcome:?}");
        };
        assert_eq!(path, &dir.path().join("missing").join("tree.md"));

        let report = outcome.report();
        assert_eq!(report.level, ReportLevel::Error);
        assert!(report.message.starts_with("Failed to export: "));
    }
}
