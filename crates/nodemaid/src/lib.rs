//! Nodemaid - export geometry node graphs as Mermaid flowcharts.
//!
//! The exporter works on read-only snapshots of a host editor's node graph
//! and writes them out as a Markdown file with a fenced `mermaid` block or as
//! a standalone HTML page that renders the diagram in the browser.
//!
//! - [`mermaid`] transcribes a [`graph::NodeGraph`] into flowchart text.
//! - [`export`] wraps that text in its output container and writes it.
//! - [`operator`] runs one export against a [`scene::Scene`], the way the
//!   host's menu action does.

pub mod config;
pub mod export;
pub mod mermaid;
pub mod operator;

mod error;

pub use nodemaid_core::{color, format, graph, identifier, scene};

pub use error::ExportError;

use config::StyleConfig;
use format::ExportFormat;
use graph::NodeGraph;
use mermaid::MermaidWriter;

/// Serializes `graph` with the default style.
///
/// Shorthand for [`MermaidWriter::write`] with [`StyleConfig::default`].
///
/// # Examples
///
/// ```
/// use nodemaid::{format::ExportFormat, graph::NodeGraph};
///
/// let text = nodemaid::node_tree_to_mermaid(&NodeGraph::new("empty"), ExportFormat::Markdown);
/// assert_eq!(text, "```mermaid\ngraph TD\n```");
/// ```
pub fn node_tree_to_mermaid(graph: &NodeGraph, format: ExportFormat) -> String {
    MermaidWriter::new(&StyleConfig::default()).write(graph, format)
}
