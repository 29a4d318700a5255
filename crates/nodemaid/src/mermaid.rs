//! Mermaid flowchart serialization of node graphs.
//!
//! [`MermaidWriter`] walks a [`NodeGraph`] once and transcribes what is
//! connected into a top-down Mermaid flowchart:
//!
//! ```text
//! graph TD
//!     subgraph <frame label>
//!         <frame>_<node>[<label>]
//!     end
//!     node_<index>[<label>]
//!     <id> --> <id>
//!     <id> --> |<socket>| <id>
//!     style <id> fill:#rrggbb,stroke:<stroke>
//! ```
//!
//! Nodes that take part in no link are left out, and so are frames without
//! a connected child. Top-level identifiers come from the node's index in the
//! graph, so they shift when nodes are added or removed.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};

use nodemaid_core::{
    format::ExportFormat,
    graph::{Link, Node, NodeGraph, NodeKind},
    identifier::Id,
};

use crate::config::StyleConfig;

const HEADER: &str = "graph TD";
const FENCE_OPEN: &str = "```mermaid";
const FENCE_CLOSE: &str = "```";
const INDENT: &str = "    ";
const NESTED_INDENT: &str = "        ";

/// A frame and its direct children, in storage order.
struct FrameGroup<'a> {
    frame: &'a Node,
    children: Vec<&'a Node>,
}

impl FrameGroup<'_> {
    /// Subgraph title: the frame's label, else its name.
    fn title(&self) -> String {
        self.frame
            .label()
            .map(str::to_string)
            .unwrap_or_else(|| self.frame.name().to_string())
    }

    /// Identifier of a child, unique across frames.
    fn child_id(&self, child: &Node) -> String {
        format!("{}_{}", self.frame.name(), child.name()).replace(' ', "_")
    }
}

/// Serializes node graphs into Mermaid flowchart text.
///
/// # Examples
///
/// ```
/// use nodemaid::{config::StyleConfig, mermaid::MermaidWriter};
/// use nodemaid_core::{
///     format::ExportFormat,
///     graph::{Link, Node, NodeGraph, NodeKind, SocketRef},
/// };
///
/// let graph = NodeGraph::new("Geometry Nodes")
///     .with_node(Node::new("Group Input", NodeKind::GroupInput, "Group Input"))
///     .with_node(Node::new("Group Output", NodeKind::GroupOutput, "Group Output"))
///     .with_link(Link::new(
///         SocketRef::new("Group Input", "Geometry"),
///         SocketRef::new("Group Output", "Geometry"),
///     ));
///
/// let style = StyleConfig::default();
/// let text = MermaidWriter::new(&style).write(&graph, ExportFormat::Html);
/// assert_eq!(
///     text,
///     "graph TD\n    node_0[Group Input]\n    node_1[Group Output]\n    node_0 --> |Geometry| node_1"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MermaidWriter<'a> {
    style: &'a StyleConfig,
}

impl<'a> MermaidWriter<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Serializes `graph` into Mermaid text.
    ///
    /// [`ExportFormat::Markdown`] wraps the diagram in a fenced `mermaid`
    /// code block; [`ExportFormat::Html`] returns the bare diagram body for
    /// embedding in a page. The graph is never modified, and the same graph
    /// always produces the same text.
    pub fn write(&self, graph: &NodeGraph, format: ExportFormat) -> String {
        let connected = connected_nodes(graph);
        let frames = frame_groups(graph);
        let mut ids: HashMap<Id, String> = HashMap::new();
        let mut lines: Vec<String> = Vec::new();

        if format == ExportFormat::Markdown {
            lines.push(FENCE_OPEN.to_string());
        }
        lines.push(HEADER.to_string());

        for group in frames.values() {
            if !group
                .children
                .iter()
                .any(|child| connected.contains(&child.name()))
            {
                trace!(frame:% = group.frame.name(); "Skipping frame without connected children");
                continue;
            }

            lines.push(format!("{INDENT}subgraph {}", group.title()));
            for child in group
                .children
                .iter()
                .filter(|child| connected.contains(&child.name()))
            {
                let id = group.child_id(child);
                lines.push(format!("{NESTED_INDENT}{id}[{}]", child.display_label()));
                ids.insert(child.name(), id);
            }
            lines.push(format!("{INDENT}end"));
        }

        for (index, node) in graph.nodes().iter().enumerate() {
            if node.parent().is_none() && connected.contains(&node.name()) {
                let id = format!("node_{index}");
                lines.push(format!("{INDENT}{id}[{}]", node.display_label()));
                ids.insert(node.name(), id);
            }
        }

        let kinds: HashMap<Id, &NodeKind> = graph
            .nodes()
            .iter()
            .map(|node| (node.name(), node.kind()))
            .collect();

        let mut edge_count = 0;
        for link in graph.links() {
            let (Some(from), Some(to)) = (ids.get(&link.from.node), ids.get(&link.to.node)) else {
                trace!(
                    from:% = link.from.node,
                    to:% = link.to.node;
                    "Dropping link with undeclared endpoint"
                );
                continue;
            };

            match edge_label(link, &kinds) {
                Some(label) => lines.push(format!("{INDENT}{from} --> |{label}| {to}")),
                None => lines.push(format!("{INDENT}{from} --> {to}")),
            }
            edge_count += 1;
        }

        for node in graph.nodes() {
            if !connected.contains(&node.name()) {
                continue;
            }
            let (Some(color), Some(id)) = (node.custom_color(), ids.get(&node.name())) else {
                continue;
            };
            lines.push(format!(
                "{INDENT}style {id} fill:{},stroke:{}",
                color.to_hex(),
                self.style.stroke_color()
            ));
        }

        if format == ExportFormat::Markdown {
            lines.push(FENCE_CLOSE.to_string());
        }

        debug!(
            graph = graph.name(),
            nodes = ids.len(),
            edges = edge_count,
            format:% = format;
            "Serialized node graph"
        );

        lines.join("\n")
    }
}

/// Names of every node that is an endpoint of at least one link.
fn connected_nodes(graph: &NodeGraph) -> HashSet<Id> {
    graph
        .links()
        .iter()
        .flat_map(|link| [link.from.node, link.to.node])
        .collect()
}

/// Groups every node parented to a frame under that frame.
///
/// Only direct children are collected; a frame inside a frame is a child of
/// the outer frame and gets its own group.
fn frame_groups(graph: &NodeGraph) -> IndexMap<Id, FrameGroup<'_>> {
    let mut groups: IndexMap<Id, FrameGroup<'_>> = graph
        .frames()
        .map(|frame| {
            (
                frame.name(),
                FrameGroup {
                    frame,
                    children: Vec::new(),
                },
            )
        })
        .collect();

    for node in graph.nodes() {
        if let Some(parent) = node.parent() {
            if let Some(group) = groups.get_mut(&parent) {
                group.children.push(node);
            }
        }
    }

    groups
}

/// Socket name shown on a link that touches the graph's interface.
///
/// Links leaving the group input are labelled with the source socket; links
/// entering the group output with the destination socket. The input side
/// wins when both apply.
fn edge_label<'l>(link: &'l Link, kinds: &HashMap<Id, &NodeKind>) -> Option<&'l str> {
    let is_kind = |name: &Id, kind: NodeKind| kinds.get(name).is_some_and(|k| **k == kind);

    let label = if is_kind(&link.from.node, NodeKind::GroupInput) {
        link.from.socket.as_str()
    } else if is_kind(&link.to.node, NodeKind::GroupOutput) {
        link.to.socket.as_str()
    } else {
        return None;
    };

    (!label.is_empty()).then_some(label)
}
