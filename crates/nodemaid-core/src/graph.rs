//! Node graph snapshot types.
//!
//! A [`NodeGraph`] is a read-only value copy of a node tree owned by the host
//! editor: its nodes (including frames and the group input/output
//! pseudo-nodes) and the directed links between their sockets. Iteration
//! order is whatever the host stored; nothing here sorts or deduplicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{color::NodeColor, identifier::Id};

const FRAME_TAG: &str = "NodeFrame";
const GROUP_INPUT_TAG: &str = "NodeGroupInput";
const GROUP_OUTPUT_TAG: &str = "NodeGroupOutput";

/// Type tag of a node.
///
/// Only the tags that change how a node is exported get their own variant;
/// every other tag is carried verbatim in [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Visual grouping container (`NodeFrame`).
    Frame,
    /// The enclosing graph's inputs (`NodeGroupInput`).
    GroupInput,
    /// The enclosing graph's outputs (`NodeGroupOutput`).
    GroupOutput,
    /// Any other node type, e.g. `GeometryNodeSetPosition`.
    Other(String),
}

impl NodeKind {
    /// Returns the host's type tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::Frame => FRAME_TAG,
            Self::GroupInput => GROUP_INPUT_TAG,
            Self::GroupOutput => GROUP_OUTPUT_TAG,
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            FRAME_TAG => Self::Frame,
            GROUP_INPUT_TAG => Self::GroupInput,
            GROUP_OUTPUT_TAG => Self::GroupOutput,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single node of a [`NodeGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name within the graph.
    name: Id,

    /// User-assigned label. Empty strings count as unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,

    /// Label the node type shows when the user has not set one.
    #[serde(alias = "bl_label")]
    default_label: String,

    #[serde(rename = "type", alias = "bl_idname")]
    kind: NodeKind,

    /// Name of the enclosing frame, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Id>,

    #[serde(default)]
    use_custom_color: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<NodeColor>,
}

impl Node {
    /// Creates a parentless node without label or custom color.
    pub fn new(name: &str, kind: impl Into<NodeKind>, default_label: &str) -> Self {
        Self {
            name: Id::new(name),
            label: None,
            default_label: default_label.to_string(),
            kind: kind.into(),
            parent: None,
            use_custom_color: false,
            color: None,
        }
    }

    /// Sets the user label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Places the node inside the frame named `parent`.
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(Id::new(parent));
        self
    }

    /// Enables the custom color and sets it.
    pub fn with_color(mut self, color: NodeColor) -> Self {
        self.use_custom_color = true;
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Returns the user label, ignoring empty labels.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// Returns the label shown in the editor: the user label, falling back
    /// to the type's default label.
    pub fn display_label(&self) -> &str {
        self.label().unwrap_or(&self.default_label)
    }

    /// Returns the custom color if the node has one enabled.
    pub fn custom_color(&self) -> Option<NodeColor> {
        self.color.filter(|_| self.use_custom_color)
    }

    pub fn is_frame(&self) -> bool {
        self.kind == NodeKind::Frame
    }
}

/// One end of a [`Link`]: a node and one of its sockets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketRef {
    pub node: Id,
    pub socket: String,
}

impl SocketRef {
    pub fn new(node: &str, socket: &str) -> Self {
        Self {
            node: Id::new(node),
            socket: socket.to_string(),
        }
    }
}

/// A directed connection from an output socket to an input socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: SocketRef,
    pub to: SocketRef,
}

impl Link {
    pub fn new(from: SocketRef, to: SocketRef) -> Self {
        Self { from, to }
    }
}

/// Snapshot of a node tree.
///
/// # Examples
///
/// ```
/// use nodemaid_core::graph::{Link, Node, NodeGraph, NodeKind, SocketRef};
///
/// let graph = NodeGraph::new("Geometry Nodes")
///     .with_node(Node::new("Group Input", NodeKind::GroupInput, "Group Input"))
///     .with_node(Node::new("Group Output", NodeKind::GroupOutput, "Group Output"))
///     .with_link(Link::new(
///         SocketRef::new("Group Input", "Geometry"),
///         SocketRef::new("Group Output", "Geometry"),
///     ));
///
/// assert_eq!(graph.nodes().len(), 2);
/// assert!(!graph.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGraph {
    #[serde(default)]
    name: String,

    #[serde(default)]
    nodes: Vec<Node>,

    #[serde(default)]
    links: Vec<Link>,
}

impl NodeGraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in host storage order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Links in host storage order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Iterates over the frame nodes in storage order.
    pub fn frames(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_frame())
    }

    /// Returns `true` if the graph has neither nodes nor links.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}
