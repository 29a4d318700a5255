//! Scene snapshot types.
//!
//! The exporter never talks to the host editor directly. Instead the host
//! (or a script running inside it) dumps the selection state into a
//! [`Scene`]: which object is active, and for every object its modifier
//! stack with the node graph each generative modifier references.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{graph::NodeGraph, identifier::Id};

const NODES_TAG: &str = "NODES";

/// Type tag of a modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModifierKind {
    /// A generative node modifier (`NODES`).
    Nodes,
    /// Any other modifier type, e.g. `SUBSURF`.
    Other(String),
}

impl From<String> for ModifierKind {
    fn from(tag: String) -> Self {
        if tag == NODES_TAG {
            Self::Nodes
        } else {
            Self::Other(tag)
        }
    }
}

impl From<ModifierKind> for String {
    fn from(kind: ModifierKind) -> Self {
        match kind {
            ModifierKind::Nodes => NODES_TAG.to_string(),
            ModifierKind::Other(tag) => tag,
        }
    }
}

/// An entry of an object's modifier stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    name: String,

    #[serde(rename = "type")]
    kind: ModifierKind,

    /// Node graph referenced by a node modifier. `None` when no group is
    /// assigned or the modifier is of another kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_group: Option<NodeGraph>,
}

impl Modifier {
    pub fn new(name: &str, kind: ModifierKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            node_group: None,
        }
    }

    /// Creates a node modifier referencing `graph`.
    pub fn nodes(name: &str, graph: NodeGraph) -> Self {
        Self {
            node_group: Some(graph),
            ..Self::new(name, ModifierKind::Nodes)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ModifierKind {
        &self.kind
    }

    pub fn node_group(&self) -> Option<&NodeGraph> {
        self.node_group.as_ref()
    }

    pub fn is_nodes(&self) -> bool {
        self.kind == ModifierKind::Nodes
    }
}

/// An object in the scene together with its modifier stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    name: Id,

    #[serde(default)]
    modifiers: Vec<Modifier>,
}

impl SceneObject {
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Modifiers in stack order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Returns the first node modifier in stack order.
    pub fn first_nodes_modifier(&self) -> Option<&Modifier> {
        self.modifiers.iter().find(|modifier| modifier.is_nodes())
    }
}

/// Snapshot of the host's selection state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_object: Option<Id>,

    #[serde(default)]
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Marks the object named `name` as active.
    pub fn with_active(mut self, name: &str) -> Self {
        self.active_object = Some(Id::new(name));
        self
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Resolves the active object.
    ///
    /// Returns `None` if nothing is active or the active name does not match
    /// any object in the snapshot.
    pub fn active(&self) -> Option<&SceneObject> {
        let name = self.active_object?;
        let object = self.objects.iter().find(|object| object.name == name);
        trace!(name:% = name, found = object.is_some(); "Resolved active object");
        object
    }
}
