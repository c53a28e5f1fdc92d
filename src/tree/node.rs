//! Node entity of the configuration tree
//!
//! Nodes live in the arena owned by [`ConfigTree`](super::ConfigTree) and refer
//! to each other by [`NodeId`]. The parent link is only an index, so ownership
//! stays strictly top-down.

use std::collections::HashMap;
use std::fmt;

use super::value::AttrValue;

/// Index of a node inside its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node always occupies the first arena slot
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of a node's declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A key-value line, by attribute name
    Attribute(String),
    /// A nested section
    Child(NodeId),
}

/// A section (or the root) of a parsed configuration
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
    pub(crate) declarations: Vec<Declaration>,
    pub(crate) attributes: HashMap<String, AttrValue>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, values: Vec<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            values,
            declarations: Vec::new(),
            attributes: HashMap::new(),
            children: Vec::new(),
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bracket arguments of the section tag
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Attributes and children in the order they were written
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Named slot lookup; repeated names come back widened
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &HashMap<String, AttrValue> {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Record a declaration under `name`, widening the slot on collision
    pub(crate) fn declare(&mut self, name: &str, entry: Declaration, value: AttrValue) {
        self.declarations.push(entry);
        match self.attributes.remove(name) {
            Some(existing) => {
                self.attributes.insert(name.to_string(), existing.widen(value));
            }
            None => {
                self.attributes.insert(name.to_string(), value);
            }
        }
    }
}
