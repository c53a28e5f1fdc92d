//! Arena-backed configuration tree

use std::fmt;
use std::ptr;

use super::node::{Declaration, Node, NodeId};
use super::value::AttrValue;
use crate::formats::block::{render_block, BlockOptions};
use crate::formats::json::{render_json, JsonOptions};
use crate::query::{self, PathExpr};

/// Name given to the implicit top-level node
pub const ROOT_NAME: &str = "root";

/// A parsed configuration: every node of one parse, owned by a single arena.
///
/// The tree is only mutated by the builder while parsing; once handed out it
/// is read-only.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    nodes: Vec<Node>,
}

impl ConfigTree {
    /// Create a tree holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(ROOT_NAME, Vec::new(), None)],
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Get a node by ID.
    ///
    /// Panics if `id` was issued by another tree and is out of range here.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Borrowed handle for navigating from `id`
    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest section nesting; a tree without sections has depth 0
    pub fn depth(&self) -> usize {
        // Parents are always allocated before their children.
        let mut depths = vec![0usize; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depths[index] = depths[parent.index()] + 1;
            }
        }
        depths.into_iter().max().unwrap_or(0)
    }

    /// Distance from the root to `id`
    pub fn node_depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    /// The value contributed by the `index`-th declaration of `id`.
    ///
    /// Repeated names share one widened slot; the n-th declaration of a name
    /// owns the n-th item of that slot.
    pub fn declared_value(&self, id: NodeId, index: usize) -> Option<&AttrValue> {
        let node = self.get(id)?;
        let entry = node.declarations.get(index)?;
        let name = self.declaration_name(entry);
        let occurrence = node.declarations[..index]
            .iter()
            .filter(|earlier| self.declaration_name(earlier) == name)
            .count();
        node.attributes.get(name)?.declaration(occurrence)
    }

    /// Attribute name a declaration was filed under
    pub fn declaration_name<'a>(&'a self, entry: &'a Declaration) -> &'a str {
        match entry {
            Declaration::Attribute(name) => name,
            Declaration::Child(child) => &self.node(*child).name,
        }
    }

    /// First node matching `path`, searched from the root
    pub fn find(&self, path: &str) -> Option<NodeRef<'_>> {
        self.root().find(path)
    }

    /// Every node matching `path`, searched from the root
    pub fn find_all(&self, path: &str) -> Vec<NodeRef<'_>> {
        self.root().find_all(path)
    }

    /// Block format with default options
    pub fn render_block(&self) -> String {
        render_block(self, &BlockOptions::default())
    }

    /// JSON with default options
    pub fn render_json(&self) -> String {
        render_json(self, &JsonOptions::default())
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, name: &str, values: Vec<String>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(name, values, Some(parent)));

        let owner = &mut self.nodes[parent.index()];
        owner.children.push(id);
        owner.declare(name, Declaration::Child(id), AttrValue::Node(id));
        id
    }

    pub(crate) fn set_attribute(&mut self, id: NodeId, name: &str, value: AttrValue) {
        self.nodes[id.index()].declare(name, Declaration::Attribute(name.to_string()), value);
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A node together with the tree it belongs to
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ConfigTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a ConfigTree {
        self.tree
    }

    pub fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn values(&self) -> &'a [String] {
        &self.node().values
    }

    pub fn attribute(&self, name: &str) -> Option<&'a AttrValue> {
        self.node().attributes.get(name)
    }

    pub fn declarations(&self) -> &'a [Declaration] {
        &self.node().declarations
    }

    pub fn declared_value(&self, index: usize) -> Option<&'a AttrValue> {
        self.tree.declared_value(self.id, index)
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// First direct child called `name`
    pub fn child(&self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|child| child.name() == name)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn depth(&self) -> usize {
        self.tree.node_depth(self.id)
    }

    /// First descendant matching `path`, relative to this node
    pub fn find(&self, path: &str) -> Option<NodeRef<'a>> {
        self.find_expr(&PathExpr::parse(path))
    }

    /// All descendants matching `path`, relative to this node
    pub fn find_all(&self, path: &str) -> Vec<NodeRef<'a>> {
        self.find_all_expr(&PathExpr::parse(path))
    }

    pub fn find_expr(&self, path: &PathExpr) -> Option<NodeRef<'a>> {
        query::find(self.tree, self.id, path).map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn find_all_expr(&self, path: &PathExpr) -> Vec<NodeRef<'a>> {
        query::find_all(self.tree, self.id, path)
            .into_iter()
            .map(|id| NodeRef {
                tree: self.tree,
                id,
            })
            .collect()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("values", &self.values())
            .finish()
    }
}
