//! Path queries over a configuration tree
//!
//! A path is a `/`-separated list of node names, matched one level at a time
//! against children. Leading and trailing slashes are ignored, and an empty
//! path (`""` or `"/"`) selects the starting node itself.
//!
//! ```text
//! IfModule/IfModule     nested IfModule sections
//! /Directory/           same as Directory
//! ```
//!
//! Segments are borrowed as slices during the search, so a parsed
//! [`PathExpr`] can be reused for any number of queries.

use crate::tree::{ConfigTree, NodeId};

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<String>,
}

impl PathExpr {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').map(|s| s.to_string()).collect()
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this path selects the starting node
    pub fn is_self(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for PathExpr {
    fn from(path: &str) -> Self {
        PathExpr::parse(path)
    }
}

/// First match of `path` below `from`, depth-first and leftmost-first
pub fn find(tree: &ConfigTree, from: NodeId, path: &PathExpr) -> Option<NodeId> {
    find_segments(tree, from, &path.segments)
}

/// Every match of `path` below `from`, in document order
pub fn find_all(tree: &ConfigTree, from: NodeId, path: &PathExpr) -> Vec<NodeId> {
    let mut found = Vec::new();
    collect_segments(tree, from, &path.segments, &mut found);
    found
}

fn find_segments(tree: &ConfigTree, node: NodeId, segments: &[String]) -> Option<NodeId> {
    let Some((next, rest)) = segments.split_first() else {
        return Some(node);
    };

    tree.node(node)
        .children()
        .iter()
        .filter(|&&child| tree.node(child).name() == next)
        .find_map(|&child| find_segments(tree, child, rest))
}

fn collect_segments(tree: &ConfigTree, node: NodeId, segments: &[String], found: &mut Vec<NodeId>) {
    let Some((next, rest)) = segments.split_first() else {
        found.push(node);
        return;
    };

    for &child in tree.node(node).children() {
        if tree.node(child).name() == next {
            collect_segments(tree, child, rest, found);
        }
    }
}
