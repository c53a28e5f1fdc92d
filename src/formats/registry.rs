//! Format registry for tree serialization
//!
//! Each output format implements the `Formatter` trait and can be registered
//! with `FormatRegistry` under its name.

use std::collections::HashMap;
use std::fmt;

use super::block::{render_block, render_block_from, BlockOptions};
use super::json::{render_json, render_json_from, JsonOptions};
use crate::config::RenderConfig;
use crate::tree::{ConfigTree, NodeId};

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Trait for tree formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "block", "json")
    fn name(&self) -> &str;

    /// Serialize a whole tree
    fn serialize(&self, tree: &ConfigTree) -> Result<String, FormatError>;

    /// Serialize the subtree rooted at `id`, including the node itself
    fn serialize_node(&self, tree: &ConfigTree, id: NodeId) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Bracketed section layout
#[derive(Debug, Clone, Default)]
pub struct BlockFormatter {
    pub options: BlockOptions,
}

impl Formatter for BlockFormatter {
    fn name(&self) -> &str {
        "block"
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, FormatError> {
        Ok(render_block(tree, &self.options))
    }

    fn serialize_node(&self, tree: &ConfigTree, id: NodeId) -> Result<String, FormatError> {
        if id == NodeId::ROOT {
            return self.serialize(tree);
        }
        Ok(render_block_from(tree, id, 0, &self.options))
    }

    fn description(&self) -> &str {
        "Indented <section> blocks, one node per line"
    }
}

/// Declaration-ordered JSON
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub options: JsonOptions,
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, FormatError> {
        Ok(render_json(tree, &self.options))
    }

    fn serialize_node(&self, tree: &ConfigTree, id: NodeId) -> Result<String, FormatError> {
        Ok(render_json_from(tree, id, &self.options))
    }

    fn description(&self) -> &str {
        "JSON object per section, in declaration order"
    }
}

/// Registry of tree formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter of the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a tree using the specified format
    pub fn serialize(&self, tree: &ConfigTree, format: &str) -> Result<String, FormatError> {
        self.lookup(format)?.serialize(tree)
    }

    /// Serialize one subtree using the specified format
    pub fn serialize_node(
        &self,
        tree: &ConfigTree,
        id: NodeId,
        format: &str,
    ) -> Result<String, FormatError> {
        self.lookup(format)?.serialize_node(tree, id)
    }

    fn lookup(&self, format: &str) -> Result<&dyn Formatter, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BlockFormatter::default());
        registry.register(JsonFormatter::default());
        registry
    }

    /// Built-in formatters configured from the `[render]` settings
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut registry = Self::new();
        registry.register(BlockFormatter {
            options: config.block_options(),
        });
        registry.register(JsonFormatter {
            options: config.json_options(),
        });
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
