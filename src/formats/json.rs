//! JSON serialization
//!
//! Writes one JSON object per node, line by line, following declaration
//! order rather than map order:
//!
//! ```text
//! {
//!     "ServerRoot":"/usr/local/apache",
//!     "Directory":{
//!         "attributes": ["/"],
//!         "Options":"FollowSymLinks"
//!     },
//!     "Include":"extra.conf"
//! }
//! ```
//!
//! `"attributes": ` has a space after the colon while other keys do not. Array
//! items are separated by `", "` and only the last entry of a node goes
//! without a trailing comma.
//! Every declaration gets its own line, so a repeated name appears once per
//! declaration, each time with the full widened value.
//!
//! A node with bracket values but no declarations leaves a dangling comma
//! after its `"attributes"` line unless `guard_empty_declarations` is set.

use serde_json::{Map, Value};

use crate::tree::{AttrValue, ConfigTree, Declaration, NodeId};

/// Knobs for the JSON printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    /// Indentation unit, repeated once per nesting level
    pub indent: String,
    /// Drop the comma after `"attributes"` when nothing follows it
    pub guard_empty_declarations: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            guard_empty_declarations: false,
        }
    }
}

struct JsonPrinter<'a> {
    tree: &'a ConfigTree,
    options: &'a JsonOptions,
    output: String,
}

impl JsonPrinter<'_> {
    fn push_line(&mut self, level: usize, text: &str) {
        self.output.push_str(&self.options.indent.repeat(level));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn visit_body(&mut self, id: NodeId, level: usize) {
        let node = self.tree.node(id);
        let declarations = node.declarations();

        if !node.values().is_empty() {
            let values = Value::from(node.values().to_vec());
            let comma = if declarations.is_empty() && self.options.guard_empty_declarations {
                ""
            } else {
                ","
            };
            self.push_line(level, &format!("\"attributes\": {}{}", dumps(&values), comma));
        }

        let last = declarations.len().saturating_sub(1);
        for (index, entry) in declarations.iter().enumerate() {
            let comma = if index == last { "" } else { "," };
            match entry {
                Declaration::Attribute(name) => {
                    let value = node
                        .attribute(name)
                        .map(|value| attr_to_value(self.tree, value))
                        .unwrap_or(Value::Null);
                    self.push_line(level, &format!("{}:{}{}", quote(name), dumps(&value), comma));
                }
                Declaration::Child(child) => {
                    let name = self.tree.node(*child).name();
                    self.push_line(level, &format!("{}:{{", quote(name)));
                    self.visit_body(*child, level + 1);
                    self.push_line(level, &format!("}}{}", comma));
                }
            }
        }
    }
}

/// Serialize a whole tree to JSON text
pub fn render_json(tree: &ConfigTree, options: &JsonOptions) -> String {
    render_json_from(tree, NodeId::ROOT, options)
}

/// Serialize the subtree at `id` as a top-level object
pub fn render_json_from(tree: &ConfigTree, id: NodeId, options: &JsonOptions) -> String {
    let mut printer = JsonPrinter {
        tree,
        options,
        output: String::new(),
    };
    printer.push_line(0, "{");
    printer.visit_body(id, 1);
    printer.push_line(0, "}");
    printer.output
}

/// Build a `serde_json::Value` for the subtree at `id`.
///
/// Unlike the text printer, repeated names collapse into one key holding the
/// widened value, and keys come out in map order.
pub fn to_json_value(tree: &ConfigTree, id: NodeId) -> Value {
    let node = tree.node(id);
    let mut map = Map::new();
    if !node.values().is_empty() {
        map.insert("attributes".to_string(), Value::from(node.values().to_vec()));
    }
    for entry in node.declarations() {
        let name = tree.declaration_name(entry);
        if let Some(value) = node.attribute(name) {
            map.insert(name.to_string(), attr_to_value(tree, value));
        }
    }
    Value::Object(map)
}

fn attr_to_value(tree: &ConfigTree, value: &AttrValue) -> Value {
    match value {
        AttrValue::Scalar(s) => Value::from(s.as_str()),
        AttrValue::List(items) => Value::from(items.clone()),
        AttrValue::Node(id) => to_json_value(tree, *id),
        AttrValue::Many(items) => {
            Value::Array(items.iter().map(|item| attr_to_value(tree, item)).collect())
        }
    }
}

fn quote(text: &str) -> String {
    Value::from(text).to_string()
}

/// Single-line JSON with `", "` and `": "` separators
fn dumps(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(dumps).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), dumps(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        other => other.to_string(),
    }
}
