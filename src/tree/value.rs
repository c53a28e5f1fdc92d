//! Attribute values stored in a node's named slots
//!
//! A key-value line yields either a `Scalar` (exactly one token) or a `List`
//! (any other token count). A child section occupies its name's slot as a
//! `Node`. When a second declaration lands on an occupied name, the slot is
//! widened into `Many`, which keeps every declaration in order.

use super::node::NodeId;

/// Value held under an attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A single token, with one layer of surrounding double quotes removed
    Scalar(String),
    /// Tokens of a key-value line that did not carry exactly one value
    List(Vec<String>),
    /// A child section declared under this name
    Node(NodeId),
    /// Every declaration made under a repeated name, in declaration order
    Many(Vec<AttrValue>),
}

impl AttrValue {
    /// Build the value of a key-value line from its value tokens.
    ///
    /// Exactly one token unwraps to a scalar; quotes are only removed when the
    /// token both starts and ends with `"`. Multi-token values are kept verbatim.
    pub fn from_tokens(mut tokens: Vec<String>) -> Self {
        if tokens.len() == 1 {
            let token = tokens.pop().unwrap_or_default();
            AttrValue::Scalar(strip_quotes(&token).to_string())
        } else {
            AttrValue::List(tokens)
        }
    }

    /// Merge a new declaration into this slot
    pub fn widen(self, new: AttrValue) -> AttrValue {
        match self {
            AttrValue::Many(mut items) => {
                items.push(new);
                AttrValue::Many(items)
            }
            old => AttrValue::Many(vec![old, new]),
        }
    }

    /// Number of declarations folded into this value
    pub fn declaration_count(&self) -> usize {
        match self {
            AttrValue::Many(items) => items.len(),
            _ => 1,
        }
    }

    /// The value contributed by the `index`-th declaration under this name
    pub fn declaration(&self, index: usize) -> Option<&AttrValue> {
        match self {
            AttrValue::Many(items) => items.get(index),
            single if index == 0 => Some(single),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            AttrValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            AttrValue::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_widened(&self) -> bool {
        matches!(self, AttrValue::Many(_))
    }

    /// Tokens as they would appear on a key-value line
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            AttrValue::Scalar(s) => vec![s.as_str()],
            AttrValue::List(items) => items.iter().map(|s| s.as_str()).collect(),
            AttrValue::Node(_) => Vec::new(),
            AttrValue::Many(items) => items.iter().flat_map(|item| item.tokens()).collect(),
        }
    }
}

/// Remove one layer of surrounding double quotes, if both are present
fn strip_quotes(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}
