//! Configuration tree data model
//!
//! - `node` - Node entity, arena IDs and declaration entries
//! - `value` - Tagged attribute values and collision widening
//! - `config_tree` - The arena owning all nodes of one parse, plus borrowed handles

pub mod config_tree;
pub mod node;
pub mod value;

pub use config_tree::{ConfigTree, NodeRef, ROOT_NAME};
pub use node::{Declaration, Node, NodeId};
pub use value::AttrValue;
