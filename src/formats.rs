//! Output formats for configuration trees
//!
//! - `block` - the bracketed section layout
//! - `json` - declaration-ordered JSON
//! - `registry` - name-based lookup of the available formats

pub mod block;
pub mod json;
pub mod registry;

pub use block::{render_block, render_block_from, BlockOptions};
pub use json::{render_json, render_json_from, to_json_value, JsonOptions};
pub use registry::{BlockFormatter, FormatError, FormatRegistry, Formatter, JsonFormatter};
