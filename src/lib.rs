//! # blockconf
//!
//! A parser for Apache-httpd-style block configuration files.
//!
//! Sources are read line by line: `<section values...>` opens a section,
//! `</section>` closes it, `# ...` lines are comments and every other line is a
//! `key values...` attribute of the section currently open. The result is a
//! [`ConfigTree`] that can be queried by slash-separated paths and written back
//! out as blocks or as JSON.
//!
//! ```text
//! ServerRoot "/usr/local/apache"
//! <Directory />
//!     Options FollowSymLinks
//!     Deny from all
//! </Directory>
//! ```
//!
//! ```rust,ignore
//! let tree = blockconf::parse_str(source)?;
//! let dir = tree.find("/Directory").unwrap();
//! assert_eq!(dir.values(), &["/"]);
//! println!("{}", tree.render_json());
//! ```
//!
//! ## Modules
//!
//! - `lexing` - Classification of single lines
//! - `tree` - Arena-backed node model and attribute values
//! - `building` - The stateful builder turning lines into a tree
//! - `loader` - Entry points for strings, readers and files
//! - `query` - Path lookups (`find` / `find_all`)
//! - `formats` - Block and JSON serializers and the format registry
//! - `config` - Layered settings for parsing and rendering

pub mod building;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod query;
pub mod tree;

pub use building::{BuildOptions, TreeBuilder};
pub use error::{ParseError, ParseResult};
pub use formats::{BlockOptions, FormatError, FormatRegistry, Formatter, JsonOptions};
pub use lexing::{classify_line, LineType};
pub use loader::{
    parse_file, parse_file_with, parse_lines, parse_lines_with, parse_reader, parse_reader_with,
    parse_str, parse_str_with,
};
pub use query::PathExpr;
pub use tree::{AttrValue, ConfigTree, Declaration, Node, NodeId, NodeRef};
