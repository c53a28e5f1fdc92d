//! Line-level lexing of block configuration sources

pub mod line_classification;

pub use line_classification::{classify_line, LineType};
