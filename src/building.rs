//! Tree building from classified lines
//!
//! The builder keeps a cursor on the section currently open. Section starts
//! append a child and descend into it, section ends check the name and climb
//! back to the parent, key-value lines set attributes on the cursor. Blank and
//! comment lines are skipped.
//!
//! By default, reaching the end of input with sections still open is accepted
//! and the tree built so far is returned. `BuildOptions::reject_unclosed_sections`
//! turns that into an error.

use crate::error::{ParseError, ParseResult};
use crate::lexing::{classify_line, LineType};
use crate::tree::{ConfigTree, NodeId};

/// Knobs for the tree builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail when input ends inside an open section
    pub reject_unclosed_sections: bool,
}

/// A stateful builder that turns a line stream into a [`ConfigTree`]
pub struct TreeBuilder {
    tree: ConfigTree,
    cursor: NodeId,
    /// Line numbers of the currently open sections, outermost first
    open_lines: Vec<usize>,
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            tree: ConfigTree::new(),
            cursor: NodeId::ROOT,
            open_lines: Vec::new(),
            options,
        }
    }

    /// The node new lines are currently attached to
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Tree built so far
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Classify one raw line (1-based `line_no`) and apply it
    pub fn push_line(&mut self, line_no: usize, line: &str) -> ParseResult<()> {
        let line_type = classify_line(line);
        tracing::trace!(line = line_no, kind = line_type.kind(), "classified line");
        self.apply(line_no, line_type)
    }

    /// Apply an already classified line
    pub fn apply(&mut self, line_no: usize, line_type: LineType) -> ParseResult<()> {
        match line_type {
            LineType::Blank | LineType::Comment => Ok(()),
            LineType::SectionStart { name, values } => {
                let child = self.tree.add_child(self.cursor, &name, values);
                tracing::debug!(line = line_no, section = %name, id = %child, "opened section");
                self.cursor = child;
                self.open_lines.push(line_no);
                Ok(())
            }
            LineType::SectionEnd { name } => self.close_section(line_no, name),
            LineType::KeyValue { name, value } => {
                self.tree.set_attribute(self.cursor, &name, value);
                Ok(())
            }
        }
    }

    fn close_section(&mut self, line_no: usize, name: String) -> ParseResult<()> {
        let current = self.tree.node(self.cursor);
        let parent = match current.parent() {
            Some(parent) => parent,
            None => {
                tracing::warn!(line = line_no, found = %name, "close tag with no open section");
                return Err(ParseError::StructuralMismatch {
                    expected: None,
                    found: name,
                    line: line_no,
                });
            }
        };

        if current.name() != name {
            tracing::warn!(
                line = line_no,
                expected = current.name(),
                found = %name,
                "section mismatch"
            );
            return Err(ParseError::StructuralMismatch {
                expected: Some(current.name().to_string()),
                found: name,
                line: line_no,
            });
        }

        tracing::debug!(line = line_no, section = %name, "closed section");
        self.cursor = parent;
        self.open_lines.pop();
        Ok(())
    }

    /// Stop consuming lines and hand out the tree
    pub fn finish(self) -> ParseResult<ConfigTree> {
        if let Some(&line) = self.open_lines.last() {
            let name = self.tree.node(self.cursor).name().to_string();
            if self.options.reject_unclosed_sections {
                return Err(ParseError::UnclosedSection { name, line });
            }
            tracing::debug!(section = %name, line, "input ended inside an open section");
        }

        tracing::debug!(
            nodes = self.tree.node_count(),
            depth = self.tree.depth(),
            "parsed configuration tree"
        );
        Ok(self.tree)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
