//! Block-format serialization
//!
//! Prints the tree back in the bracketed section layout, one node per line,
//! indented by depth. The root itself is never printed.
//!
//! ## Format
//!
//! - A node with children → `<name values...>`, its children, `</name>`
//! - A node without children → `name values...` on a single line
//!
//! Only children decide whether tags are emitted, so a section whose body held
//! nothing but key-value lines prints as a single line. Key-value lines are
//! not part of the output unless `include_attributes` is set; in that mode
//! every section is printed with its tags and attributes are written in
//! declaration order, which makes the output parseable again.
//!
//! ```text
//! Directory /
//! <IfModule log_config_module>
//!     IfModule logio_module
//! </IfModule>
//! ```

use crate::tree::{ConfigTree, Declaration, Node, NodeId};

/// Knobs for the block printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOptions {
    /// Indentation unit, repeated once per depth level
    pub indent: String,
    /// Also print key-value attributes
    pub include_attributes: bool,
}

impl Default for BlockOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            include_attributes: false,
        }
    }
}

struct BlockPrinter<'a> {
    tree: &'a ConfigTree,
    options: &'a BlockOptions,
    output: String,
}

impl BlockPrinter<'_> {
    fn push_line(&mut self, level: isize, text: &str) {
        if level < 0 {
            return;
        }
        self.output.push_str(&self.options.indent.repeat(level as usize));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn visit(&mut self, id: NodeId, level: isize) {
        if self.options.include_attributes {
            self.visit_with_attributes(id, level);
            return;
        }

        let node = self.tree.node(id);
        if node.children().is_empty() {
            self.push_line(level, &head(node));
            return;
        }

        self.push_line(level, &format!("<{}>", head(node)));
        for &child in node.children() {
            self.visit(child, level + 1);
        }
        self.push_line(level, &format!("</{}>", node.name()));
    }

    fn visit_with_attributes(&mut self, id: NodeId, level: isize) {
        let node = self.tree.node(id);
        self.push_line(level, &format!("<{}>", head(node)));

        for (index, entry) in node.declarations().iter().enumerate() {
            match entry {
                Declaration::Child(child) => self.visit_with_attributes(*child, level + 1),
                Declaration::Attribute(name) => {
                    let mut line = name.clone();
                    if let Some(value) = self.tree.declared_value(id, index) {
                        for token in value.tokens() {
                            line.push(' ');
                            line.push_str(token);
                        }
                    }
                    self.push_line(level + 1, &line);
                }
            }
        }

        self.push_line(level, &format!("</{}>", node.name()));
    }
}

/// `name values...`
fn head(node: &Node) -> String {
    let mut text = node.name().to_string();
    for value in node.values() {
        text.push(' ');
        text.push_str(value);
    }
    text
}

/// Serialize a whole tree to block format
pub fn render_block(tree: &ConfigTree, options: &BlockOptions) -> String {
    render_block_from(tree, NodeId::ROOT, -1, options)
}

/// Serialize the subtree at `id`, starting at `level`.
///
/// A negative level suppresses the node's own line and tags; its children
/// then start at level 0.
pub fn render_block_from(tree: &ConfigTree, id: NodeId, level: isize, options: &BlockOptions) -> String {
    let mut printer = BlockPrinter {
        tree,
        options,
        output: String::new(),
    };
    printer.visit(id, level);
    printer.output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_str;

    #[test]
    fn test_root_tags_are_never_printed() {
        let tree = parse_str("<A>\n<B>\n</B>\n</A>\n").unwrap();
        let output = render_block(&tree, &BlockOptions::default());
        assert_eq!(output, "<A>\n    B\n</A>\n");
        assert!(!output.contains("root"));
    }

    #[test]
    fn test_leaf_at_depth_one() {
        let tree = parse_str("<Outer x>\n<AccessFileName .htaccess>\n</AccessFileName>\n</Outer>\n").unwrap();
        let output = render_block(&tree, &BlockOptions::default());
        assert_eq!(output, "<Outer x>\n    AccessFileName .htaccess\n</Outer>\n");
    }

    #[test]
    fn test_key_values_are_omitted_by_default() {
        let tree = parse_str("Listen 80\n<Directory />\nOptions None\n</Directory>\n").unwrap();
        assert_eq!(tree.render_block(), "Directory /\n");
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let tree = parse_str("# nothing here\n").unwrap();
        assert_eq!(tree.render_block(), "");
    }

    #[test]
    fn test_subtree_rendering() {
        let tree = parse_str("<A 1>\n<B 2>\n</B>\n</A>\n").unwrap();
        let b = tree.find("A/B").unwrap().id();
        let options = BlockOptions::default();
        assert_eq!(render_block_from(&tree, b, 0, &options), "B 2\n");
        assert_eq!(render_block_from(&tree, b, 2, &options), "        B 2\n");
    }

    #[test]
    fn test_custom_indent() {
        let tree = parse_str("<A>\n<B>\n</B>\n</A>\n").unwrap();
        let options = BlockOptions {
            indent: "\t".to_string(),
            ..BlockOptions::default()
        };
        assert_eq!(render_block(&tree, &options), "<A>\n\tB\n</A>\n");
    }

    #[test]
    fn test_include_attributes_keeps_declaration_order() {
        let source = "\
ServerRoot \"/srv\"
<Directory />
Options FollowSymLinks MultiViews
</Directory>
LogFormat \"%h\" common
LogFormat \"%u\" agent
";
        let tree = parse_str(source).unwrap();
        let options = BlockOptions {
            include_attributes: true,
            ..BlockOptions::default()
        };
        let output = render_block(&tree, &options);
        assert_eq!(
            output,
            "\
ServerRoot /srv
<Directory />
    Options FollowSymLinks MultiViews
</Directory>
LogFormat \"%h\" common
LogFormat \"%u\" agent
"
        );

        let reparsed = parse_str(&output).unwrap();
        assert_eq!(reparsed.render_json(), tree.render_json());
    }
}
