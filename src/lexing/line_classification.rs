//! Line Classification
//!
//! Maps one line of source text to the kind of line it is. Classification is
//! stateless; the patterns are compiled once and shared read-only.
//!
//! Order matters: comments are recognised before section tags, section starts
//! before section ends, and anything else that is not blank is a key-value
//! line. A line that looks like a tag but does not match a tag pattern (for
//! example `<Foo bar>>`) is therefore read as a key-value line.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tree::AttrValue;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#.*$").unwrap());
static SECTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(?P<name>[^/\s>]+)\s*(?P<value>[^>]+)?>$").unwrap());
static SECTION_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^</(?P<name>[^\s>]+)\s*>$").unwrap());

/// The classification of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType {
    /// Empty after trimming
    Blank,
    /// Whole-line `#` comment
    Comment,
    /// `<name values...>`
    SectionStart { name: String, values: Vec<String> },
    /// `</name>`
    SectionEnd { name: String },
    /// `name values...`
    KeyValue { name: String, value: AttrValue },
}

impl LineType {
    /// Stable label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            LineType::Blank => "BLANK",
            LineType::Comment => "COMMENT",
            LineType::SectionStart { .. } => "SECTION_START",
            LineType::SectionEnd { .. } => "SECTION_END",
            LineType::KeyValue { .. } => "KEY_VALUE",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineType::SectionStart { name, .. }
            | LineType::SectionEnd { name }
            | LineType::KeyValue { name, .. } => write!(f, "{}({})", self.kind(), name),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// Determine the type of a line
pub fn classify_line(line: &str) -> LineType {
    let line = line.trim();

    if line.is_empty() {
        return LineType::Blank;
    }
    if COMMENT.is_match(line) {
        return LineType::Comment;
    }
    if let Some(caps) = SECTION_START.captures(line) {
        let values = caps
            .name("value")
            .map(|m| split_tokens(m.as_str()))
            .unwrap_or_default();
        return LineType::SectionStart {
            name: caps["name"].to_string(),
            values,
        };
    }
    if let Some(caps) = SECTION_END.captures(line) {
        return LineType::SectionEnd {
            name: caps["name"].to_string(),
        };
    }

    let mut tokens = split_tokens(line);
    // Non-blank, so there is at least one token.
    let name = tokens.remove(0);
    LineType::KeyValue {
        name,
        value: AttrValue::from_tokens(tokens),
    }
}

fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(|s| s.to_string()).collect()
}
