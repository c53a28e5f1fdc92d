//! Parse entry points
//!
//! Every entry point feeds lines into a [`TreeBuilder`]. Readers and files are
//! consumed line by line in a single pass.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::building::{BuildOptions, TreeBuilder};
use crate::error::{ParseError, ParseResult};
use crate::tree::ConfigTree;

/// Parse a sequence of lines with default options
pub fn parse_lines<I, S>(lines: I) -> ParseResult<ConfigTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with(lines, &BuildOptions::default())
}

pub fn parse_lines_with<I, S>(lines: I, options: &BuildOptions) -> ParseResult<ConfigTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::with_options(options.clone());
    for (index, line) in lines.into_iter().enumerate() {
        builder.push_line(index + 1, line.as_ref())?;
    }
    builder.finish()
}

/// Parse configuration text
pub fn parse_str(source: &str) -> ParseResult<ConfigTree> {
    parse_lines(source.lines())
}

pub fn parse_str_with(source: &str, options: &BuildOptions) -> ParseResult<ConfigTree> {
    parse_lines_with(source.lines(), options)
}

/// Parse everything a reader yields
pub fn parse_reader<R: BufRead>(reader: R) -> ParseResult<ConfigTree> {
    parse_reader_with(reader, &BuildOptions::default())
}

pub fn parse_reader_with<R: BufRead>(reader: R, options: &BuildOptions) -> ParseResult<ConfigTree> {
    let mut builder = TreeBuilder::with_options(options.clone());
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ParseError::Io { path: None, source })?;
        builder.push_line(index + 1, &line)?;
    }
    builder.finish()
}

/// Parse a configuration file from disk.
///
/// The file is closed when this returns, on success and on error alike.
pub fn parse_file(path: impl AsRef<Path>) -> ParseResult<ConfigTree> {
    parse_file_with(path, &BuildOptions::default())
}

pub fn parse_file_with(path: impl AsRef<Path>, options: &BuildOptions) -> ParseResult<ConfigTree> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "parsing file");

    let file = File::open(path).map_err(|source| ParseError::Io {
        path: Some(path.to_path_buf()),
        source,
    })?;
    parse_reader_with(BufReader::new(file), options).map_err(|err| match err {
        ParseError::Io { path: None, source } => ParseError::Io {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })
}
