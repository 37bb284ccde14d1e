//! Text formats for graphs, states and results
//!
//! All inputs share the same line rules: blank lines and lines whose first
//! non-whitespace character is `#` are skipped, and lines that do not parse
//! (including lines that are not valid UTF-8) are skipped silently.

pub mod graph;
pub mod output;
pub mod states;

pub use graph::{read_graph, GraphFile};
pub use output::{write_graph, write_values};
pub use states::read_states;

use std::io::{self, BufRead};

/// Lines of `reader`, or `None` for a line that is not valid UTF-8.
/// Only real I/O failures surface as errors.
fn text_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Option<String>>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8(bytes).ok()))
}

/// Trimmed line content, or `None` for blank and comment lines
fn content(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// The first two whitespace-separated integers of a line
fn leading_pair(line: &str) -> Option<(i64, i64)> {
    let mut tokens = line.split_whitespace();
    let a = tokens.next()?.parse().ok()?;
    let b = tokens.next()?.parse().ok()?;
    Some((a, b))
}
