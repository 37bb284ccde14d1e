//! Graph file reader
//!
//! ```text
//! # comment
//! N M
//! u v
//! u v
//! ```

use super::{content, leading_pair, text_lines};
use crate::error::{FileRole, ToneError, ToneResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Parsed graph file. Edges are kept raw; range filtering happens in the CSR build.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFile {
    pub node_count: usize,
    /// `M` as written in the header
    pub declared_edges: i64,
    pub edges: Vec<(i64, i64)>,
}

impl GraphFile {
    /// Whether the header's `M` disagrees with the edges actually read
    pub fn edge_count_mismatch(&self) -> bool {
        i64::try_from(self.edges.len()).map_or(true, |read| read != self.declared_edges)
    }

    /// Parse a graph from `reader`; `path` is only used in error messages.
    pub fn parse<R: BufRead>(reader: R, path: &Path) -> ToneResult<Self> {
        let unreadable = |source| ToneError::IoOpen {
            role: FileRole::Graph,
            path: path.to_path_buf(),
            source,
        };
        let invalid = |reason: String| ToneError::Parse {
            role: FileRole::Graph,
            path: path.to_path_buf(),
            reason,
        };

        let mut lines = text_lines(reader);

        let mut header = None;
        for line in lines.by_ref() {
            let line = line.map_err(unreadable)?;
            if let Some(pair) = line.as_deref().and_then(content).and_then(leading_pair) {
                header = Some(pair);
                break;
            }
        }
        let (n, declared_edges) = header.ok_or_else(|| invalid("missing 'N M' header".into()))?;
        if n <= 0 {
            return Err(invalid(format!("invalid N ({})", n)));
        }
        let node_count = usize::try_from(n).map_err(|_| invalid(format!("invalid N ({})", n)))?;

        // The header is untrusted, so the reservation is capped
        let mut edges = Vec::with_capacity(usize::try_from(declared_edges).unwrap_or(0).min(1 << 24));
        for line in lines {
            let line = line.map_err(unreadable)?;
            if let Some(edge) = line.as_deref().and_then(content).and_then(leading_pair) {
                edges.push(edge);
            }
        }

        let graph = Self {
            node_count,
            declared_edges,
            edges,
        };
        if graph.edge_count_mismatch() {
            warn!(
                "Expected M={} edges, but read {}. Proceeding.",
                graph.declared_edges,
                graph.edges.len()
            );
        }
        Ok(graph)
    }
}

/// Read a graph file from disk
pub fn read_graph(path: impl AsRef<Path>) -> ToneResult<GraphFile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ToneError::IoOpen {
        role: FileRole::Graph,
        path: path.to_path_buf(),
        source,
    })?;
    let graph = GraphFile::parse(BufReader::new(file), path)?;
    info!(
        "Read graph {}: N={}, {} edges",
        path.display(),
        graph.node_count,
        graph.edges.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ToneResult<GraphFile> {
        GraphFile::parse(text.as_bytes(), Path::new("test.txt"))
    }

    #[test]
    fn test_invalid_utf8_lines_are_skipped() {
        let bytes: &[u8] = b"\xff header noise\n2 2\n0 1\n\xff\xfe garbage\n1 0\n";
        let graph = GraphFile::parse(bytes, Path::new("test.txt")).unwrap();

        assert_eq!(graph.node_count, 2);
        assert_eq!(graph.edges, vec![(0, 1), (1, 0)]);
        assert!(!graph.edge_count_mismatch());
    }

    #[test]
    fn test_read_graph_with_invalid_utf8_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph.txt");
        std::fs::write(&path, b"2 2\r\n0 1\r\n\xff\xfe garbage\r\n1 0\r\n").unwrap();

        let graph = read_graph(&path).unwrap();
        assert_eq!(graph.edges, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_parse_basic() {
        let graph = parse("3 4\n0 1\n1 2\n2 0\n0 2\n").unwrap();

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edges, vec![(0, 1), (1, 2), (2, 0), (0, 2)]);
        assert!(!graph.edge_count_mismatch());
    }

    #[test]
    fn test_comments_blanks_and_malformed_lines() {
        let text = "# social graph\n\n  # more\n3 5\n0 1\n\nnot an edge\n# 9 9\n1 2\n2\n2 0 ignored\n";
        let graph = parse(text).unwrap();

        assert_eq!(graph.edges, vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(graph.declared_edges, 5);
        assert!(graph.edge_count_mismatch());
    }

    #[test]
    fn test_header_skips_unparseable_lines() {
        let graph = parse("nodes edges\n2 1\n0 1\n").unwrap();
        assert_eq!(graph.node_count, 2);
        assert_eq!(graph.edges, vec![(0, 1)]);
    }

    #[test]
    fn test_out_of_range_edges_are_kept_raw() {
        let graph = parse("2 2\n0 9\n-1 1\n").unwrap();
        assert_eq!(graph.edges, vec![(0, 9), (-1, 1)]);
    }

    #[test]
    fn test_invalid_node_count() {
        for text in ["0 0\n", "-3 1\n0 1\n", "", "# only comments\n"] {
            let err = parse(text).unwrap_err();
            assert!(matches!(err, ToneError::Parse { role: FileRole::Graph, .. }));
            assert_eq!(err.exit_code(), 2);
        }
    }
}
