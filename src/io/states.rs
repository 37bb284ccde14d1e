//! Initial states reader: one real number per line

use super::{content, text_lines};
use crate::error::{FileRole, ToneError, ToneResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse the first `n` states from `reader`; entries past `n` are ignored.
pub fn parse_states<R: BufRead>(reader: R, n: usize, path: &Path) -> ToneResult<Vec<f64>> {
    // `n` comes from an untrusted header, so the reservation is capped
    let mut states = Vec::with_capacity(n.min(1 << 24));
    for line in text_lines(reader) {
        if states.len() == n {
            break;
        }
        let line = line.map_err(|source| ToneError::IoOpen {
            role: FileRole::States,
            path: path.to_path_buf(),
            source,
        })?;
        let value = line
            .as_deref()
            .and_then(content)
            .and_then(|text| text.split_whitespace().next())
            .and_then(|token| token.parse::<f64>().ok());
        if let Some(value) = value {
            states.push(value);
        }
    }

    if states.len() < n {
        return Err(ToneError::Shape {
            expected: n,
            found: states.len(),
        });
    }
    Ok(states)
}

/// Read `n` initial states from disk
pub fn read_states(path: impl AsRef<Path>, n: usize) -> ToneResult<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ToneError::IoOpen {
        role: FileRole::States,
        path: path.to_path_buf(),
        source,
    })?;
    parse_states(BufReader::new(file), n, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, n: usize) -> ToneResult<Vec<f64>> {
        parse_states(text.as_bytes(), n, Path::new("states.txt"))
    }

    #[test]
    fn test_parse_states() {
        let states = parse("0.5\n-0.6\n0.0\n", 3).unwrap();
        assert_eq!(states, vec![0.5, -0.6, 0.0]);
    }

    #[test]
    fn test_skips_comments_and_malformed_lines() {
        let states = parse("# initial tone\n1.5\n\nneutral\n2e-1 trailing\n  -3\n", 3).unwrap();
        assert_eq!(states, vec![1.5, 0.2, -3.0]);
    }

    #[test]
    fn test_extra_entries_are_ignored() {
        let states = parse("1\n2\n3\n4\n", 2).unwrap();
        assert_eq!(states, vec![1.0, 2.0]);
    }

    #[test]
    fn test_invalid_utf8_lines_are_skipped() {
        let bytes: &[u8] = b"1.0\n\xff\n2.0\n";
        let states = parse_states(bytes, 2, Path::new("states.txt")).unwrap();
        assert_eq!(states, vec![1.0, 2.0]);
    }

    #[test]
    fn test_huge_count_with_short_input() {
        let err = parse("1\n2\n", 1_000_000_000_000).unwrap_err();
        assert!(matches!(err, ToneError::Shape { expected: 1_000_000_000_000, found: 2 }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_too_few_entries() {
        let err = parse("1\n# 2\n", 2).unwrap_err();
        assert!(matches!(err, ToneError::Shape { expected: 2, found: 1 }));
        assert_eq!(err.exit_code(), 4);
    }
}
