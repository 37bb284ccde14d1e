//! Result writers

use crate::error::{FileRole, ToneError, ToneResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn write_with<F>(path: &Path, role: FileRole, body: F) -> ToneResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let wrap = |source| ToneError::Write {
        role,
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    body(&mut writer).map_err(wrap)?;
    writer.flush().map_err(wrap)
}

/// Write one value per line, in order
pub fn write_values(path: impl AsRef<Path>, values: &[f64], role: FileRole) -> ToneResult<()> {
    write_with(path.as_ref(), role, |writer| {
        for value in values {
            writeln!(writer, "{}", value)?;
        }
        Ok(())
    })
}

/// Write a graph file: `N M` header followed by one `u v` line per edge
pub fn write_graph(path: impl AsRef<Path>, node_count: usize, edges: &[(usize, usize)]) -> ToneResult<()> {
    write_with(path.as_ref(), FileRole::Graph, |writer| {
        writeln!(writer, "{} {}", node_count, edges.len())?;
        for (u, v) in edges {
            writeln!(writer, "{} {}", u, v)?;
        }
        Ok(())
    })
}
