//! Compressed sparse representation of incoming neighbors
//!
//! The view is built once from an unordered edge list and is immutable
//! afterwards. Edge `(u, v)` means "u influences v", so the slice for `v`
//! enumerates the sources of every accepted edge whose target is `v`.

use crate::error::{DiffusionError, DiffusionResult};
use tracing::debug;

/// Dense node index in `0..N`
pub type NodeId = usize;

/// How many input edges survived the range filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildReport {
    /// Edges with both endpoints in `0..N`
    pub accepted: usize,
    /// Edges with at least one endpoint out of range
    pub dropped: usize,
}

/// Incoming-neighbor CSR structure (compressed sparse column of the edge list).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InNeighbors {
    /// Number of nodes
    node_count: usize,
    /// Offsets into `sources`. Size = node_count + 1
    offsets: Vec<usize>,
    /// Contiguous array of source node indices, grouped by target
    sources: Vec<NodeId>,
    report: BuildReport,
}

/// Map a raw edge to node indices if both endpoints are in range.
///
/// Both build passes go through this predicate, which keeps
/// `offsets[N]` equal to the sum of in-degrees.
fn accept(node_count: usize, (u, v): (i64, i64)) -> Option<(NodeId, NodeId)> {
    let u = usize::try_from(u).ok().filter(|&u| u < node_count)?;
    let v = usize::try_from(v).ok().filter(|&v| v < node_count)?;
    Some((u, v))
}

impl InNeighbors {
    /// Build the in-neighbor view for `node_count` nodes.
    ///
    /// Pass 1 counts in-degrees, a prefix sum produces the offsets, pass 2
    /// scatters sources into place. Within a target, sources keep the order
    /// in which their edges appear in `edges`, so identical input always
    /// yields an identical view. Self-loops and duplicate edges are kept.
    pub fn build(node_count: usize, edges: &[(i64, i64)]) -> DiffusionResult<Self> {
        if node_count == 0 {
            return Err(DiffusionError::InvalidNodeCount);
        }

        // 1. In-degree count
        let mut in_degree = vec![0usize; node_count];
        let mut accepted = 0;
        for &edge in edges {
            if let Some((_, v)) = accept(node_count, edge) {
                in_degree[v] += 1;
                accepted += 1;
            }
        }

        // 2. Prefix sum
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        for degree in &in_degree {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + degree);
        }

        // 3. Scatter
        let mut sources = vec![0; accepted];
        let mut pos = offsets[..node_count].to_vec();
        for &edge in edges {
            if let Some((u, v)) = accept(node_count, edge) {
                sources[pos[v]] = u;
                pos[v] += 1;
            }
        }

        let report = BuildReport {
            accepted,
            dropped: edges.len() - accepted,
        };
        if report.dropped > 0 {
            debug!(
                "Dropped {} of {} edges with endpoints outside 0..{}",
                report.dropped,
                edges.len(),
                node_count
            );
        }

        Ok(Self {
            node_count,
            offsets,
            sources,
            report,
        })
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of accepted edges (`offsets[N]`)
    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.sources
    }

    pub fn build_report(&self) -> BuildReport {
        self.report
    }

    /// Get the in-degree of a node
    pub fn in_degree(&self, v: NodeId) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, v: NodeId) -> &[NodeId] {
        let start = self.offsets[v];
        let end = self.offsets[v + 1];
        &self.sources[start..end]
    }
}
