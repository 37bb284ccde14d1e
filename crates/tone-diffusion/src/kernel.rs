//! Synchronous (Jacobi) diffusion kernel
//!
//! `next[v] = (1 - alpha) * current[v] + alpha * mean(current[in-neighbors of v])`,
//! with nodes that have no in-neighbors carried over unchanged. Every node
//! depends only on `current`, so chunks of `next` are filled in parallel with
//! no synchronization between them.

use crate::csr::{InNeighbors, NodeId};
use crate::error::{DiffusionError, DiffusionResult};
use crate::schedule::{ChunkPolicy, Partition};
use rayon::prelude::*;

#[inline]
fn update_node(v: NodeId, current: &[f64], view: &InNeighbors, alpha: f64) -> f64 {
    let sources = view.predecessors(v);
    if sources.is_empty() {
        return current[v];
    }

    let mut sum = 0.0;
    for &u in sources {
        sum += current[u];
    }
    let avg = sum / sources.len() as f64;
    (1.0 - alpha) * current[v] + alpha * avg
}

/// Fill one chunk of `next` starting at node `start`; returns the chunk's partial sum.
fn update_chunk(
    start: NodeId,
    out: &mut [f64],
    current: &[f64],
    view: &InNeighbors,
    alpha: f64,
) -> f64 {
    let mut partial = 0.0;
    for (offset, slot) in out.iter_mut().enumerate() {
        let value = update_node(start + offset, current, view, alpha);
        *slot = value;
        partial += value;
    }
    partial
}

fn check_len(expected: usize, actual: usize) -> DiffusionResult<()> {
    if expected != actual {
        return Err(DiffusionError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// One synchronous update over `partition`, returning `sum(next)`.
///
/// Each chunk accumulates a private partial sum. Partials are collected in
/// chunk order and added sequentially, so for a given partition the result
/// does not depend on which worker ran which chunk.
pub fn step_partitioned(
    current: &[f64],
    next: &mut [f64],
    view: &InNeighbors,
    alpha: f64,
    partition: &Partition,
) -> DiffusionResult<f64> {
    let n = view.node_count();
    check_len(n, current.len())?;
    check_len(n, next.len())?;
    check_len(n, partition.node_count())?;

    let mut chunks: Vec<(NodeId, &mut [f64])> = Vec::with_capacity(partition.chunk_count());
    let mut rest = next;
    for bounds in partition.bounds().windows(2) {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(bounds[1] - bounds[0]);
        chunks.push((bounds[0], head));
        rest = tail;
    }

    let partials: Vec<f64> = chunks
        .into_par_iter()
        .with_min_len(partition.min_split())
        .with_max_len(partition.max_split())
        .map(|(start, out)| update_chunk(start, out, current, view, alpha))
        .collect();

    Ok(partials.iter().sum())
}

/// One synchronous update using the default policy for the current rayon
/// pool, returning `sum(next)`.
pub fn step(
    current: &[f64],
    next: &mut [f64],
    view: &InNeighbors,
    alpha: f64,
) -> DiffusionResult<f64> {
    let n = view.node_count();
    let workers = rayon::current_num_threads();
    let partition = Partition::new(n, workers, ChunkPolicy::auto(n, workers));
    step_partitioned(current, next, view, alpha, &partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Schedule;

    #[test]
    fn test_two_cycle_step() {
        let view = InNeighbors::build(2, &[(0, 1), (1, 0)]).unwrap();
        let current = [1.0, 0.0];
        let mut next = [0.0; 2];

        let sum = step(&current, &mut next, &view, 0.5).unwrap();

        assert_eq!(next, [0.5, 0.5]);
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn test_isolated_node_is_fixed_point() {
        let view = InNeighbors::build(3, &[(0, 1)]).unwrap();
        let current = [2.0, 0.0, 5.0];
        let mut next = [0.0; 3];

        step(&current, &mut next, &view, 0.4).unwrap();

        assert_eq!(next[0], 2.0);
        assert!((next[1] - 0.8).abs() < 1e-12);
        assert_eq!(next[2], 5.0);
    }

    #[test]
    fn test_alpha_one_takes_neighbor_mean() {
        // 1 and 2 feed 0; 0 feeds 1 and 2
        let view = InNeighbors::build(3, &[(1, 0), (2, 0), (0, 1), (0, 2)]).unwrap();
        let current = [9.0, 1.0, 3.0];
        let mut next = [0.0; 3];

        step(&current, &mut next, &view, 1.0).unwrap();

        assert_eq!(next, [2.0, 9.0, 9.0]);
    }

    #[test]
    fn test_partition_shape_does_not_change_states() {
        let edges: Vec<(i64, i64)> = (0..50).map(|i| (i, (i * 7 + 3) % 50)).collect();
        let view = InNeighbors::build(50, &edges).unwrap();
        let current: Vec<f64> = (0..50).map(|i| i as f64 / 50.0).collect();

        let mut single = vec![0.0; 50];
        step_partitioned(&current, &mut single, &view, 0.3, &Partition::single(50)).unwrap();

        for schedule in [Schedule::Static, Schedule::Dynamic, Schedule::Guided] {
            let policy = ChunkPolicy { chunk_size: 3, schedule };
            let partition = Partition::new(50, 4, policy);
            let mut next = vec![0.0; 50];
            let sum = step_partitioned(&current, &mut next, &view, 0.3, &partition).unwrap();

            assert_eq!(next, single);
            assert!((sum - single.iter().sum::<f64>()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let view = InNeighbors::build(3, &[]).unwrap();
        let mut next = [0.0; 3];

        let err = step(&[1.0, 2.0], &mut next, &view, 0.5).unwrap_err();
        assert!(matches!(err, DiffusionError::ShapeMismatch { expected: 3, actual: 2 }));

        let partition = Partition::single(2);
        let err = step_partitioned(&[1.0; 3], &mut next, &view, 0.5, &partition).unwrap_err();
        assert!(matches!(err, DiffusionError::ShapeMismatch { expected: 3, actual: 2 }));
    }
}
