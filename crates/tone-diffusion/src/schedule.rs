//! Work partitioning policy for the diffusion kernel
//!
//! The chunk size and schedule only affect performance. Any partition of
//! `0..N` produces a valid step; the partition is fixed for a whole run so the
//! reduction order, and therefore the floating-point result, is reproducible.

use std::fmt;
use std::str::FromStr;

/// How chunks are handed to workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Schedule {
    /// Balanced a priori: each worker gets a contiguous run of chunks
    Static,
    /// Every chunk is an independent, stealable unit of work
    Dynamic,
    /// Geometrically shrinking chunks, each an independent unit
    Guided,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::Guided => "guided",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Schedule::Static),
            "dynamic" => Ok(Schedule::Dynamic),
            "guided" => Ok(Schedule::Guided),
            other => Err(format!("unknown schedule '{}'", other)),
        }
    }
}

/// Chunk size and schedule for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    pub chunk_size: usize,
    pub schedule: Schedule,
}

impl ChunkPolicy {
    /// Default policy for `node_count` nodes on `workers` threads.
    ///
    /// Small graphs use guided scheduling, mid-sized graphs static, and
    /// larger graphs switch to dynamic above four workers where memory
    /// bandwidth makes load imbalance more likely.
    pub fn auto(node_count: usize, workers: usize) -> Self {
        let workers = workers.max(1);
        let chunk = |divisor: usize| (node_count / (divisor * workers)).max(1);

        let (chunk_size, schedule) = if node_count < 500 {
            (chunk(4), Schedule::Guided)
        } else if node_count < 1_000 {
            (chunk(4), Schedule::Static)
        } else if node_count < 10_000 {
            if workers <= 4 {
                (chunk(8), Schedule::Static)
            } else {
                (chunk(4), Schedule::Dynamic)
            }
        } else if workers <= 4 {
            (chunk(16), Schedule::Static)
        } else {
            (chunk(8), Schedule::Dynamic)
        };

        Self {
            chunk_size,
            schedule,
        }
    }

    /// Auto policy with optional overrides. A zero chunk size is ignored.
    pub fn resolve(
        node_count: usize,
        workers: usize,
        chunk_size: Option<usize>,
        schedule: Option<Schedule>,
    ) -> Self {
        let mut policy = Self::auto(node_count, workers);
        if let Some(chunk) = chunk_size.filter(|&c| c > 0) {
            policy.chunk_size = chunk;
        }
        if let Some(schedule) = schedule {
            policy.schedule = schedule;
        }
        policy
    }
}

/// Chunk boundaries over `0..N`, computed once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// `bounds[i]..bounds[i + 1]` is chunk `i`; first is 0, last is N
    bounds: Vec<usize>,
    schedule: Schedule,
    chunk_size: usize,
    workers: usize,
}

impl Partition {
    pub fn new(node_count: usize, workers: usize, policy: ChunkPolicy) -> Self {
        let workers = workers.max(1);
        let chunk_size = policy.chunk_size.max(1);

        let mut bounds = vec![0];
        let mut start = 0;
        while start < node_count {
            let remaining = node_count - start;
            let len = match policy.schedule {
                Schedule::Static | Schedule::Dynamic => chunk_size,
                Schedule::Guided => (remaining / (2 * workers)).max(chunk_size),
            };
            start += len.min(remaining);
            bounds.push(start);
        }

        Self {
            bounds,
            schedule: policy.schedule,
            chunk_size,
            workers,
        }
    }

    /// A single chunk covering every node
    pub fn single(node_count: usize) -> Self {
        Self::new(
            node_count,
            1,
            ChunkPolicy {
                chunk_size: node_count.max(1),
                schedule: Schedule::Static,
            },
        )
    }

    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }

    pub fn node_count(&self) -> usize {
        self.bounds[self.bounds.len() - 1]
    }

    pub fn chunk_count(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fewest chunks rayon may fold into one task
    pub fn min_split(&self) -> usize {
        match self.schedule {
            Schedule::Static => self.chunk_count().div_ceil(self.workers).max(1),
            Schedule::Dynamic | Schedule::Guided => 1,
        }
    }

    /// Most chunks rayon may fold into one task
    pub fn max_split(&self) -> usize {
        match self.schedule {
            Schedule::Static => usize::MAX,
            Schedule::Dynamic | Schedule::Guided => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_policy_table() {
        assert_eq!(
            ChunkPolicy::auto(100, 2),
            ChunkPolicy { chunk_size: 12, schedule: Schedule::Guided }
        );
        assert_eq!(
            ChunkPolicy::auto(800, 8),
            ChunkPolicy { chunk_size: 25, schedule: Schedule::Static }
        );
        assert_eq!(
            ChunkPolicy::auto(4_000, 4),
            ChunkPolicy { chunk_size: 125, schedule: Schedule::Static }
        );
        assert_eq!(
            ChunkPolicy::auto(4_000, 8),
            ChunkPolicy { chunk_size: 125, schedule: Schedule::Dynamic }
        );
        assert_eq!(
            ChunkPolicy::auto(64_000, 4),
            ChunkPolicy { chunk_size: 1_000, schedule: Schedule::Static }
        );
        assert_eq!(
            ChunkPolicy::auto(64_000, 8),
            ChunkPolicy { chunk_size: 1_000, schedule: Schedule::Dynamic }
        );
    }

    #[test]
    fn test_auto_chunk_never_zero() {
        assert_eq!(ChunkPolicy::auto(3, 64).chunk_size, 1);
        assert_eq!(ChunkPolicy::auto(1, 0).chunk_size, 1);
    }

    #[test]
    fn test_overrides() {
        let policy = ChunkPolicy::resolve(64_000, 8, Some(7), Some(Schedule::Guided));
        assert_eq!(policy, ChunkPolicy { chunk_size: 7, schedule: Schedule::Guided });

        let policy = ChunkPolicy::resolve(64_000, 8, Some(0), None);
        assert_eq!(policy, ChunkPolicy::auto(64_000, 8));
    }

    #[test]
    fn test_fixed_partition_covers_range() {
        let policy = ChunkPolicy { chunk_size: 4, schedule: Schedule::Dynamic };
        let partition = Partition::new(10, 2, policy);

        assert_eq!(partition.bounds(), &[0, 4, 8, 10]);
        assert_eq!(partition.node_count(), 10);
        assert_eq!(partition.max_split(), 1);
    }

    #[test]
    fn test_guided_chunks_shrink() {
        let policy = ChunkPolicy { chunk_size: 2, schedule: Schedule::Guided };
        let partition = Partition::new(100, 2, policy);
        let sizes: Vec<usize> = partition.bounds().windows(2).map(|w| w[1] - w[0]).collect();

        assert_eq!(partition.node_count(), 100);
        assert_eq!(sizes[0], 25);
        assert!(sizes.windows(2).all(|w| w[1] <= w[0]));
        assert!(sizes.iter().all(|&s| s >= 2 || s == *sizes.last().unwrap()));
    }

    #[test]
    fn test_static_split_balances_workers() {
        let policy = ChunkPolicy { chunk_size: 10, schedule: Schedule::Static };
        let partition = Partition::new(95, 4, policy);

        assert_eq!(partition.chunk_count(), 10);
        assert_eq!(partition.min_split(), 3);
    }

    #[test]
    fn test_schedule_names_round_trip() {
        for schedule in [Schedule::Static, Schedule::Dynamic, Schedule::Guided] {
            assert_eq!(schedule.to_string().parse::<Schedule>().unwrap(), schedule);
        }
        assert!("fastest".parse::<Schedule>().is_err());
    }
}
