//! Per-step global mean recorder

/// Append-only sequence of per-step means, in step order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    means: Vec<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(steps: usize) -> Self {
        Self {
            means: Vec::with_capacity(steps),
        }
    }

    /// Append the mean of the step that just completed
    pub fn record(&mut self, mean: f64) {
        self.means.push(mean);
    }

    /// Number of completed steps
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.means.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.means
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.means
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let mut history = History::with_capacity(3);
        history.record(0.5);
        history.record(0.25);
        history.record(0.5);

        assert_eq!(history.len(), 3);
        assert_eq!(history.as_slice(), &[0.5, 0.25, 0.5]);
        assert_eq!(history.last(), Some(0.5));
    }
}
