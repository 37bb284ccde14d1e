//! Double-buffered state vectors
//!
//! `current` is read, `next` is written, and the two trade roles after every
//! step. Handing them out through [`StateBuffers::split`] lets the borrow
//! checker rule out reads of `next` and writes to `current` inside a step.

/// Two equally sized state vectors that alternate between read and write roles
#[derive(Debug, Clone)]
pub struct StateBuffers {
    current: Vec<f64>,
    next: Vec<f64>,
}

impl StateBuffers {
    /// Take ownership of the initial states; `next` is allocated alongside.
    pub fn new(initial: Vec<f64>) -> Self {
        let next = vec![0.0; initial.len()];
        Self {
            current: initial,
            next,
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// States as of the last completed step
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    /// Read access to `current` and write access to `next` for one step
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        (&self.current, &mut self.next)
    }

    /// Promote `next` to `current`. O(1), no copy.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_current(self) -> Vec<f64> {
        self.current
    }
}
