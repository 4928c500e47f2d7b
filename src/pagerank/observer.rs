//! Iteration observer: hooks for watching power iteration converge.
//!
//! Observers receive the residual after every round without coupling to the
//! update loop, e.g. for progress reporting or for capturing convergence
//! curves in tests.

/// Receives one callback per completed round of power iteration.
pub trait IterationObserver {
    /// Called after round `iteration` (1-based) with its convergence delta.
    fn on_iteration(&mut self, iteration: usize, delta: f64);
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    #[inline]
    fn on_iteration(&mut self, _iteration: usize, _delta: f64) {}
}

/// Records the delta of every round.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceTrace {
    pub deltas: Vec<f64>,
}

impl ConvergenceTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rounds observed
    pub fn rounds(&self) -> usize {
        self.deltas.len()
    }

    /// Delta of the last round, if any
    pub fn last(&self) -> Option<f64> {
        self.deltas.last().copied()
    }
}

impl IterationObserver for ConvergenceTrace {
    fn on_iteration(&mut self, _iteration: usize, delta: f64) {
        self.deltas.push(delta);
    }
}

impl<F: FnMut(usize, f64)> IterationObserver for F {
    fn on_iteration(&mut self, iteration: usize, delta: f64) {
        self(iteration, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_records_deltas() {
        let mut trace = ConvergenceTrace::new();
        trace.on_iteration(1, 0.5);
        trace.on_iteration(2, 0.01);

        assert_eq!(trace.rounds(), 2);
        assert_eq!(trace.last(), Some(0.01));
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let mut observer = |i: usize, _d: f64| seen.push(i);
        observer.on_iteration(1, 0.0);
        observer.on_iteration(2, 0.0);
        drop(observer);

        assert_eq!(seen, vec![1, 2]);
    }
}
