//! PageRank estimators
//!
//! This module provides the random-surfer transition model and two
//! independent estimators built on it: Monte-Carlo sampling and power
//! iteration. Neither estimator depends on the other.

pub mod iterative;
pub mod observer;
pub mod sampling;
pub mod transition;

use crate::distribution::Distribution;

pub use iterative::{iterate_rank, Convergence, DanglingPolicy, IterativePageRank, L1Delta, MaxAbsDelta};
pub use observer::{ConvergenceTrace, IterationObserver, NoopObserver};
pub use sampling::{sample_rank, SamplingPageRank};
pub use transition::transition;

/// Result of a power-iteration run
#[derive(Debug, Clone)]
pub struct RankOutput {
    /// Converged scores, normalized to sum to 1
    pub distribution: Distribution,
    /// Number of rounds performed
    pub iterations: usize,
    /// Convergence delta of the final round
    pub delta: f64,
}

impl RankOutput {
    /// Create a new rank output
    pub fn new(distribution: Distribution, iterations: usize, delta: f64) -> Self {
        Self {
            distribution,
            iterations,
            delta,
        }
    }

    /// Discard the convergence details
    pub fn into_distribution(self) -> Distribution {
        self.distribution
    }
}
