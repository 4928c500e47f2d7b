//! Power-iteration PageRank
//!
//! Applies the PageRank recurrence to every page at once, reading only the
//! previous round's scores:
//!
//! ```text
//! rank'(p) = (1 - d) / N + d * Σ_{q -> p} rank(q) / outdegree(q)
//! ```
//!
//! until the convergence predicate holds. There is no iteration cap: the
//! loop ends through the predicate, or with [`RankError::Diverged`] if a
//! round's delta is NaN.

use super::observer::{IterationObserver, NoopObserver};
use super::RankOutput;
use crate::config::RankConfig;
use crate::distribution::Distribution;
use crate::errors::{check_damping, check_score, check_threshold, RankError, Result};
use crate::graph::LinkGraph;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default convergence threshold on the per-page change between rounds.
pub const DEFAULT_THRESHOLD: f64 = 0.001;

/// How the recurrence treats the score held by dangling pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Dangling pages contribute nothing; their mass leaks out of each
    /// round. Rounds are compared after rescaling to sum 1, and the result
    /// is renormalised at the end.
    #[default]
    Ignore,
    /// Dangling mass is spread uniformly over all pages, matching the
    /// transition model's uniform jump from a dead end.
    Redistribute,
}

/// Stopping rule for power iteration.
pub trait Convergence {
    /// Largest delta still counted as a change.
    fn threshold(&self) -> f64;

    /// Distance between two consecutive score vectors. A NaN anywhere in
    /// either vector must yield NaN.
    fn delta(&self, previous: &[f64], next: &[f64]) -> f64;

    /// True once `delta` falls strictly below `threshold`.
    fn converged(&self, delta: f64) -> bool {
        delta < self.threshold()
    }
}

/// Stop when no page moved by `threshold` or more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxAbsDelta {
    pub threshold: f64,
}

impl Default for MaxAbsDelta {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Convergence for MaxAbsDelta {
    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn delta(&self, previous: &[f64], next: &[f64]) -> f64 {
        previous
            .iter()
            .zip(next)
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, |max, d| if d.is_nan() || d > max { d } else { max })
    }
}

/// Stop when the total (L1) movement across all pages drops below `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L1Delta {
    pub threshold: f64,
}

impl Convergence for L1Delta {
    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn delta(&self, previous: &[f64], next: &[f64]) -> f64 {
        previous
            .iter()
            .zip(next)
            .map(|(old, new)| (old - new).abs())
            .sum()
    }
}

/// Iterative PageRank implementation
#[derive(Debug, Clone)]
pub struct IterativePageRank<C = MaxAbsDelta> {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Treatment of dangling pages
    pub dangling: DanglingPolicy,
    /// Stopping rule
    pub convergence: C,
}

impl Default for IterativePageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            dangling: DanglingPolicy::default(),
            convergence: MaxAbsDelta::default(),
        }
    }
}

impl IterativePageRank {
    /// Create a new IterativePageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a [`RankConfig`]; values are checked when iteration runs
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            dangling: config.dangling,
            convergence: MaxAbsDelta {
                threshold: config.threshold,
            },
        }
    }

    /// Set the max-abs-delta threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.convergence.threshold = threshold;
        self
    }
}

impl<C: Convergence> IterativePageRank<C> {
    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the dangling-page policy
    pub fn with_dangling(mut self, dangling: DanglingPolicy) -> Self {
        self.dangling = dangling;
        self
    }

    /// Replace the stopping rule
    pub fn with_convergence<D: Convergence>(self, convergence: D) -> IterativePageRank<D> {
        IterativePageRank {
            damping: self.damping,
            dangling: self.dangling,
            convergence,
        }
    }

    /// Run from the uniform distribution
    pub fn run(&self, graph: &LinkGraph) -> Result<RankOutput> {
        self.run_observed(graph, &mut NoopObserver)
    }

    /// Run from the uniform distribution, reporting every round
    pub fn run_observed(
        &self,
        graph: &LinkGraph,
        observer: &mut impl IterationObserver,
    ) -> Result<RankOutput> {
        self.validate(graph)?;
        let n = graph.num_pages();
        self.iterate(graph, vec![1.0 / n as f64; n], observer)
    }

    /// Run starting from `initial` instead of the uniform distribution
    ///
    /// Pages are matched by name; every page of `graph` must be present and
    /// carry a finite, non-negative score.
    ///
    /// Restarting from a converged output stops after one round when no
    /// page is dangling, or under [`DanglingPolicy::Redistribute`]. Under
    /// [`DanglingPolicy::Ignore`] the returned scores are rescaled away from
    /// the leaky fixed point, so a restart on a graph with dangling pages
    /// takes a few rounds to leak back to it. The final distribution is the
    /// same either way.
    pub fn run_from(&self, graph: &LinkGraph, initial: &Distribution) -> Result<RankOutput> {
        self.validate(graph)?;
        let scores = graph
            .pages()
            .names()
            .iter()
            .map(|page| {
                let score = initial
                    .get(page)
                    .ok_or_else(|| RankError::InvalidPage(page.clone()))?;
                check_score(page, score)?;
                Ok(score)
            })
            .collect::<Result<Vec<_>>>()?;
        self.iterate(graph, scores, &mut NoopObserver)
    }

    fn validate(&self, graph: &LinkGraph) -> Result<()> {
        check_damping(self.damping)?;
        check_threshold(self.convergence.threshold())?;
        if graph.is_empty() {
            return Err(RankError::EmptyGraph);
        }
        Ok(())
    }

    fn iterate(
        &self,
        graph: &LinkGraph,
        mut scores: Vec<f64>,
        observer: &mut impl IterationObserver,
    ) -> Result<RankOutput> {
        let n = graph.num_pages();
        trace_run!("iterative", pages = n, links = graph.num_links());

        let dangling_pages = graph.dangling_pages();
        let teleport = (1.0 - self.damping) / n as f64;
        let mut new_scores = vec![0.0; n];
        // Rescaled copies of both rounds, compared when mass leaks
        let (mut previous_view, mut next_view) = match self.dangling {
            DanglingPolicy::Ignore => (vec![0.0; n], vec![0.0; n]),
            DanglingPolicy::Redistribute => (Vec::new(), Vec::new()),
        };
        let mut iterations = 0;

        let delta = loop {
            iterations += 1;

            let base = match self.dangling {
                DanglingPolicy::Ignore => teleport,
                DanglingPolicy::Redistribute => {
                    let dangling_mass: f64 =
                        dangling_pages.iter().map(|&d| scores[d as usize]).sum();
                    teleport + self.damping * dangling_mass / n as f64
                }
            };
            new_scores.fill(base);

            // Propagate scores through links
            for (page, &score) in scores.iter().enumerate() {
                let degree = graph.out_degree(page as u32);
                if degree > 0 {
                    let contribution = self.damping * score / degree as f64;
                    for target in graph.links(page as u32) {
                        new_scores[target as usize] += contribution;
                    }
                }
            }

            let delta = match self.dangling {
                DanglingPolicy::Ignore => {
                    previous_view.copy_from_slice(&scores);
                    next_view.copy_from_slice(&new_scores);
                    Distribution::normalize(&mut previous_view);
                    Distribution::normalize(&mut next_view);
                    self.convergence.delta(&previous_view, &next_view)
                }
                DanglingPolicy::Redistribute => self.convergence.delta(&scores, &new_scores),
            };
            observer.on_iteration(iterations, delta);
            log_trace!(iterations, delta, "iteration round");

            if delta.is_nan() {
                return Err(RankError::Diverged(iterations));
            }

            std::mem::swap(&mut scores, &mut new_scores);

            if self.convergence.converged(delta) {
                break delta;
            }
        };

        log_debug!(
            iterations,
            delta,
            mass = scores.iter().sum::<f64>(),
            "power iteration converged"
        );

        // Leaked dangling mass and rounding drift are removed here
        Distribution::normalize(&mut scores);

        Ok(RankOutput::new(
            Distribution::from_parts(Arc::clone(graph.pages()), scores),
            iterations,
            delta,
        ))
    }
}

/// Rank pages by power iteration with the default threshold.
pub fn iterate_rank(graph: &LinkGraph, damping: f64) -> Result<Distribution> {
    IterativePageRank::new()
        .with_damping(damping)
        .run(graph)
        .map(RankOutput::into_distribution)
}
