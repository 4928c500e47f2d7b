//! Monte-Carlo PageRank
//!
//! Simulates a single random surfer for `samples` steps. The first page is
//! drawn uniformly; every later page is drawn from the transition model of
//! the page before it. Each visit adds `1/samples` to the visited page, so
//! the visit frequencies already form a distribution.

use super::transition::transition_row;
use crate::config::RankConfig;
use crate::distribution::Distribution;
use crate::errors::{check_damping, RankError, Result};
use crate::graph::LinkGraph;
use rand::distributions::{Distribution as _, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Sampling PageRank estimator
#[derive(Debug, Clone)]
pub struct SamplingPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Number of pages visited by the surfer
    pub samples: usize,
    /// Seed for the random source; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SamplingPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

impl SamplingPageRank {
    /// Create a new SamplingPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a [`RankConfig`]; values are checked when the sampler runs
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of samples
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Fix the random seed for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the sampler with an RNG built from `seed`
    pub fn run(&self, graph: &LinkGraph) -> Result<Distribution> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(graph, &mut rng)
    }

    /// Run the sampler drawing from the caller's random source
    pub fn run_with_rng<R: Rng>(
        &self,
        graph: &LinkGraph,
        rng: &mut R,
    ) -> Result<Distribution> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(RankError::InvalidSampleCount(self.samples));
        }
        let n = graph.num_pages();
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }

        trace_run!("sampling", pages = n, samples = self.samples);

        let weight = 1.0 / self.samples as f64;
        let mut visits = vec![0.0; n];
        let mut row = vec![0.0; n];

        let mut page = rng.gen_range(0..n as u32);
        visits[page as usize] += weight;

        for _ in 1..self.samples {
            transition_row(graph, page, self.damping, &mut row);
            let next = WeightedIndex::new(&row)?;
            page = next.sample(rng) as u32;
            visits[page as usize] += weight;
        }

        log_debug!(samples = self.samples, "sampling finished");

        Ok(Distribution::from_parts(Arc::clone(graph.pages()), visits))
    }
}

/// Estimate PageRank by sampling `samples` pages with a fresh random seed.
pub fn sample_rank(graph: &LinkGraph, damping: f64, samples: usize) -> Result<Distribution> {
    SamplingPageRank::new()
        .with_damping(damping)
        .with_samples(samples)
        .run(graph)
}
