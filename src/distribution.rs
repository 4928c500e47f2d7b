//! Per-page probability distributions
//!
//! A [`Distribution`] assigns a non-negative score to every page of the
//! graph it was computed over. Scores are stored densely by page ID and
//! share the graph's page table, so a distribution outlives any borrow of
//! the graph.

use crate::errors::{check_score, RankError, Result};
use crate::graph::{LinkGraph, PageTable};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Scores for every page of a graph
#[derive(Debug, Clone)]
pub struct Distribution {
    pages: Arc<PageTable>,
    scores: Vec<f64>,
}

impl Distribution {
    /// Uniform distribution over all pages of `graph`
    pub fn uniform(graph: &LinkGraph) -> Self {
        let n = graph.num_pages();
        let score = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            pages: Arc::clone(graph.pages()),
            scores: vec![score; n],
        }
    }

    /// Wrap dense scores indexed by page ID
    ///
    /// Every score must be finite and non-negative.
    pub fn from_scores(graph: &LinkGraph, scores: Vec<f64>) -> Result<Self> {
        if scores.len() != graph.num_pages() {
            return Err(RankError::ScoreLength {
                expected: graph.num_pages(),
                actual: scores.len(),
            });
        }
        for (page, &score) in graph.pages().names().iter().zip(&scores) {
            check_score(page, score)?;
        }
        Ok(Self::from_parts(Arc::clone(graph.pages()), scores))
    }

    pub(crate) fn from_parts(pages: Arc<PageTable>, scores: Vec<f64>) -> Self {
        debug_assert_eq!(pages.len(), scores.len());
        Self { pages, scores }
    }

    /// Score of a page by name
    pub fn get(&self, page: &str) -> Option<f64> {
        self.pages.id(page).map(|id| self.scores[id as usize])
    }

    /// Score of a page by ID
    pub fn score(&self, page: u32) -> f64 {
        self.scores.get(page as usize).copied().unwrap_or(0.0)
    }

    /// Dense scores indexed by page ID
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Iterate `(page, score)` pairs in page-ID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.pages
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Total probability mass
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Largest per-page absolute difference from `other`
    ///
    /// Pages are matched by name, so the two distributions may come from
    /// differently ordered graphs. A page missing from `other` counts with
    /// its full score.
    pub fn max_abs_diff(&self, other: &Distribution) -> f64 {
        self.iter()
            .map(|(page, score)| (score - other.get(page).unwrap_or(0.0)).abs())
            .fold(0.0, f64::max)
    }

    /// Get the top N pages by score; ties are broken by page name
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// All `(page, score)` pairs sorted by page name
    pub fn sorted_by_page(&self) -> Vec<(&str, f64)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    /// Copy into an ordered map keyed by page name
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(page, score)| (page.to_string(), score))
            .collect()
    }

    /// Rescale so the scores sum to 1. Leaves an all-zero vector untouched.
    pub(crate) fn normalize(scores: &mut [f64]) {
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in scores {
                *score /= sum;
            }
        }
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (page, score) in self.sorted_by_page() {
            map.serialize_entry(page, &score)?;
        }
        map.end()
    }
}
