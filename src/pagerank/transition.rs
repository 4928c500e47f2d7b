//! Random-surfer transition model
//!
//! From a page with links, the surfer follows one of them with probability
//! `damping` (split evenly) and otherwise jumps to any page uniformly. A
//! dangling page has nothing to follow, so the jump is uniform over all
//! pages.

use crate::distribution::Distribution;
use crate::errors::{check_damping, RankError, Result};
use crate::graph::LinkGraph;
use std::sync::Arc;

/// One-step distribution over the next page visited from `page`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<Distribution> {
    check_damping(damping)?;
    let id = graph
        .page_id(page)
        .ok_or_else(|| RankError::InvalidPage(page.to_string()))?;

    let mut row = vec![0.0; graph.num_pages()];
    transition_row(graph, id, damping, &mut row);
    Ok(Distribution::from_parts(Arc::clone(graph.pages()), row))
}

/// Fill `row` with the transition probabilities out of page `id`.
///
/// `row` must have one slot per page. Inputs are assumed validated.
pub(crate) fn transition_row(graph: &LinkGraph, id: u32, damping: f64, row: &mut [f64]) {
    let n = graph.num_pages() as f64;
    let degree = graph.out_degree(id);

    if degree == 0 {
        row.fill(1.0 / n);
        return;
    }

    row.fill((1.0 - damping) / n);
    let follow = damping / degree as f64;
    for target in graph.links(id) {
        row[target as usize] += follow;
    }
}
