//! Compressed Sparse Row (CSR) link graph
//!
//! CSR stores outgoing links contiguously, making iteration over a page's
//! links very fast. Both estimators repeatedly walk these rows, so the
//! graph is frozen into this layout once and shared read-only afterwards.

use super::builder::GraphBuilder;
use crate::errors::{RankError, Result};
use rustc_hash::FxHashMap;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Interned page names, shared between a graph and the distributions
/// computed over it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageTable {
    names: Vec<String>,
    index: FxHashMap<String, u32>,
}

impl PageTable {
    fn from_names(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as u32))
            .collect();
        Self { names, index }
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a page ID by name
    pub fn id(&self, name: &str) -> Option<u32> {
        self.index.get(name).copied()
    }

    /// Name of a page by ID
    pub fn name(&self, id: u32) -> &str {
        &self.names[id as usize]
    }

    /// All page names in ID order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// An immutable hyperlink graph in Compressed Sparse Row format
///
/// Invariants established at construction: every link target is a page
/// of the graph, no page links to itself, and each row is sorted and
/// free of duplicates.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    /// Number of pages
    num_pages: usize,
    /// Row pointers: page i's links are at indices row_ptr[i]..row_ptr[i+1]
    row_ptr: Vec<usize>,
    /// Column indices (target pages) for each link
    col_idx: Vec<u32>,
    /// Page names
    pages: Arc<PageTable>,
}

impl LinkGraph {
    /// Convert a GraphBuilder into CSR format, failing on any link to a
    /// page the builder does not hold.
    pub fn from_builder(builder: &GraphBuilder) -> Result<Self> {
        Self::freeze(builder, |from, to| {
            Err(RankError::UnknownLinkTarget {
                from: from.to_string(),
                to: to.to_string(),
            })
        })
    }

    /// Convert a GraphBuilder into CSR format, dropping links to pages the
    /// builder does not hold.
    pub fn from_builder_pruned(builder: &GraphBuilder) -> Self {
        let mut pruned = 0usize;
        let graph = match Self::freeze(builder, |_, _| {
            pruned += 1;
            Ok::<_, Infallible>(())
        }) {
            Ok(graph) => graph,
            Err(never) => match never {},
        };

        if pruned > 0 {
            log_debug!(pruned, "dropped links to pages outside the graph");
        }
        graph
    }

    /// Freeze the builder, handing every link to an unknown page to
    /// `on_unknown(from, to)`. The link is skipped when it returns `Ok`.
    fn freeze<E>(
        builder: &GraphBuilder,
        mut on_unknown: impl FnMut(&str, &str) -> std::result::Result<(), E>,
    ) -> std::result::Result<Self, E> {
        let num_pages = builder.page_count();
        let mut row_ptr = Vec::with_capacity(num_pages + 1);
        let mut col_idx = Vec::with_capacity(builder.link_count());
        let mut names = Vec::with_capacity(num_pages);

        row_ptr.push(0);

        for (_, page) in builder.pages() {
            names.push(page.name.clone());

            let mut targets = Vec::with_capacity(page.links.len());
            for link in &page.links {
                match builder.get_page_id(link) {
                    Some(target) => targets.push(target),
                    None => on_unknown(page.name.as_str(), link.as_str())?,
                }
            }
            // Sort links for deterministic iteration
            targets.sort_unstable();

            col_idx.extend(targets);
            row_ptr.push(col_idx.len());
        }

        Ok(Self {
            num_pages,
            row_ptr,
            col_idx,
            pages: Arc::new(PageTable::from_names(names)),
        })
    }

    /// Build a graph from `(page, links)` pairs with closed-world validation.
    pub fn from_adjacency<I, P, L, S>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (page, links) in adjacency {
            builder.add_links(page.as_ref(), links);
        }
        builder.build()
    }

    /// Iterate over the pages linked to by `page`
    pub fn links(&self, page: u32) -> impl Iterator<Item = u32> + '_ {
        let start = self.row_ptr[page as usize];
        let end = self.row_ptr[page as usize + 1];
        self.col_idx[start..end].iter().copied()
    }

    /// Get the out-degree of a page
    pub fn out_degree(&self, page: u32) -> usize {
        self.row_ptr[page as usize + 1] - self.row_ptr[page as usize]
    }

    /// Number of pages
    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Total number of links
    pub fn num_links(&self) -> usize {
        self.col_idx.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_pages == 0
    }

    /// Find dangling pages (pages with no outgoing links)
    pub fn dangling_pages(&self) -> Vec<u32> {
        (0..self.num_pages as u32)
            .filter(|&p| self.out_degree(p) == 0)
            .collect()
    }

    /// Get a page ID by name
    pub fn page_id(&self, name: &str) -> Option<u32> {
        self.pages.id(name)
    }

    /// Get the name of a page
    pub fn page_name(&self, page: u32) -> &str {
        self.pages.name(page)
    }

    /// Shared page table
    pub fn pages(&self) -> &Arc<PageTable> {
        &self.pages
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self {
            num_pages: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            pages: Arc::default(),
        }
    }
}

impl<S1, S2> TryFrom<HashMap<String, HashSet<String, S2>, S1>> for LinkGraph
where
    S1: BuildHasher,
    S2: BuildHasher,
{
    type Error = RankError;

    fn try_from(corpus: HashMap<String, HashSet<String, S2>, S1>) -> Result<Self> {
        // Sort page names so ID assignment doesn't depend on hash order
        let mut entries: Vec<_> = corpus.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self::from_adjacency(entries)
    }
}
