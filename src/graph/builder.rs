//! Graph builder with name interning
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) page lookups during construction. Links are recorded by name
//! so a page may link to another page before that page has been added.

use super::csr::LinkGraph;
use crate::errors::Result;
use rustc_hash::{FxHashMap, FxHashSet};

/// A page in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderPage {
    /// The page identifier
    pub name: String,
    /// Names of the pages this page links to
    pub links: FxHashSet<String>,
}

impl BuilderPage {
    /// Create a new page with no links
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: FxHashSet::default(),
        }
    }
}

/// A mutable link-graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps page name -> page ID
    name_to_id: FxHashMap<String, u32>,
    /// Page storage, indexed by ID
    pages: Vec<BuilderPage>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            pages: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(page_capacity: usize) -> Self {
        Self {
            name_to_id: FxHashMap::with_capacity_and_hasher(page_capacity, Default::default()),
            pages: Vec::with_capacity(page_capacity),
        }
    }

    /// Get or create a page with the given name, returning its ID
    pub fn add_page(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.pages.len() as u32;
        self.name_to_id.insert(name.to_string(), id);
        self.pages.push(BuilderPage::new(name));
        id
    }

    /// Record a link from `from` to `to`
    ///
    /// `from` is created if missing; `to` is not, so that closed-world
    /// validation in [`build`](Self::build) can catch dangling references.
    /// Self-links and repeated links are dropped.
    pub fn add_link(&mut self, from: &str, to: &str) {
        let id = self.add_page(from);
        if from == to {
            return; // No self-loops
        }
        self.pages[id as usize].links.insert(to.to_string());
    }

    /// Add a page together with all of its outgoing links
    pub fn add_links<I, S>(&mut self, from: &str, targets: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = self.add_page(from);
        for target in targets {
            self.add_link(from, target.as_ref());
        }
        id
    }

    /// Get the number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the number of recorded links, including ones to unknown pages
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    /// Get a page by ID
    pub fn get_page(&self, id: u32) -> Option<&BuilderPage> {
        self.pages.get(id as usize)
    }

    /// Get a page ID by name
    pub fn get_page_id(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    /// Iterate over all pages in ID order
    pub fn pages(&self) -> impl Iterator<Item = (u32, &BuilderPage)> {
        self.pages.iter().enumerate().map(|(i, p)| (i as u32, p))
    }

    /// Check if the builder holds no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Freeze into a [`LinkGraph`], rejecting links to pages that were
    /// never added.
    pub fn build(&self) -> Result<LinkGraph> {
        LinkGraph::from_builder(self)
    }

    /// Freeze into a [`LinkGraph`], silently dropping links to pages that
    /// were never added.
    pub fn build_pruned(&self) -> LinkGraph {
        LinkGraph::from_builder_pruned(self)
    }
}
