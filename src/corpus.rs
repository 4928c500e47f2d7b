//! Corpus discovery
//!
//! Turns a directory of HTML pages into a [`LinkGraph`]. Each `*.html` file
//! directly inside the directory is a page named by its file name; its
//! outgoing links are the `href` targets of its anchor tags. Self-links and
//! links to pages outside the corpus are dropped, which yields the
//! closed-world graph the estimators expect.
//!
//! The ranking code never calls into this module.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use crate::errors::Result;
use crate::graph::{GraphBuilder, LinkGraph};

const ANCHOR_HREF: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;
const PAGE_EXTENSION: &str = ".html";

/// Extracts link targets from anchor tags.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(ANCHOR_HREF)?,
        })
    }

    /// All `href` targets in `html`, in document order, duplicates included.
    pub fn links<'a>(&'a self, html: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// A parsed page: its name and raw link targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub name: String,
    pub links: Vec<String>,
}

/// Build the link graph of every HTML page directly inside `dir`.
pub fn discover(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let extractor = LinkExtractor::new()?;

    let mut paths = page_paths(dir)?;
    // Sort so page IDs don't depend on directory order
    paths.sort();

    let pages = paths
        .par_iter()
        .map(|path| parse_page(path, &extractor))
        .collect::<Result<Vec<_>>>()?;

    log_debug!(dir = %dir.display(), pages = pages.len(), "parsed corpus");

    Ok(graph_from_pages(&pages))
}

/// Assemble a closed-world graph from parsed pages.
pub fn graph_from_pages(pages: &[PageLinks]) -> LinkGraph {
    let mut builder = GraphBuilder::with_capacity(pages.len());
    for page in pages {
        builder.add_page(&page.name);
    }
    for page in pages {
        builder.add_links(&page.name, &page.links);
    }
    builder.build_pruned()
}

fn page_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let is_page = entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(PAGE_EXTENSION);
        if is_page {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn parse_page(path: &Path, extractor: &LinkExtractor) -> Result<PageLinks> {
    let html = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let links = extractor.links(&html).map(str::to_string).collect();
    Ok(PageLinks { name, links })
}
