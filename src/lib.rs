//! # rapid-pagerank
//!
//! PageRank over hyperlink graphs. Two independent estimators share one
//! random-surfer model:
//!
//! - [`SamplingPageRank`] simulates a long random walk and reports visit
//!   frequencies.
//! - [`IterativePageRank`] applies the PageRank recurrence until the
//!   scores stop moving.
//!
//! Both return a [`Distribution`] with one score per page summing to 1.
//!
//! ```
//! use rapid_pagerank::{iterate_rank, GraphBuilder};
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_links("1.html", ["2.html"]);
//! builder.add_links("2.html", ["1.html"]);
//! let graph = builder.build().unwrap();
//!
//! let ranks = iterate_rank(&graph, 0.85).unwrap();
//! assert!((ranks.get("1.html").unwrap() - 0.5).abs() < 1e-3);
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod corpus;
pub mod distribution;
pub mod errors;
pub mod graph;
pub mod pagerank;
pub mod report;

pub use config::RankConfig;
pub use distribution::Distribution;
pub use errors::{ErrorCode, RankError, Result};
pub use graph::{GraphBuilder, LinkGraph};
pub use pagerank::{
    iterate_rank, sample_rank, transition, DanglingPolicy, IterativePageRank, RankOutput,
    SamplingPageRank,
};
