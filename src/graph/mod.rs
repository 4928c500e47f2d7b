//! Link graph construction and representation
//!
//! Pages are interned while the graph is built, then frozen into a CSR
//! layout that both estimators read without mutating.

pub mod builder;
pub mod csr;

pub use builder::GraphBuilder;
pub use csr::{LinkGraph, PageTable};
