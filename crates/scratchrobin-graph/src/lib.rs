#![forbid(unsafe_code)]

//! Graph input model used by `scratchrobin-layout`.
//!
//! Diagram hosts hand the layout engines a plain directed graph: node identifiers with optional
//! sizes and directed `(source, target)` edges. This crate owns that view, rejects inputs the
//! engines cannot reason about (duplicate ids) and drops edges whose endpoints are unknown.

pub mod alg;
pub mod error;
mod graph;

pub use error::{Error, Result};
pub use graph::{EdgeSpec, Graph, NodeSpec};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
