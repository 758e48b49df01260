#![forbid(unsafe_code)]

//! Automatic diagram layout.
//!
//! Given a directed graph of sized boxes, the engines in this crate compute a top-left position
//! for every node:
//!
//! - [`LayeredLayout`]: hierarchical layout with barycenter crossing reduction.
//! - [`ForceDirectedLayout`]: damped spring simulation from a seeded circular start.
//! - [`OrthogonalLayout`]: row-major grid placement with optional compaction.
//! - [`GraphvizLayout`]: delegates to the Graphviz `dot` tool and falls back to the layered
//!   layout when the tool is missing or fails.
//!
//! [`layout`] dispatches on [`LayoutOptions::algorithm`].

pub mod engine;
pub mod error;
pub mod external;
pub mod force;
pub mod layered;
pub mod model;
pub mod options;
pub mod orthogonal;

pub use engine::{LayoutEngine, create, create_from_str};
pub use error::{Error, ExternalError, Result};
pub use external::GraphvizLayout;
pub use force::ForceDirectedLayout;
pub use layered::LayeredLayout;
pub use model::{
    DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, EXTERNAL_NODE_HEIGHT, EXTERNAL_NODE_WIDTH,
    NodePosition,
};
pub use options::{CycleBreaking, Direction, LayoutAlgorithm, LayoutOptions};
pub use orthogonal::OrthogonalLayout;
pub use scratchrobin_graph::{EdgeSpec, Graph, NodeSpec};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out `graph` with the engine selected by `options.algorithm`.
pub fn layout(graph: &Graph, options: &LayoutOptions) -> Result<Vec<NodePosition>> {
    create(options.algorithm).layout(graph, options)
}
