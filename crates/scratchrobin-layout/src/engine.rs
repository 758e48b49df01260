use crate::error::Result;
use crate::external::GraphvizLayout;
use crate::force::ForceDirectedLayout;
use crate::layered::LayeredLayout;
use crate::model::NodePosition;
use crate::options::{LayoutAlgorithm, LayoutOptions};
use crate::orthogonal::OrthogonalLayout;
use scratchrobin_graph::Graph;

/// A layout algorithm.
///
/// Engines hold no per-call state; one instance can serve any number of concurrent calls.
pub trait LayoutEngine: Send + Sync {
    /// Canonical algorithm name, as accepted by [`LayoutAlgorithm::parse_lossy`].
    fn name(&self) -> &'static str;

    /// Returns exactly one position per node of `graph`.
    fn layout(&self, graph: &Graph, options: &LayoutOptions) -> Result<Vec<NodePosition>>;
}

/// Builds the engine for `algorithm`. `Circular` has no engine of its own and yields the
/// layered one.
pub fn create(algorithm: LayoutAlgorithm) -> Box<dyn LayoutEngine> {
    match algorithm {
        LayoutAlgorithm::Layered | LayoutAlgorithm::Circular => Box::new(LayeredLayout),
        LayoutAlgorithm::ForceDirected => Box::new(ForceDirectedLayout::default()),
        LayoutAlgorithm::Orthogonal => Box::new(OrthogonalLayout),
        LayoutAlgorithm::External => Box::new(GraphvizLayout::new()),
    }
}

/// Like [`create`], for a stored algorithm name. Unknown names select the layered engine.
pub fn create_from_str(name: &str) -> Box<dyn LayoutEngine> {
    create(LayoutAlgorithm::parse_lossy(name))
}
