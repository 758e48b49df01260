//! Hierarchical (Sugiyama-style) layout.
//!
//! The pipeline follows the usual phases: optional cycle breaking, rank assignment, dummy-node
//! insertion for long edges, barycenter crossing reduction, coordinate assignment and finally
//! mapping the top-to-bottom frame onto the requested [`Direction`](crate::Direction).

mod acyclic;
mod coordinate_system;
mod normalize;
mod order;
mod position;
mod rank;

pub use order::cross_count;
pub use rank::assign_layers;

use crate::engine::LayoutEngine;
use crate::error::Result;
use crate::model::{NodePosition, node_size};
use crate::options::LayoutOptions;
use scratchrobin_graph::Graph;
use std::time::Instant;

/// Working graph of the layered pipeline.
///
/// Indices `0..real_count` are the input nodes in input order; indices past that are dummies
/// created by [`normalize`]. Extents are stored as `(lateral, depth)`, i.e. already adjusted for
/// the layout direction.
#[derive(Debug, Clone, Default)]
pub(crate) struct LayerGraph {
    pub(crate) real_count: usize,
    pub(crate) rank: Vec<usize>,
    pub(crate) extent: Vec<(f64, f64)>,
    /// Edges oriented from lower to higher rank.
    pub(crate) edges: Vec<(usize, usize)>,
}

impl LayerGraph {
    fn new(rank: Vec<usize>, extent: Vec<(f64, f64)>) -> Self {
        Self {
            real_count: rank.len(),
            rank,
            extent,
            edges: Vec::new(),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.rank.len()
    }

    pub(crate) fn is_dummy(&self, v: usize) -> bool {
        v >= self.real_count
    }

    pub(crate) fn add_dummy(&mut self, rank: usize) -> usize {
        self.rank.push(rank);
        self.extent.push((0.0, 0.0));
        self.rank.len() - 1
    }

    pub(crate) fn max_rank(&self) -> usize {
        self.rank.iter().copied().max().unwrap_or(0)
    }

    /// Lower-rank neighbours of every node, one entry per edge.
    pub(crate) fn upper_neighbors(&self) -> Vec<Vec<usize>> {
        let mut upper = vec![Vec::new(); self.node_count()];
        for &(v, w) in &self.edges {
            upper[w].push(v);
        }
        upper
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredLayout;

impl LayoutEngine for LayeredLayout {
    fn name(&self) -> &'static str {
        "sugiyama"
    }

    fn layout(&self, graph: &Graph, options: &LayoutOptions) -> Result<Vec<NodePosition>> {
        let options = options.sanitized();
        let _span = tracing::debug_span!(
            "layered_layout",
            nodes = graph.node_count(),
            edges = graph.edge_count()
        )
        .entered();

        if graph.is_empty() {
            return Ok(Vec::new());
        }

        let sizes: Vec<(f64, f64)> = graph
            .nodes()
            .iter()
            .map(|n| node_size(n, &options))
            .collect();

        let edges = time("acyclic", || acyclic::oriented_edges(graph, options.cycle_breaking));
        let ranks = time("rank", || rank::legacy_ranks(graph.node_count(), &edges));

        // Only caller-supplied sizes widen the spacing; defaulted nodes use the plain spacings.
        let spacing_sizes: Vec<(f64, f64)> = graph
            .nodes()
            .iter()
            .map(|n| match n.size() {
                Some(size) if options.honor_node_sizes => size,
                _ => (0.0, 0.0),
            })
            .collect();
        let extents = coordinate_system::adjust(&spacing_sizes, options.direction);
        let mut lg = LayerGraph::new(ranks, extents);
        time("normalize", || {
            normalize::run(&mut lg, &edges, options.insert_dummy_nodes)
        });

        let mut layers = order::init_layers(&lg);
        if options.minimize_crossings {
            time("order", || order::run(&lg, &mut layers, options.max_iterations));
        }

        let mut coords = time("position", || position::assign(&lg, &layers, &options));
        coordinate_system::undo(&mut coords, &lg, options.direction, options.padding);

        tracing::debug!(
            layers = layers.len(),
            dummies = (0..lg.node_count()).filter(|&v| lg.is_dummy(v)).count(),
            "layered layout finished"
        );

        Ok(graph
            .nodes()
            .iter()
            .zip(sizes)
            .enumerate()
            .map(|(v, (node, size))| NodePosition::new(&node.id, coords[v].0, coords[v].1, size))
            .collect())
    }
}

fn time<T>(phase: &'static str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    tracing::trace!(phase, elapsed_us = start.elapsed().as_micros() as u64, "layered phase");
    out
}
