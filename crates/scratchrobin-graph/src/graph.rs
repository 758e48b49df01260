use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A node as supplied by the diagram host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    /// Human readable caption forwarded to the external layout tool. Falls back to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Caller-known position (top-left), honored for pinned nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pinned: bool,
    /// Simulation mass for force-directed layout. Defaults to `1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn pinned_at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.pinned = true;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn label_or_id(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Both dimensions, when the host provided finite, positive values for each.
    pub fn size(&self) -> Option<(f64, f64)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
                Some((w, h))
            }
            _ => None,
        }
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

/// A directed edge. The source is treated as the parent of the target by ranked layouts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(alias = "source_id")]
    pub source: String,
    #[serde(alias = "target_id")]
    pub target: String,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Index-based directed multigraph.
///
/// Nodes keep their insertion order; every index handed out by this type stays valid for the
/// lifetime of the graph. Edges are stored as resolved `(source, target)` index pairs.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeSpec>,
    node_index: FxHashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
    dropped_edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph, rejecting duplicate node ids.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeSpec>,
        edges: impl IntoIterator<Item = EdgeSpec>,
    ) -> Result<Self> {
        let mut g = Self::new();
        for n in nodes {
            g.add_node(n)?;
        }
        for e in edges {
            g.add_edge(e);
        }
        Ok(g)
    }

    /// Builds a graph, keeping the first node seen for each id.
    pub fn from_parts_dedup(
        nodes: impl IntoIterator<Item = NodeSpec>,
        edges: impl IntoIterator<Item = EdgeSpec>,
    ) -> Self {
        let mut g = Self::new();
        for n in nodes {
            if let Err(Error::DuplicateNode { id }) = g.add_node(n) {
                tracing::warn!(%id, "dropping duplicate node");
            }
        }
        for e in edges {
            g.add_edge(e);
        }
        g
    }

    pub fn add_node(&mut self, node: NodeSpec) -> Result<usize> {
        if self.node_index.contains_key(&node.id) {
            return Err(Error::DuplicateNode { id: node.id });
        }
        let ix = self.nodes.len();
        self.node_index.insert(node.id.clone(), ix);
        self.nodes.push(node);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        Ok(ix)
    }

    /// Adds an edge between two known nodes. Edges naming an unknown endpoint are dropped and
    /// `false` is returned.
    pub fn add_edge(&mut self, edge: EdgeSpec) -> bool {
        let (Some(&v), Some(&w)) = (
            self.node_index.get(&edge.source),
            self.node_index.get(&edge.target),
        ) else {
            tracing::debug!(
                source = %edge.source,
                target = %edge.target,
                "dropping edge with unknown endpoint"
            );
            self.dropped_edges += 1;
            return false;
        };
        self.edges.push((v, w));
        self.out_adj[v].push(w);
        self.in_adj[w].push(v);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges rejected because an endpoint was missing.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn node(&self, ix: usize) -> Option<&NodeSpec> {
        self.nodes.get(ix)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Resolved edges in insertion order, including multi-edges and self-loops.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Edges whose endpoints differ.
    pub fn proper_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied().filter(|(v, w)| v != w)
    }

    /// Targets of the out-edges of `ix`, one entry per edge.
    pub fn successors(&self, ix: usize) -> &[usize] {
        self.out_adj.get(ix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources of the in-edges of `ix`, one entry per edge.
    pub fn predecessors(&self, ix: usize) -> &[usize] {
        self.in_adj.get(ix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_specs(&self) -> impl Iterator<Item = EdgeSpec> + '_ {
        self.edges
            .iter()
            .map(|&(v, w)| EdgeSpec::new(&self.nodes[v].id, &self.nodes[w].id))
    }
}
