use crate::options::LayoutOptions;
use scratchrobin_graph::NodeSpec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_WIDTH: f64 = 140.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 80.0;

/// Size reported for nodes placed from `pos="x,y"` tool output, which carries no extent.
pub const EXTERNAL_NODE_WIDTH: f64 = 100.0;
pub const EXTERNAL_NODE_HEIGHT: f64 = 80.0;

/// Placement of one input node. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub node_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodePosition {
    pub fn new(node_id: impl Into<String>, x: f64, y: f64, (width, height): (f64, f64)) -> Self {
        Self {
            node_id: node_id.into(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Output size of a node: its own size when sizes are honored and present, else the default.
pub fn node_size(node: &NodeSpec, options: &LayoutOptions) -> (f64, f64) {
    if options.honor_node_sizes {
        if let Some(size) = node.size() {
            return size;
        }
    }
    (DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
}
