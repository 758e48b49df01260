//! Layout configuration.
//!
//! `LayoutOptions` deserializes from JSON with every field optional. Algorithm and direction
//! names are parsed leniently: unknown values fall back to the defaults so configurations saved
//! by older or newer hosts keep loading.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutAlgorithm {
    /// Hierarchical layered layout (Sugiyama style).
    #[default]
    Layered,
    /// Spring simulation.
    ForceDirected,
    /// Grid placement.
    Orthogonal,
    /// Reserved; laid out with [`LayoutAlgorithm::Layered`].
    Circular,
    /// Delegates to the Graphviz `dot` executable, falling back to the layered layout.
    External,
}

impl LayoutAlgorithm {
    pub const ALL: [LayoutAlgorithm; 5] = [
        LayoutAlgorithm::Layered,
        LayoutAlgorithm::ForceDirected,
        LayoutAlgorithm::Orthogonal,
        LayoutAlgorithm::Circular,
        LayoutAlgorithm::External,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LayoutAlgorithm::Layered => "sugiyama",
            LayoutAlgorithm::ForceDirected => "force",
            LayoutAlgorithm::Orthogonal => "orthogonal",
            LayoutAlgorithm::Circular => "circular",
            LayoutAlgorithm::External => "graphviz",
        }
    }

    /// Canonical names of every selectable algorithm, in menu order.
    pub fn available() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.as_str()).collect()
    }

    /// Parses a stored algorithm name; anything unrecognized selects the layered layout.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "force" | "forcedirected" | "force-directed" | "force_directed" => {
                LayoutAlgorithm::ForceDirected
            }
            "orthogonal" | "grid" => LayoutAlgorithm::Orthogonal,
            "circular" => LayoutAlgorithm::Circular,
            "graphviz" | "dot" => LayoutAlgorithm::External,
            _ => LayoutAlgorithm::Layered,
        }
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse_lossy(s))
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LayoutAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LayoutAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(lossy_selector(deserializer)?.map_or_else(Self::default, |s| Self::parse_lossy(&s)))
    }
}

/// Flow direction of ranked layouts. Only the layered engine maps ranks onto an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::BottomUp => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }

    /// Ranks advance along x instead of y.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// Ranks advance towards smaller coordinates.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Direction::BottomUp | Direction::RightLeft)
    }

    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "bt" | "bottomup" | "bottom-up" | "bottom_up" => Direction::BottomUp,
            "lr" | "leftright" | "left-right" | "left_right" => Direction::LeftRight,
            "rl" | "rightleft" | "right-left" | "right_left" => Direction::RightLeft,
            _ => Direction::TopDown,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(lossy_selector(deserializer)?.map_or_else(Self::default, |s| Self::parse_lossy(&s)))
    }
}

/// Reads a selector of any JSON type; only strings carry a name, anything else is `None`.
fn lossy_selector<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        other => {
            tracing::debug!(value = %other, "ignoring non-string layout selector");
            Ok(None)
        }
    }
}

/// How the layered engine copes with cyclic input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleBreaking {
    /// Rank by BFS relaxation, then patch nodes stranded on a cycle to sit below their parents.
    #[default]
    Legacy,
    /// Reverse a greedy feedback arc set first so ranking always sees a DAG.
    #[serde(alias = "greedy", alias = "greedy-fas")]
    GreedyFeedbackArcSet,
    /// Reverse the back edges of a depth-first walk in node insertion order.
    #[serde(alias = "dfs", alias = "dfs-fas")]
    DepthFirstFeedbackArcSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub algorithm: LayoutAlgorithm,

    /// Lateral distance between neighbouring nodes of a layer (or grid columns).
    pub node_spacing: f64,
    /// Distance between consecutive layers (or grid rows).
    pub level_spacing: f64,
    pub padding: f64,

    pub minimize_crossings: bool,
    /// Upper bound on barycenter sweeps.
    pub max_iterations: usize,

    pub repulsion_force: f64,
    pub attraction_force: f64,
    pub damping: f64,
    pub fd_iterations: usize,
    /// The simulation stops once the summed node speed of an iteration drops below this.
    pub min_velocity: f64,
    /// Seed for the force-directed initial placement. `None` draws a fresh seed per call.
    pub seed: Option<u64>,

    /// Accepted for compatibility; the grid engine has no port model.
    pub use_ports: bool,
    pub compact_grid: bool,
    pub grid_gap: f64,

    pub direction: Direction,
    pub cycle_breaking: CycleBreaking,
    /// Route edges spanning several layers through synthetic nodes during ordering.
    pub insert_dummy_nodes: bool,
    /// Use input node sizes for output and spacing instead of the fixed defaults.
    pub honor_node_sizes: bool,

    /// Report external tool failures instead of falling back to the layered layout.
    pub strict_external: bool,
    pub external_program: String,
    pub external_timeout_ms: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::Layered,
            node_spacing: 150.0,
            level_spacing: 120.0,
            padding: 50.0,
            minimize_crossings: true,
            max_iterations: 10,
            repulsion_force: 1000.0,
            attraction_force: 0.01,
            damping: 0.9,
            fd_iterations: 100,
            min_velocity: 0.1,
            seed: None,
            use_ports: true,
            compact_grid: false,
            grid_gap: 20.0,
            direction: Direction::TopDown,
            cycle_breaking: CycleBreaking::Legacy,
            insert_dummy_nodes: true,
            honor_node_sizes: true,
            strict_external: false,
            external_program: "dot".to_string(),
            external_timeout_ms: Some(30_000),
        }
    }
}

impl LayoutOptions {
    pub fn with_algorithm(mut self, algorithm: LayoutAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns a copy whose numeric fields cannot drive an engine into non-finite coordinates.
    ///
    /// Non-finite or negative spacings fall back to their defaults and damping is clamped into
    /// `[0, 1)`.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let non_negative = |v: f64, fallback: f64| {
            if v.is_finite() && v >= 0.0 {
                v
            } else {
                fallback
            }
        };
        let finite = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        Self {
            node_spacing: non_negative(self.node_spacing, d.node_spacing),
            level_spacing: non_negative(self.level_spacing, d.level_spacing),
            padding: non_negative(self.padding, d.padding),
            grid_gap: non_negative(self.grid_gap, d.grid_gap),
            repulsion_force: finite(self.repulsion_force, d.repulsion_force),
            attraction_force: finite(self.attraction_force, d.attraction_force),
            damping: finite(self.damping, d.damping).clamp(0.0, 0.999),
            min_velocity: non_negative(self.min_velocity, d.min_velocity),
            ..self.clone()
        }
    }
}
