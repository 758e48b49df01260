//! Force-directed layout.
//!
//! Nodes start on a circle of radius `min(node_spacing, level_spacing) * sqrt(n)` centred at
//! `(radius, radius)`, at angles drawn from a seeded generator. Each iteration accumulates an
//! inverse-square repulsion between every pair of nodes and a linear spring pull along every
//! edge, then integrates a damped velocity. The run stops after `fd_iterations` or as soon as
//! the summed node speed of an iteration drops below `min_velocity`.

mod rng;

use crate::engine::LayoutEngine;
use crate::error::Result;
use crate::model::{NodePosition, node_size};
use crate::options::LayoutOptions;
use rng::XorShift64Star;
use scratchrobin_graph::Graph;
use std::f64::consts::TAU;

/// Pairs closer than this (squared) exert no repulsion.
const MIN_DISTANCE_SQ: f64 = 0.01;

#[derive(Debug, Clone, Copy, Default)]
pub struct ForceDirectedLayout {
    seed: Option<u64>,
}

impl ForceDirectedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the initial placement seed. Takes precedence over [`LayoutOptions::seed`].
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn resolve_seed(&self, options: &LayoutOptions) -> u64 {
        self.seed
            .or(options.seed)
            .unwrap_or_else(rand::random::<u64>)
    }
}

#[derive(Debug, Clone)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    mass: f64,
    pinned: bool,
}

impl LayoutEngine for ForceDirectedLayout {
    fn name(&self) -> &'static str {
        "force"
    }

    fn layout(&self, graph: &Graph, options: &LayoutOptions) -> Result<Vec<NodePosition>> {
        let options = options.sanitized();
        let seed = self.resolve_seed(&options);
        let _span = tracing::debug_span!(
            "force_layout",
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            seed
        )
        .entered();

        let initial = initial_positions(graph, &options, seed);
        let mut bodies: Vec<Body> = graph
            .nodes()
            .iter()
            .zip(&initial)
            .map(|(node, &(x, y))| Body {
                x,
                y,
                vx: 0.0,
                vy: 0.0,
                mass: node
                    .weight
                    .filter(|w| w.is_finite() && *w > 0.0)
                    .unwrap_or(1.0),
                pinned: node.pinned,
            })
            .collect();

        let edges: Vec<(usize, usize)> = graph.proper_edges().collect();
        let max_step = options.node_spacing.min(options.level_spacing).max(1.0);
        let mut forces = vec![(0.0, 0.0); bodies.len()];
        let mut iterations = 0usize;

        for _ in 0..options.fd_iterations {
            iterations += 1;
            accumulate_forces(&bodies, &edges, &options, &mut forces);
            let speed = integrate(&mut bodies, &forces, options.damping, max_step);
            if speed < options.min_velocity {
                break;
            }
        }

        let mut reset = 0usize;
        let positions = graph
            .nodes()
            .iter()
            .zip(bodies)
            .zip(initial)
            .map(|((node, body), (x0, y0))| {
                let (x, y) = if body.x.is_finite() && body.y.is_finite() {
                    (body.x, body.y)
                } else {
                    reset += 1;
                    (x0, y0)
                };
                NodePosition::new(&node.id, x, y, node_size(node, &options))
            })
            .collect();

        if reset > 0 {
            tracing::warn!(reset, "force layout produced non-finite coordinates");
        }
        tracing::debug!(iterations, "force layout finished");
        Ok(positions)
    }
}

fn initial_positions(graph: &Graph, options: &LayoutOptions, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = XorShift64Star::new(seed);
    let radius =
        options.node_spacing.min(options.level_spacing) * (graph.node_count() as f64).sqrt();
    graph
        .nodes()
        .iter()
        .map(|node| {
            // Draw for every node so pinning one node does not shift the others.
            let angle = rng.next_f64_unit() * TAU;
            match node.position() {
                Some(pos) if node.pinned => pos,
                _ => (radius * angle.cos() + radius, radius * angle.sin() + radius),
            }
        })
        .collect()
}

fn accumulate_forces(
    bodies: &[Body],
    edges: &[(usize, usize)],
    options: &LayoutOptions,
    forces: &mut [(f64, f64)],
) {
    forces.iter_mut().for_each(|f| *f = (0.0, 0.0));

    for (i, a) in bodies.iter().enumerate() {
        let (mut fx, mut fy) = (0.0, 0.0);
        for (j, b) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq < MIN_DISTANCE_SQ {
                continue;
            }
            let dist = dist_sq.sqrt();
            let force = options.repulsion_force / dist_sq;
            fx += dx / dist * force;
            fy += dy / dist * force;
        }
        forces[i] = (fx, fy);
    }

    for &(v, w) in edges {
        let dx = bodies[w].x - bodies[v].x;
        let dy = bodies[w].y - bodies[v].y;
        let pull = (dx * options.attraction_force, dy * options.attraction_force);
        forces[v].0 += pull.0;
        forces[v].1 += pull.1;
        forces[w].0 -= pull.0;
        forces[w].1 -= pull.1;
    }
}

/// Applies one velocity step and returns the summed speed of the free nodes.
fn integrate(bodies: &mut [Body], forces: &[(f64, f64)], damping: f64, max_step: f64) -> f64 {
    let mut total = 0.0;
    for (body, &(fx, fy)) in bodies.iter_mut().zip(forces) {
        if body.pinned {
            continue;
        }
        let mut vx = (body.vx + fx / body.mass) * damping;
        let mut vy = (body.vy + fy / body.mass) * damping;
        let speed = (vx * vx + vy * vy).sqrt();
        if !speed.is_finite() {
            vx = 0.0;
            vy = 0.0;
        } else if speed > max_step {
            let scale = max_step / speed;
            vx *= scale;
            vy *= scale;
        }
        body.vx = vx;
        body.vy = vy;
        body.x += vx;
        body.y += vy;
        total += (vx * vx + vy * vy).sqrt();
    }
    total
}
