//! Crossing reduction.
//!
//! Layers are swept top to bottom; each node is keyed by the barycenter of its upper
//! neighbours' positions and the layer is stably re-sorted by that key. The ordering with the
//! fewest crossings seen so far is kept, so sweeping never makes the result worse than the
//! initial ordering.

use super::LayerGraph;

/// Nodes grouped by rank; real nodes in input order, then dummies in creation order.
pub(super) fn init_layers(lg: &LayerGraph) -> Vec<Vec<usize>> {
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); lg.max_rank() + 1];
    for v in 0..lg.node_count() {
        layers[lg.rank[v]].push(v);
    }
    layers
}

pub(super) fn run(lg: &LayerGraph, layers: &mut Vec<Vec<usize>>, max_iterations: usize) {
    let upper = lg.upper_neighbors();
    let mut pos = positions(lg.node_count(), layers);

    let mut best = layers.clone();
    let mut best_cc = cross_count(layers, &lg.edges);
    let mut sweeps = 0usize;

    for _ in 0..max_iterations {
        if best_cc == 0 {
            break;
        }
        sweeps += 1;
        let mut changed = false;
        for layer in layers.iter_mut().skip(1) {
            let mut keyed: Vec<(f64, usize)> = layer
                .iter()
                .enumerate()
                .map(|(i, &v)| (barycenter(&upper[v], &pos).unwrap_or(i as f64), v))
                .collect();
            // `sort_by` is stable: ties keep their previous relative order.
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

            if keyed.iter().zip(layer.iter()).any(|((_, v), w)| v != w) {
                changed = true;
                for (i, (_, v)) in keyed.into_iter().enumerate() {
                    layer[i] = v;
                    pos[v] = i;
                }
            }
        }

        let cc = cross_count(layers, &lg.edges);
        if cc < best_cc {
            best_cc = cc;
            best.clone_from(layers);
        }
        if !changed {
            break;
        }
    }

    tracing::debug!(sweeps, crossings = best_cc, "crossing reduction finished");
    *layers = best;
}

fn barycenter(neighbors: &[usize], pos: &[usize]) -> Option<f64> {
    if neighbors.is_empty() {
        return None;
    }
    let sum: usize = neighbors.iter().map(|&u| pos[u]).sum();
    Some(sum as f64 / neighbors.len() as f64)
}

fn positions(n: usize, layers: &[Vec<usize>]) -> Vec<usize> {
    let mut pos = vec![0usize; n];
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }
    pos
}

/// Number of pairwise crossings between consecutive layers.
///
/// Only edges joining adjacent layers are counted; an edge listed once per parallel copy counts
/// once per copy. Uses the accumulator tree of Barth, Jünger and Mutzel, so each layer pair costs
/// `O(e log n)`.
pub fn cross_count(layers: &[Vec<usize>], edges: &[(usize, usize)]) -> usize {
    let n = layers
        .iter()
        .flatten()
        .copied()
        .max()
        .map(|m| m + 1)
        .unwrap_or(0);
    let mut layer_of = vec![usize::MAX; n];
    let mut pos = vec![0usize; n];
    for (r, layer) in layers.iter().enumerate() {
        for (i, &v) in layer.iter().enumerate() {
            layer_of[v] = r;
            pos[v] = i;
        }
    }

    let mut by_layer: Vec<Vec<(usize, usize)>> = vec![Vec::new(); layers.len()];
    for &(v, w) in edges {
        let (Some(&lv), Some(&lw)) = (layer_of.get(v), layer_of.get(w)) else {
            continue;
        };
        if lv != usize::MAX && lw == lv + 1 {
            by_layer[lw].push((pos[v], pos[w]));
        }
    }

    by_layer
        .iter_mut()
        .zip(layers)
        .map(|(pairs, south)| two_layer_cross_count(pairs, south.len()))
        .sum()
}

fn two_layer_cross_count(pairs: &mut [(usize, usize)], south_len: usize) -> usize {
    if pairs.is_empty() || south_len == 0 {
        return 0;
    }
    // North position first, south position second.
    pairs.sort_unstable();

    let mut first_index: usize = 1;
    while first_index < south_len {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree = vec![0usize; tree_size];

    let mut cc = 0usize;
    for &(_, south) in pairs.iter() {
        let mut index = south + first_index;
        tree[index] += 1;
        let mut weight_sum = 0usize;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}
