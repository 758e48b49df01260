use super::acyclic;
use crate::options::LayoutOptions;
use scratchrobin_graph::Graph;
use std::collections::VecDeque;

/// Layer of every node of `g`, indexed like `g.nodes()`.
///
/// Deterministic for a given graph and options. On acyclic input every edge points from a
/// strictly lower layer to a higher one; the lowest layer is always `0`.
pub fn assign_layers(g: &Graph, options: &LayoutOptions) -> Vec<usize> {
    let edges = acyclic::oriented_edges(g, options.cycle_breaking);
    legacy_ranks(g.node_count(), &edges)
}

/// Longest-path ranking by BFS relaxation from the roots.
///
/// A node is raised whenever a parent's layer plus one exceeds its own. Raises are capped at
/// `n - 1`, which no acyclic path can exceed, so relaxation terminates on cyclic input too.
/// Nodes with parents that relaxation never reached (every ancestor path loops) are then placed
/// one below their deepest parent, in input order.
pub(super) fn legacy_ranks(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(v, w) in edges {
        children[v].push(w);
        parents[w].push(v);
    }

    let cap = n.saturating_sub(1);
    let mut layer = vec![0usize; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| parents[v].is_empty()).collect();
    while let Some(v) = queue.pop_front() {
        let candidate = layer[v] + 1;
        if candidate > cap {
            continue;
        }
        for &w in &children[v] {
            if candidate > layer[w] {
                layer[w] = candidate;
                queue.push_back(w);
            }
        }
    }

    let mut patched = 0usize;
    for v in 0..n {
        if layer[v] == 0 && !parents[v].is_empty() {
            let deepest = parents[v].iter().map(|&p| layer[p]).max().unwrap_or(0);
            layer[v] = deepest + 1;
            patched += 1;
        }
    }
    if patched > 0 {
        tracing::debug!(patched, "placed cyclic nodes below their parents");
    }

    if let Some(min) = layer.iter().copied().min() {
        if min > 0 {
            layer.iter_mut().for_each(|l| *l -= min);
        }
    }
    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_gets_consecutive_layers() {
        assert_eq!(legacy_ranks(3, &[(0, 1), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn longest_path_wins() {
        assert_eq!(legacy_ranks(3, &[(0, 2), (0, 1), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn pure_cycle_is_patched_and_shifted_to_zero() {
        assert_eq!(legacy_ranks(3, &[(0, 1), (1, 2), (2, 0)]), vec![0, 1, 2]);
    }

    #[test]
    fn cycle_reachable_from_a_root_terminates() {
        let ranks = legacy_ranks(3, &[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(ranks[0], 0);
        assert!(ranks.iter().all(|&r| r <= 2));
    }

    #[test]
    fn empty_and_isolated() {
        assert!(legacy_ranks(0, &[]).is_empty());
        assert_eq!(legacy_ranks(2, &[]), vec![0, 0]);
    }
}
