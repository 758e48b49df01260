use crate::options::CycleBreaking;
use rustc_hash::FxHashSet;
use scratchrobin_graph::{Graph, alg};

/// Distinct non-loop edges in input order, with feedback edges reversed when requested.
///
/// Ranking only needs the simple graph, so parallel edges collapse onto their first occurrence
/// and self-loops are dropped.
pub(super) fn oriented_edges(g: &Graph, cycle_breaking: CycleBreaking) -> Vec<(usize, usize)> {
    let edges = dedup(g.proper_edges());
    match cycle_breaking {
        CycleBreaking::Legacy => {
            if tracing::enabled!(tracing::Level::DEBUG) {
                let cycles = alg::find_cycles(g);
                if !cycles.is_empty() {
                    tracing::debug!(
                        cycles = cycles.len(),
                        "ranking cyclic input with the legacy patch"
                    );
                }
            }
            edges
        }
        CycleBreaking::GreedyFeedbackArcSet => reverse(edges, alg::greedy_fas(g)),
        CycleBreaking::DepthFirstFeedbackArcSet => reverse(edges, alg::dfs_fas(g)),
    }
}

fn reverse(edges: Vec<(usize, usize)>, fas: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    if fas.is_empty() {
        return edges;
    }
    tracing::debug!(reversed = fas.len(), "reversing feedback arc set");
    let fas: FxHashSet<(usize, usize)> = fas.into_iter().collect();
    dedup(
        edges
            .into_iter()
            .map(|e| if fas.contains(&e) { (e.1, e.0) } else { e }),
    )
}

fn dedup(edges: impl IntoIterator<Item = (usize, usize)>) -> Vec<(usize, usize)> {
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    edges.into_iter().filter(|e| seen.insert(*e)).collect()
}
