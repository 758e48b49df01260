use super::LayerGraph;

/// Fills `lg.edges` from the ranked input edges.
///
/// Every edge is oriented from its lower to its higher layer; edges inside a single layer carry
/// no ordering information and are skipped. With `insert_dummies`, an edge spanning `k > 1`
/// layers is split into a chain through `k - 1` dummy nodes so that ordering sees it on every
/// layer it crosses.
pub(super) fn run(lg: &mut LayerGraph, edges: &[(usize, usize)], insert_dummies: bool) {
    for &(v, w) in edges {
        let (top, bottom) = match lg.rank[v].cmp(&lg.rank[w]) {
            std::cmp::Ordering::Less => (v, w),
            std::cmp::Ordering::Greater => (w, v),
            std::cmp::Ordering::Equal => continue,
        };

        let bottom_rank = lg.rank[bottom];
        let mut prev = top;
        if insert_dummies {
            for r in lg.rank[top] + 1..bottom_rank {
                let dummy = lg.add_dummy(r);
                lg.edges.push((prev, dummy));
                prev = dummy;
            }
        }
        lg.edges.push((prev, bottom));
    }
}
