//! Helper algorithms over [`Graph`]: cycle detection and feedback arc sets.
//!
//! All results are expressed in node indices and are deterministic for a given insertion order.

use crate::Graph;
use std::collections::VecDeque;

/// Strongly connected components that contain a cycle: SCCs with more than one node, plus
/// single nodes carrying a self-loop. Members are sorted by insertion order.
pub fn find_cycles(g: &Graph) -> Vec<Vec<usize>> {
    struct Tarjan<'a> {
        g: &'a Graph,
        index: usize,
        stack: Vec<usize>,
        on_stack: Vec<bool>,
        indices: Vec<Option<usize>>,
        lowlink: Vec<usize>,
        sccs: Vec<Vec<usize>>,
    }

    impl Tarjan<'_> {
        // Iterative form of Tarjan's `strongconnect`; frames hold `(node, next successor slot)`.
        fn strongconnect(&mut self, root: usize) {
            let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
            self.visit(root);

            let g = self.g;
            while let Some(frame) = frames.last_mut() {
                let v = frame.0;
                let succ = g.successors(v);
                if frame.1 < succ.len() {
                    let w = succ[frame.1];
                    frame.1 += 1;
                    match self.indices[w] {
                        None => {
                            self.visit(w);
                            frames.push((w, 0));
                        }
                        Some(w_idx) if self.on_stack[w] => {
                            self.lowlink[v] = self.lowlink[v].min(w_idx);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
                }
                if Some(self.lowlink[v]) == self.indices[v] {
                    let mut scc: Vec<usize> = Vec::new();
                    while let Some(w) = self.stack.pop() {
                        self.on_stack[w] = false;
                        scc.push(w);
                        if w == v {
                            break;
                        }
                    }
                    self.sccs.push(scc);
                }
            }
        }

        fn visit(&mut self, v: usize) {
            self.indices[v] = Some(self.index);
            self.lowlink[v] = self.index;
            self.index += 1;
            self.stack.push(v);
            self.on_stack[v] = true;
        }
    }

    let n = g.node_count();
    let mut tarjan = Tarjan {
        g,
        index: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        indices: vec![None; n],
        lowlink: vec![0; n],
        sccs: Vec::new(),
    };
    for v in 0..n {
        if tarjan.indices[v].is_none() {
            tarjan.strongconnect(v);
        }
    }

    let mut cycles: Vec<Vec<usize>> = Vec::new();
    for mut scc in tarjan.sccs {
        if scc.len() > 1 {
            scc.sort_unstable();
            cycles.push(scc);
        } else if g.successors(scc[0]).contains(&scc[0]) {
            cycles.push(scc);
        }
    }
    cycles.sort_by_key(|c| c.first().copied());
    cycles
}

/// Back edges found by a depth-first walk started from each node in insertion order.
///
/// Parallel edges are reported once per `(source, target)` pair; self-loops are skipped.
pub fn dfs_fas(g: &Graph) -> Vec<(usize, usize)> {
    let n = g.node_count();
    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];
    let mut fas: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        on_stack[root] = true;
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            let succ = g.successors(v);
            if frame.1 >= succ.len() {
                on_stack[v] = false;
                frames.pop();
                continue;
            }
            let w = succ[frame.1];
            frame.1 += 1;
            if v == w {
                continue;
            }
            if on_stack[w] {
                if !fas.contains(&(v, w)) {
                    fas.push((v, w));
                }
            } else if !visited[w] {
                visited[w] = true;
                on_stack[w] = true;
                frames.push((w, 0));
            }
        }
    }
    fas
}

/// Greedy feedback arc set (Eades, Lin & Smyth).
///
/// Parallel edges are aggregated into one weighted edge; the result lists each reversed
/// `(source, target)` pair once. Self-loops never appear in the result.
pub fn greedy_fas(g: &Graph) -> Vec<(usize, usize)> {
    let n = g.node_count();
    if n <= 1 {
        return Vec::new();
    }

    // Aggregate multi-edges, keeping the order of each pair's first occurrence.
    let mut pair_weight: rustc_hash::FxHashMap<(usize, usize), i64> = Default::default();
    let mut pair_order: Vec<(usize, usize)> = Vec::new();
    for (v, w) in g.proper_edges() {
        let slot = pair_weight.entry((v, w)).or_insert_with(|| {
            pair_order.push((v, w));
            0
        });
        *slot += 1;
    }

    let mut in_w: Vec<i64> = vec![0; n];
    let mut out_w: Vec<i64> = vec![0; n];
    let mut in_edges: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    let mut out_edges: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    for &(v, w) in &pair_order {
        let wgt = pair_weight.get(&(v, w)).copied().unwrap_or(0);
        out_w[v] += wgt;
        in_w[w] += wgt;
        out_edges[v].push((w, wgt));
        in_edges[w].push((v, wgt));
    }
    let max_out = out_w.iter().copied().max().unwrap_or(0);
    let max_in = in_w.iter().copied().max().unwrap_or(0);

    let mut work = FasWork {
        buckets: (0..(max_out + max_in + 3).max(3) as usize)
            .map(|_| VecDeque::new())
            .collect(),
        zero_idx: max_in + 1,
        bucket_of: vec![None; n],
        alive: vec![true; n],
        alive_count: n,
        in_w,
        out_w,
        in_edges: &in_edges,
        out_edges: &out_edges,
    };
    for v in 0..n {
        work.assign_bucket(v);
    }

    let mut results: Vec<(usize, usize)> = Vec::new();
    while work.alive_count > 0 {
        // Drain sinks, then sources.
        while let Some(v) = work.pop_bucket(0) {
            work.remove_node(v, None);
        }
        let last = work.buckets.len() - 1;
        while let Some(v) = work.pop_bucket(last) {
            work.remove_node(v, None);
        }
        if work.alive_count == 0 {
            break;
        }

        let picked = (1..last).rev().find_map(|i| work.pop_bucket(i));
        let Some(v) = picked else {
            // Every live node sits in an extreme bucket; the next pass drains it.
            match (0..n).find(|&v| work.alive[v]) {
                Some(v) => work.remove_node(v, None),
                None => break,
            }
            continue;
        };
        work.remove_node(v, Some(&mut results));
    }
    results
}

struct FasWork<'a> {
    buckets: Vec<VecDeque<usize>>,
    zero_idx: i64,
    bucket_of: Vec<Option<usize>>,
    alive: Vec<bool>,
    alive_count: usize,
    in_w: Vec<i64>,
    out_w: Vec<i64>,
    in_edges: &'a [Vec<(usize, i64)>],
    out_edges: &'a [Vec<(usize, i64)>],
}

impl FasWork<'_> {
    fn pop_bucket(&mut self, idx: usize) -> Option<usize> {
        while let Some(v) = self.buckets[idx].pop_back() {
            if self.alive[v] && self.bucket_of[v] == Some(idx) {
                self.bucket_of[v] = None;
                return Some(v);
            }
        }
        None
    }

    fn assign_bucket(&mut self, v: usize) {
        if let Some(prev) = self.bucket_of[v] {
            if let Some(pos) = self.buckets[prev].iter().position(|&x| x == v) {
                self.buckets[prev].remove(pos);
            }
        }
        let last = self.buckets.len() - 1;
        let idx = if self.out_w[v] == 0 {
            0
        } else if self.in_w[v] == 0 {
            last
        } else {
            (self.out_w[v] - self.in_w[v] + self.zero_idx).clamp(0, last as i64) as usize
        };
        self.buckets[idx].push_front(v);
        self.bucket_of[v] = Some(idx);
    }

    fn remove_node(&mut self, v: usize, predecessors: Option<&mut Vec<(usize, usize)>>) {
        if !self.alive[v] {
            return;
        }
        self.alive[v] = false;
        self.alive_count -= 1;
        self.bucket_of[v] = None;

        let (in_edges, out_edges) = (self.in_edges, self.out_edges);
        if let Some(preds) = predecessors {
            for &(u, _) in &in_edges[v] {
                if self.alive[u] {
                    preds.push((u, v));
                }
            }
        }
        for &(u, wgt) in &in_edges[v] {
            if self.alive[u] {
                self.out_w[u] -= wgt;
                self.assign_bucket(u);
            }
        }
        for &(w, wgt) in &out_edges[v] {
            if self.alive[w] {
                self.in_w[w] -= wgt;
                self.assign_bucket(w);
            }
        }
    }
}
