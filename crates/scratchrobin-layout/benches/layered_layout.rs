use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scratchrobin_layout::{
    CycleBreaking, EdgeSpec, ForceDirectedLayout, Graph, LayeredLayout, LayoutEngine,
    LayoutOptions, NodeSpec,
};
use std::hint::black_box;
use std::time::Duration;

fn build_graph(name: &str, node_count: usize, fanout: usize) -> Graph {
    let ids: Vec<String> = (0..node_count).map(|i| format!("{name}_n{i}")).collect();
    let mut edges: Vec<EdgeSpec> = Vec::new();

    // A spine to guarantee connectivity.
    for i in 0..node_count.saturating_sub(1) {
        edges.push(EdgeSpec::new(&ids[i], &ids[i + 1]));
    }

    // Extra forward edges to create crossing pressure, plus a few back edges.
    for i in 0..node_count {
        for k in 2..=(fanout + 1) {
            let to = i + k;
            if to >= node_count {
                break;
            }
            edges.push(EdgeSpec::new(&ids[i], &ids[to]));
        }
        if i % 17 == 16 {
            edges.push(EdgeSpec::new(&ids[i], &ids[i - 10]));
        }
    }

    Graph::from_parts(ids.iter().map(NodeSpec::new), edges)
        .unwrap_or_else(|err| panic!("bench graph: {err}"))
}

fn bench_layered(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("g_50_f2", 50usize, 2usize),
        ("g_200_f3", 200usize, 3usize),
        ("g_400_f3", 400usize, 3usize),
    ];

    for (name, nodes, fanout) in cases {
        let g = build_graph(name, nodes, fanout);
        for (label, cycle_breaking) in [
            ("legacy", CycleBreaking::Legacy),
            ("greedy_fas", CycleBreaking::GreedyFeedbackArcSet),
            ("dfs_fas", CycleBreaking::DepthFirstFeedbackArcSet),
        ] {
            let opts = LayoutOptions {
                cycle_breaking,
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(label, name), &g, |b, g| {
                b.iter(|| black_box(LayeredLayout.layout(black_box(g), &opts)))
            });
        }
    }

    group.finish();
}

fn bench_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_layout");
    let opts = LayoutOptions::default().with_seed(1);
    for (name, nodes) in [("g_50", 50usize), ("g_200", 200usize)] {
        let g = build_graph(name, nodes, 1);
        group.bench_with_input(BenchmarkId::new("force", name), &g, |b, g| {
            b.iter(|| black_box(ForceDirectedLayout::new().layout(black_box(g), &opts)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layered, bench_force);
criterion_main!(benches);
