use rustc_hash::FxHashSet;
use scratchrobin_layout::orthogonal::assign_grid;
use scratchrobin_layout::{
    EdgeSpec, Graph, LayoutEngine, LayoutOptions, NodePosition, NodeSpec, OrthogonalLayout,
};

fn nodes(n: usize) -> Graph {
    Graph::from_parts((0..n).map(|i| NodeSpec::new(format!("n{i}"))), Vec::<EdgeSpec>::new())
        .unwrap()
}

fn run(g: &Graph, opts: &LayoutOptions) -> Vec<NodePosition> {
    OrthogonalLayout.layout(g, opts).unwrap()
}

fn corners(positions: &[NodePosition]) -> Vec<(f64, f64)> {
    positions.iter().map(|p| (p.x, p.y)).collect()
}

#[test]
fn empty_graph_yields_no_positions() {
    assert!(run(&Graph::new(), &LayoutOptions::default()).is_empty());
    assert!(assign_grid(0).is_empty());
}

#[test]
fn nodes_fill_rows_in_input_order() {
    let positions = run(&nodes(5), &LayoutOptions::default());
    assert_eq!(
        corners(&positions),
        vec![
            (50.0, 50.0),
            (200.0, 50.0),
            (350.0, 50.0),
            (50.0, 170.0),
            (200.0, 170.0),
        ]
    );
    assert!(positions.iter().all(|p| (p.width, p.height) == (140.0, 80.0)));
}

#[test]
fn grid_cells_are_unique_and_within_the_column_count() {
    for n in [1usize, 2, 3, 4, 9, 10, 17, 100] {
        let cells = assign_grid(n);
        let columns = (n as f64).sqrt().ceil() as usize;
        let unique: FxHashSet<(usize, usize)> = cells.iter().copied().collect();
        assert_eq!(unique.len(), n);
        assert!(cells.iter().all(|&(c, _)| c < columns));
    }
}

#[test]
fn edges_do_not_affect_placement() {
    let with_edges = Graph::from_parts(
        (0..4).map(|i| NodeSpec::new(format!("n{i}"))),
        vec![EdgeSpec::new("n3", "n0"), EdgeSpec::new("n1", "n1")],
    )
    .unwrap();
    let opts = LayoutOptions::default();
    assert_eq!(run(&with_edges, &opts), run(&nodes(4), &opts));
}

#[test]
fn use_ports_is_accepted_but_inert() {
    let g = nodes(3);
    let with_ports = LayoutOptions {
        use_ports: true,
        ..Default::default()
    };
    let without_ports = LayoutOptions {
        use_ports: false,
        ..Default::default()
    };
    assert_eq!(run(&g, &with_ports), run(&g, &without_ports));
}

#[test]
fn compaction_packs_columns_and_rows_by_extent() {
    let g = Graph::from_parts(
        vec![
            NodeSpec::new("a").with_size(40.0, 30.0),
            NodeSpec::new("b").with_size(60.0, 20.0),
            NodeSpec::new("c").with_size(50.0, 10.0),
            NodeSpec::new("d").with_size(10.0, 10.0),
        ],
        Vec::<EdgeSpec>::new(),
    )
    .unwrap();
    let opts = LayoutOptions {
        compact_grid: true,
        grid_gap: 5.0,
        padding: 0.0,
        ..Default::default()
    };
    assert_eq!(
        corners(&run(&g, &opts)),
        vec![(0.0, 0.0), (55.0, 0.0), (0.0, 35.0), (55.0, 35.0)]
    );
}
