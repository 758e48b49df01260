use scratchrobin_layout::{
    EdgeSpec, Graph, LayoutAlgorithm, LayoutEngine, LayoutOptions, NodeSpec, OrthogonalLayout,
    create, create_from_str, layout,
};

fn chain() -> Graph {
    Graph::from_parts(
        ["a", "b", "c"].map(NodeSpec::new),
        [("a", "b"), ("b", "c")].map(|(v, w)| EdgeSpec::new(v, w)),
    )
    .unwrap()
}

#[test]
fn each_algorithm_maps_to_its_engine() {
    assert_eq!(create(LayoutAlgorithm::Layered).name(), "sugiyama");
    assert_eq!(create(LayoutAlgorithm::ForceDirected).name(), "force");
    assert_eq!(create(LayoutAlgorithm::Orthogonal).name(), "orthogonal");
    assert_eq!(create(LayoutAlgorithm::External).name(), "graphviz");
}

#[test]
fn circular_and_unknown_names_fall_back_to_layered() {
    assert_eq!(create(LayoutAlgorithm::Circular).name(), "sugiyama");
    assert_eq!(create_from_str("circular").name(), "sugiyama");
    assert_eq!(create_from_str("definitely-not-an-algorithm").name(), "sugiyama");
    assert_eq!(create_from_str("forcedirected").name(), "force");
    assert_eq!(create_from_str("dot").name(), "graphviz");
}

#[test]
fn layout_dispatches_on_the_selected_algorithm() {
    let g = chain();
    let opts = LayoutOptions::default().with_algorithm(LayoutAlgorithm::Orthogonal);
    assert_eq!(layout(&g, &opts).unwrap(), OrthogonalLayout.layout(&g, &opts).unwrap());
}

#[test]
fn every_algorithm_returns_one_position_per_node() {
    let g = chain();
    for algorithm in LayoutAlgorithm::ALL {
        let opts = LayoutOptions {
            algorithm,
            seed: Some(1),
            // Keep the external engine on its silent fallback path.
            external_program: "scratchrobin-missing-layout-tool".to_string(),
            ..Default::default()
        };
        let positions = layout(&g, &opts).unwrap();
        assert_eq!(positions.len(), 3, "{algorithm}");
        assert!(positions.iter().all(|p| p.is_finite()), "{algorithm}");
    }
}

#[test]
fn engines_are_reusable_across_threads() {
    let engine = create(LayoutAlgorithm::Layered);
    let g = chain();
    let opts = LayoutOptions::default();
    let expected = engine.layout(&g, &opts).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.layout(&g, &opts).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
