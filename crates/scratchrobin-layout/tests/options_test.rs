use scratchrobin_layout::{CycleBreaking, Direction, Error, LayoutAlgorithm, LayoutOptions};

#[test]
fn defaults_match_the_documented_values() {
    let o = LayoutOptions::default();
    assert_eq!(o.algorithm, LayoutAlgorithm::Layered);
    assert_eq!((o.node_spacing, o.level_spacing, o.padding), (150.0, 120.0, 50.0));
    assert!(o.minimize_crossings);
    assert_eq!(o.max_iterations, 10);
    assert_eq!(
        (o.repulsion_force, o.attraction_force, o.damping),
        (1000.0, 0.01, 0.9)
    );
    assert_eq!((o.fd_iterations, o.min_velocity), (100, 0.1));
    assert!(o.use_ports);
    assert_eq!(o.direction, Direction::TopDown);
    assert_eq!(o.seed, None);
    assert_eq!(o.cycle_breaking, CycleBreaking::Legacy);
    assert!(o.insert_dummy_nodes && o.honor_node_sizes);
    assert!(!o.compact_grid && !o.strict_external);
    assert_eq!(o.external_program, "dot");
    assert_eq!(o.external_timeout_ms, Some(30_000));
}

#[test]
fn algorithm_names_and_synonyms() {
    let cases = [
        ("sugiyama", LayoutAlgorithm::Layered),
        ("Layered", LayoutAlgorithm::Layered),
        ("hierarchical", LayoutAlgorithm::Layered),
        ("force", LayoutAlgorithm::ForceDirected),
        ("forcedirected", LayoutAlgorithm::ForceDirected),
        (" Force-Directed ", LayoutAlgorithm::ForceDirected),
        ("orthogonal", LayoutAlgorithm::Orthogonal),
        ("circular", LayoutAlgorithm::Circular),
        ("graphviz", LayoutAlgorithm::External),
        ("DOT", LayoutAlgorithm::External),
        ("no-such-layout", LayoutAlgorithm::Layered),
        ("", LayoutAlgorithm::Layered),
    ];
    for (name, expected) in cases {
        assert_eq!(name.parse::<LayoutAlgorithm>(), Ok(expected), "{name:?}");
    }
}

#[test]
fn canonical_names_parse_back() {
    for algorithm in LayoutAlgorithm::ALL {
        assert_eq!(LayoutAlgorithm::parse_lossy(&algorithm.to_string()), algorithm);
    }
    assert_eq!(
        LayoutAlgorithm::available(),
        vec!["sugiyama", "force", "orthogonal", "circular", "graphviz"]
    );
}

#[test]
fn direction_parsing_is_lenient() {
    assert_eq!(Direction::parse_lossy("LR"), Direction::LeftRight);
    assert_eq!(Direction::parse_lossy("rl"), Direction::RightLeft);
    assert_eq!(Direction::parse_lossy("bottom-up"), Direction::BottomUp);
    assert_eq!(Direction::parse_lossy("sideways"), Direction::TopDown);
    assert!(Direction::LeftRight.is_horizontal() && !Direction::LeftRight.is_reversed());
    assert!(Direction::BottomUp.is_reversed() && !Direction::BottomUp.is_horizontal());
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let o = LayoutOptions::from_json_str(
        r#"{"algorithm": "force", "node_spacing": 80, "direction": "LR", "seed": 7}"#,
    )
    .unwrap();
    assert_eq!(o.algorithm, LayoutAlgorithm::ForceDirected);
    assert_eq!(o.node_spacing, 80.0);
    assert_eq!(o.direction, Direction::LeftRight);
    assert_eq!(o.seed, Some(7));
    assert_eq!(o.level_spacing, 120.0);
    assert_eq!(o.fd_iterations, 100);
}

#[test]
fn unknown_algorithm_in_json_selects_layered() {
    let o = LayoutOptions::from_json_str(r#"{"algorithm": "spectral"}"#).unwrap();
    assert_eq!(o.algorithm, LayoutAlgorithm::Layered);
}

#[test]
fn non_string_selectors_fall_back_to_defaults() {
    for json in [
        r#"{"algorithm": 1}"#,
        r#"{"algorithm": null}"#,
        r#"{"algorithm": {"name": "force"}}"#,
        r#"{"algorithm": ["force"], "direction": 3}"#,
        r#"{"direction": false}"#,
    ] {
        let o = LayoutOptions::from_json_str(json).unwrap();
        assert_eq!(o.algorithm, LayoutAlgorithm::Layered, "{json}");
        assert_eq!(o.direction, Direction::TopDown, "{json}");
    }

    let o = LayoutOptions::from_json_str(r#"{"algorithm": 7, "node_spacing": 90}"#).unwrap();
    assert_eq!(o.node_spacing, 90.0);
}

#[test]
fn cycle_breaking_accepts_short_alias() {
    let o = LayoutOptions::from_json_str(r#"{"cycle_breaking": "greedy"}"#).unwrap();
    assert_eq!(o.cycle_breaking, CycleBreaking::GreedyFeedbackArcSet);
    let o = LayoutOptions::from_json_str(r#"{"cycle_breaking": "greedy-feedback-arc-set"}"#)
        .unwrap();
    assert_eq!(o.cycle_breaking, CycleBreaking::GreedyFeedbackArcSet);
    let o = LayoutOptions::from_json_str(r#"{"cycle_breaking": "dfs"}"#).unwrap();
    assert_eq!(o.cycle_breaking, CycleBreaking::DepthFirstFeedbackArcSet);
    let o = LayoutOptions::from_json_str(r#"{"cycle_breaking": "depth-first-feedback-arc-set"}"#)
        .unwrap();
    assert_eq!(o.cycle_breaking, CycleBreaking::DepthFirstFeedbackArcSet);
}

#[test]
fn serialized_options_load_back_unchanged() {
    let o = LayoutOptions {
        algorithm: LayoutAlgorithm::Orthogonal,
        direction: Direction::RightLeft,
        compact_grid: true,
        seed: Some(99),
        ..Default::default()
    };
    let json = o.to_json_string().unwrap();
    assert!(json.contains(r#""algorithm":"orthogonal""#));
    assert!(json.contains(r#""direction":"RL""#));
    assert_eq!(LayoutOptions::from_json_str(&json).unwrap(), o);
}

#[test]
fn wrongly_typed_fields_are_reported() {
    let err = LayoutOptions::from_json_str(r#"{"node_spacing": "wide"}"#).unwrap_err();
    assert!(matches!(err, Error::Options(_)));
    assert!(err.to_string().starts_with("invalid layout options"));
}
