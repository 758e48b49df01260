use scratchrobin_graph::{EdgeSpec, Error, Graph, NodeSpec};

fn nodes(ids: &[&str]) -> Vec<NodeSpec> {
    ids.iter().map(|id| NodeSpec::new(*id)).collect()
}

#[test]
fn from_parts_keeps_node_insertion_order() {
    let g = Graph::from_parts(nodes(&["c", "a", "b"]), []).unwrap();
    let ids: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(g.index_of("a"), Some(1));
    assert_eq!(g.index_of("missing"), None);
}

#[test]
fn from_parts_rejects_duplicate_ids() {
    let err = Graph::from_parts(nodes(&["a", "b", "a"]), []).unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateNode {
            id: "a".to_string()
        }
    );
}

#[test]
fn from_parts_dedup_keeps_the_first_occurrence() {
    let g = Graph::from_parts_dedup(
        vec![
            NodeSpec::new("a").with_size(10.0, 10.0),
            NodeSpec::new("b"),
            NodeSpec::new("a").with_size(99.0, 99.0),
        ],
        [EdgeSpec::new("a", "b")],
    );
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.node(0).unwrap().size(), Some((10.0, 10.0)));
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn edges_with_unknown_endpoints_are_dropped() {
    let g = Graph::from_parts(
        nodes(&["a", "b"]),
        [
            EdgeSpec::new("a", "b"),
            EdgeSpec::new("a", "ghost"),
            EdgeSpec::new("ghost", "b"),
        ],
    )
    .unwrap();
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.dropped_edges(), 2);
    assert_eq!(g.successors(0), &[1]);
    assert_eq!(g.predecessors(1), &[0]);
}

#[test]
fn multi_edges_and_self_loops_are_accepted() {
    let g = Graph::from_parts(
        nodes(&["a", "b"]),
        [
            EdgeSpec::new("a", "b"),
            EdgeSpec::new("a", "b"),
            EdgeSpec::new("b", "b"),
        ],
    )
    .unwrap();
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.successors(0), &[1, 1]);
    assert_eq!(g.proper_edges().count(), 2);
}

#[test]
fn out_of_range_indices_have_no_neighbors() {
    let g = Graph::new();
    assert!(g.is_empty());
    assert!(g.successors(7).is_empty());
    assert!(g.predecessors(7).is_empty());
    assert!(g.node(0).is_none());
}

#[test]
fn edge_specs_resolve_back_to_ids() {
    let g = Graph::from_parts(nodes(&["a", "b", "c"]), [EdgeSpec::new("b", "c")]).unwrap();
    assert_eq!(g.edge_specs().collect::<Vec<_>>(), vec![EdgeSpec::new("b", "c")]);
}

#[test]
fn node_specs_deserialize_with_optional_fields() {
    let n: NodeSpec = serde_json::from_str(r#"{"id":"orders","width":180,"height":90}"#).unwrap();
    assert_eq!(n.id, "orders");
    assert_eq!(n.size(), Some((180.0, 90.0)));
    assert!(!n.pinned);
    assert_eq!(n.weight, None);
}

#[test]
fn edge_specs_accept_legacy_field_names() {
    let e: EdgeSpec =
        serde_json::from_str(r#"{"source_id":"orders","target_id":"customers"}"#).unwrap();
    assert_eq!(e, EdgeSpec::new("orders", "customers"));
}

#[test]
fn version_matches_cargo_pkg_version() {
    assert_eq!(scratchrobin_graph::VERSION, env!("CARGO_PKG_VERSION"));
}
