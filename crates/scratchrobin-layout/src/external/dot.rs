use crate::model::node_size;
use crate::options::LayoutOptions;
use scratchrobin_graph::Graph;
use std::fmt::Write as _;

/// Points per inch; Graphviz sizes are in inches.
pub(crate) const POINTS_PER_INCH: f64 = 72.0;

/// Serializes `graph` as a DOT digraph.
///
/// Every node is emitted with a fixed-size box matching the size the layout reports, so the
/// tool spaces nodes for their real extent.
pub fn to_dot(graph: &Graph, options: &LayoutOptions) -> String {
    let mut out = String::new();
    out.push_str("digraph G {\n");
    let _ = writeln!(
        out,
        "  graph [bgcolor=\"white\", dpi=\"96\", rankdir=\"{}\"];",
        options.direction.as_str()
    );
    out.push_str("  node [shape=\"box\", style=\"filled\", fillcolor=\"lightblue\", fixedsize=\"true\"];\n");
    out.push_str("  edge [color=\"gray\"];\n\n");

    for node in graph.nodes() {
        let (w, h) = node_size(node, options);
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\", width=\"{}\", height=\"{}\"];",
            escape(&node.id),
            escape(node.label_or_id()),
            inches(w),
            inches(h)
        );
    }
    out.push('\n');

    for &(v, w) in graph.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            escape(&graph.nodes()[v].id),
            escape(&graph.nodes()[w].id)
        );
    }
    out.push_str("}\n");
    out
}

fn inches(points: f64) -> String {
    let v = points / POINTS_PER_INCH;
    let s = format!("{v:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Escapes a string for use inside a DOT double-quoted string.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}
