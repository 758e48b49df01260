//! Parsing of layout tool output.
//!
//! Two line shapes are understood:
//!
//! - Graphviz `-Tplain` records: `graph <scale> <width> <height>` followed by
//!   `node <name> <x> <y> <width> <height> ...`, where coordinates are node centres in inches
//!   measured from the bottom-left corner.
//! - Attribute lines `<id> [pos="x,y"]`, whose position is taken verbatim as the top-left corner.
//!
//! Lines that fail to parse are skipped one by one; lines naming unknown nodes are ignored.

use super::dot::POINTS_PER_INCH;
use crate::model::{EXTERNAL_NODE_HEIGHT, EXTERNAL_NODE_WIDTH, NodePosition, node_size};
use crate::options::LayoutOptions;
use indexmap::IndexMap;
use scratchrobin_graph::Graph;

/// Positions keyed by node index, in the order the tool reported them. A node reported twice
/// keeps its last position.
pub fn parse(
    output: &str,
    graph: &Graph,
    options: &LayoutOptions,
) -> IndexMap<usize, NodePosition> {
    let mut placed: IndexMap<usize, NodePosition> = IndexMap::new();
    let mut graph_height: Option<f64> = None;
    let mut skipped = 0usize;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let is_pos_line = line.contains("[pos=\"");
        let parsed = if is_pos_line {
            parse_pos_line(line).map(|(id, x, y)| {
                (id, NodePosition::new("", x, y, (EXTERNAL_NODE_WIDTH, EXTERNAL_NODE_HEIGHT)))
            })
        } else {
            let tokens = tokenize(line);
            match tokens.first().map(String::as_str) {
                Some("graph") => {
                    graph_height = tokens.get(3).and_then(|t| parse_finite(t));
                    continue;
                }
                Some("node") => parse_node_record(&tokens, graph_height),
                _ => continue,
            }
        };

        let Some((id, mut pos)) = parsed else {
            skipped += 1;
            continue;
        };
        let Some(ix) = graph.index_of(&id) else {
            tracing::debug!(%id, "ignoring position for unknown node");
            continue;
        };
        let node = &graph.nodes()[ix];
        if !is_pos_line {
            (pos.width, pos.height) = node_size(node, options);
            pos.x -= pos.width / 2.0;
            pos.y -= pos.height / 2.0;
            pos.x += options.padding;
            pos.y += options.padding;
        }
        pos.node_id = node.id.clone();
        placed.insert(ix, pos);
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped malformed layout lines");
    }
    placed
}

/// `id [pos="x,y"]` with an optionally quoted id.
fn parse_pos_line(line: &str) -> Option<(String, f64, f64)> {
    let attr = line.find("[pos=\"")?;
    let id = unquote(line[..attr].trim())?;
    let rest = &line[attr + 6..];
    let end = rest.find('"')?;
    let (x, y) = rest[..end].split_once(',')?;
    Some((id, parse_finite(x.trim())?, parse_finite(y.trim())?))
}

/// `node name x y width height ...`, returning the node centre in screen points.
fn parse_node_record(
    tokens: &[String],
    graph_height: Option<f64>,
) -> Option<(String, NodePosition)> {
    let id = tokens.get(1)?.clone();
    let x = parse_finite(tokens.get(2)?)?;
    let y = parse_finite(tokens.get(3)?)?;
    let cx = x * POINTS_PER_INCH;
    let cy = match graph_height {
        Some(h) => (h - y) * POINTS_PER_INCH,
        None => y * POINTS_PER_INCH,
    };
    Some((id, NodePosition::new("", cx, cy, (0.0, 0.0))))
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn unquote(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('"') {
        let inner = inner.strip_suffix('"')?;
        return Some(unescape(inner));
    }
    Some(s.to_string())
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Splits a plain-format line on whitespace, keeping double-quoted tokens whole.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if ch == '"' {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '"' => break,
                    '\\' => match chars.next() {
                        Some('n') => token.push('\n'),
                        Some(other) => token.push(other),
                        None => {}
                    },
                    _ => token.push(c),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}
