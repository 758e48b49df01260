//! Grid layout.
//!
//! Nodes fill a square grid row by row in input order, ignoring edges. Without compaction every
//! cell is `node_spacing` wide and `level_spacing` tall. With `compact_grid` each column is as
//! wide as its widest node and each row as tall as its tallest, separated by `grid_gap`.

use crate::engine::LayoutEngine;
use crate::error::Result;
use crate::model::{NodePosition, node_size};
use crate::options::LayoutOptions;
use scratchrobin_graph::Graph;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrthogonalLayout;

/// `(column, row)` cell of each of `n` nodes in a grid of `ceil(sqrt(n))` columns.
pub fn assign_grid(n: usize) -> Vec<(usize, usize)> {
    let columns = grid_columns(n);
    (0..n).map(|i| (i % columns, i / columns)).collect()
}

fn grid_columns(n: usize) -> usize {
    let mut columns = (n as f64).sqrt().ceil() as usize;
    // Guard against float rounding on large perfect squares.
    while columns * columns < n {
        columns += 1;
    }
    columns.max(1)
}

impl LayoutEngine for OrthogonalLayout {
    fn name(&self) -> &'static str {
        "orthogonal"
    }

    fn layout(&self, graph: &Graph, options: &LayoutOptions) -> Result<Vec<NodePosition>> {
        let options = options.sanitized();
        let _span = tracing::debug_span!(
            "orthogonal_layout",
            nodes = graph.node_count(),
            compact = options.compact_grid
        )
        .entered();

        let cells = assign_grid(graph.node_count());
        let sizes: Vec<(f64, f64)> = graph
            .nodes()
            .iter()
            .map(|n| node_size(n, &options))
            .collect();

        let (col_x, row_y) = if options.compact_grid {
            packed_offsets(&cells, &sizes, &options)
        } else {
            uniform_offsets(&cells, &options)
        };

        Ok(graph
            .nodes()
            .iter()
            .zip(cells)
            .zip(sizes)
            .map(|((node, (c, r)), size)| NodePosition::new(&node.id, col_x[c], row_y[r], size))
            .collect())
    }
}

fn uniform_offsets(cells: &[(usize, usize)], options: &LayoutOptions) -> (Vec<f64>, Vec<f64>) {
    let (columns, rows) = grid_dims(cells);
    let col_x = (0..columns)
        .map(|c| options.padding + c as f64 * options.node_spacing)
        .collect();
    let row_y = (0..rows)
        .map(|r| options.padding + r as f64 * options.level_spacing)
        .collect();
    (col_x, row_y)
}

fn packed_offsets(
    cells: &[(usize, usize)],
    sizes: &[(f64, f64)],
    options: &LayoutOptions,
) -> (Vec<f64>, Vec<f64>) {
    let (columns, rows) = grid_dims(cells);
    let mut col_w = vec![0.0f64; columns];
    let mut row_h = vec![0.0f64; rows];
    for (&(c, r), &(w, h)) in cells.iter().zip(sizes) {
        col_w[c] = col_w[c].max(w);
        row_h[r] = row_h[r].max(h);
    }
    (
        running_offsets(&col_w, options.padding, options.grid_gap),
        running_offsets(&row_h, options.padding, options.grid_gap),
    )
}

fn running_offsets(extents: &[f64], start: f64, gap: f64) -> Vec<f64> {
    let mut at = start;
    extents
        .iter()
        .map(|&e| {
            let offset = at;
            at += e + gap;
            offset
        })
        .collect()
}

fn grid_dims(cells: &[(usize, usize)]) -> (usize, usize) {
    cells.iter().fold((0, 0), |(cols, rows), &(c, r)| {
        (cols.max(c + 1), rows.max(r + 1))
    })
}
