//! Direction handling.
//!
//! The pipeline always works top to bottom. For horizontal directions the node extents are
//! swapped up front and the coordinates swapped back at the end; reversed directions mirror the
//! depth axis so that the first layer ends up at the far side.

use super::LayerGraph;
use crate::options::Direction;

/// Maps `(width, height)` sizes onto `(lateral, depth)` extents.
pub(super) fn adjust(sizes: &[(f64, f64)], direction: Direction) -> Vec<(f64, f64)> {
    if direction.is_horizontal() {
        sizes.iter().map(|&(w, h)| (h, w)).collect()
    } else {
        sizes.to_vec()
    }
}

/// Maps `(lateral, depth)` corners back to screen `(x, y)` corners.
pub(super) fn undo(coords: &mut [(f64, f64)], lg: &LayerGraph, direction: Direction, padding: f64) {
    if direction.is_reversed() {
        reverse_depth(coords, lg, padding);
    }
    if direction.is_horizontal() {
        for c in coords.iter_mut() {
            *c = (c.1, c.0);
        }
    }
}

fn reverse_depth(coords: &mut [(f64, f64)], lg: &LayerGraph, padding: f64) {
    let far = coords
        .iter()
        .zip(&lg.extent)
        .map(|(c, e)| c.1 + e.1)
        .fold(f64::NEG_INFINITY, f64::max);
    if !far.is_finite() {
        return;
    }
    for (c, e) in coords.iter_mut().zip(&lg.extent) {
        c.1 = far - (c.1 + e.1) + padding;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lg(extent: Vec<(f64, f64)>) -> LayerGraph {
        LayerGraph {
            real_count: extent.len(),
            rank: vec![0; extent.len()],
            extent,
            edges: vec![],
        }
    }

    #[test]
    fn left_right_swaps_axes() {
        let g = lg(vec![(80.0, 140.0)]);
        let mut coords = vec![(50.0, 170.0)];
        undo(&mut coords, &g, Direction::LeftRight, 50.0);
        assert_eq!(coords, vec![(170.0, 50.0)]);
        assert_eq!(adjust(&[(140.0, 80.0)], Direction::LeftRight), vec![(80.0, 140.0)]);
    }

    #[test]
    fn bottom_up_mirrors_depth_keeping_padding() {
        let g = lg(vec![(140.0, 80.0), (140.0, 80.0)]);
        let mut coords = vec![(50.0, 50.0), (50.0, 170.0)];
        undo(&mut coords, &g, Direction::BottomUp, 50.0);
        assert_eq!(coords, vec![(50.0, 170.0), (50.0, 50.0)]);
    }
}
