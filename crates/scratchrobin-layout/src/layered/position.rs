use super::LayerGraph;
use crate::options::LayoutOptions;

/// Top-left corners in the top-to-bottom frame: `.0` is lateral, `.1` is depth.
///
/// Within a layer each slot advances by `max(node_spacing, lateral extent)`; each layer advances
/// by `max(level_spacing, deepest extent in the layer)`. With nodes no larger than the spacings
/// this is `padding + index * node_spacing` and `padding + layer * level_spacing`.
pub(super) fn assign(
    lg: &LayerGraph,
    layers: &[Vec<usize>],
    options: &LayoutOptions,
) -> Vec<(f64, f64)> {
    let mut coords = vec![(0.0, 0.0); lg.node_count()];
    let mut depth = options.padding;
    for layer in layers {
        let mut lateral = options.padding;
        let mut layer_depth: f64 = 0.0;
        for &v in layer {
            let (w, h) = lg.extent[v];
            coords[v] = (lateral, depth);
            lateral += options.node_spacing.max(w);
            layer_depth = layer_depth.max(h);
        }
        depth += options.level_spacing.max(layer_depth);
    }
    coords
}
