//! Pixel-grid rounding (§4.5 "Pixel-grid rounding"). A top-down pass that snaps every node's
//! position and size to the device pixel grid implied by [`crate::config::Config::point_scale_factor`],
//! using accumulated absolute coordinates so sibling edges that should touch still touch after
//! rounding, rather than rounding each node's position and size independently and letting gaps
//! or overlaps creep in.

use alloc::vec::Vec;

use crate::error::LayoutResult;
use crate::tree::{FlexTree, NodeId, NodeType};

/// Rounds `node` and its whole subtree in place. `scale <= 0.0` disables rounding entirely
/// (matches the source's "pointScaleFactor of zero means don't round" convention).
pub fn round_layout<Context>(tree: &mut FlexTree<Context>, node: NodeId, scale: f32) -> LayoutResult<()> {
    round_subtree(tree, node, scale, 0.0, 0.0)
}

fn round_subtree<Context>(tree: &mut FlexTree<Context>, node: NodeId, scale: f32, absolute_left: f32, absolute_top: f32) -> LayoutResult<()> {
    if scale <= 0.0 {
        return Ok(());
    }

    let (node_left, node_top, node_width, node_height, node_type) = {
        let data = tree.node_data(node)?;
        (data.layout.position.left, data.layout.position.top, data.layout.dimensions.width, data.layout.dimensions.height, data.node_type)
    };

    let absolute_node_left = absolute_left + node_left;
    let absolute_node_top = absolute_top + node_top;

    let is_text = node_type == NodeType::Text;
    let has_fractional_width = !is_close_to_integer(node_width * scale);
    let has_fractional_height = !is_close_to_integer(node_height * scale);

    let rounded_left = round_value(node_left, scale, false, false);
    let rounded_top = round_value(node_top, scale, false, false);
    let rounded_right_edge = round_value(absolute_node_left + node_width, scale, is_text && has_fractional_width, is_text && !has_fractional_width);
    let rounded_bottom_edge = round_value(absolute_node_top + node_height, scale, is_text && has_fractional_height, is_text && !has_fractional_height);
    let rounded_node_left = round_value(absolute_node_left, scale, false, false);
    let rounded_node_top = round_value(absolute_node_top, scale, false, false);

    let data = tree.node_data_mut(node)?;
    data.layout.position.left = rounded_left;
    data.layout.position.top = rounded_top;
    data.layout.dimensions.width = rounded_right_edge - rounded_node_left;
    data.layout.dimensions.height = rounded_bottom_edge - rounded_node_top;

    let children: Vec<NodeId> = tree.children(node)?.to_vec();
    for child in children {
        round_subtree(tree, child, scale, absolute_node_left, absolute_node_top)?;
    }

    Ok(())
}

fn is_close_to_integer(value: f32) -> bool {
    (value - value.round()).abs() < 1e-4
}

/// Snaps `value` to the nearest device pixel at `scale`. `force_ceil`/`force_floor` implement the
/// text-node edge case: a fractional-width text node rounds its trailing edge up so the glyph
/// never gets clipped, while a non-fractional one rounds down to avoid an unnecessary gap.
fn round_value(value: f32, scale: f32, force_ceil: bool, force_floor: bool) -> f32 {
    let scaled = value * scale;
    let fraction = scaled - scaled.floor();
    let rounded = if force_ceil {
        scaled.ceil()
    } else if force_floor {
        scaled.floor()
    } else if fraction < 1e-4 {
        scaled.floor()
    } else if fraction > 1.0 - 1e-4 {
        scaled.ceil()
    } else {
        scaled.round()
    };
    rounded / scale
}
