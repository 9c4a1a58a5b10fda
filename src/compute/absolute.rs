//! Absolutely positioned children (§4.5 Step 13). These never join a line and are never
//! touched by justification or cross-axis alignment; each is sized and placed independently
//! against the container's own border box once the rest of the layout is final.

use crate::compute::edges::{resolve_flow, BoxEdges};
use crate::compute::{compute_node_layout, MeasureClosure, MeasureMode};
use crate::error::LayoutResult;
use crate::geometry::{Axis, Edge, Size};
use crate::number::Number;
use crate::style::{
    axis_for, computed_edge_value, computed_physical_edge, resolve_direction, Align, Direction, FlexWrap, JustifyContent, Style, StyleLength,
};
use crate::tree::{FlexTree, NodeId};

/// Resolves width/height/position for one absolutely positioned child and writes the result
/// directly into its [`crate::tree::Layout`]. `container_size` and `container_edges` are the
/// parent's own (already finalized) border-box size and resolved margin/border/padding.
/// `parent_style` supplies the fallback chain (§4.5 Step 13) used when neither inset on an axis
/// is defined: `justify_content` on the parent's main axis, `align_items`/`flex_wrap` on its cross
/// axis.
#[allow(clippy::too_many_arguments)]
pub(crate) fn layout_absolute_child<Context: Clone>(
    tree: &mut FlexTree<Context>,
    _parent: NodeId,
    child: NodeId,
    parent_style: &Style,
    container_size: Size<f32>,
    container_edges: &BoxEdges,
    parent_direction: Direction,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<()> {
    let child_style = tree.style(child)?.clone();
    let resolved_direction = resolve_direction(child_style.direction, Some(parent_direction));
    let flow = resolve_flow(parent_style, parent_direction);
    let main_is_horizontal = axis_for(flow.main) == Axis::Horizontal;
    let align = parent_style.align_for_child(&child_style);
    let wrap_reverse = parent_style.flex_wrap == FlexWrap::WrapReverse;

    let child_edges = {
        let data = tree.node_data(child)?;
        BoxEdges { margin: data.layout.margin, border: data.layout.border, padding: data.layout.padding }
    };

    let container_width = Number::defined(container_size.width);
    let container_height = Number::defined(container_size.height);

    let left = computed_physical_edge(&child_style.position, Edge::Left, resolved_direction, StyleLength::Undefined).resolve(container_width);
    let right = computed_physical_edge(&child_style.position, Edge::Right, resolved_direction, StyleLength::Undefined).resolve(container_width);
    let top = computed_edge_value(&child_style.position, Edge::Top, StyleLength::Undefined).resolve(container_height);
    let bottom = computed_edge_value(&child_style.position, Edge::Bottom, StyleLength::Undefined).resolve(container_height);

    let mut width = child_style.resolve_dimension(Axis::Horizontal).resolve(container_width);
    let mut height = child_style.resolve_dimension(Axis::Vertical).resolve(container_height);

    // A fully-specified inset pair derives the size when the style itself leaves it undefined.
    if width.is_undefined() && left.is_defined() && right.is_defined() {
        width = Number::defined((container_size.width - left.0 - right.0).max(0.0));
    }
    if height.is_undefined() && top.is_defined() && bottom.is_defined() {
        height = Number::defined((container_size.height - top.0 - bottom.0).max(0.0));
    }

    if let Some(ratio) = child_style.aspect_ratio {
        if width.is_undefined() && height.is_defined() {
            width = Number::defined(height.0 * ratio);
        } else if height.is_undefined() && width.is_defined() {
            height = Number::defined(width.0 / ratio);
        }
    }

    let min_w = child_style.min_size.width.resolve(container_width);
    let max_w = child_style.max_size.width.resolve(container_width);
    let min_h = child_style.min_size.height.resolve(container_height);
    let max_h = child_style.max_size.height.resolve(container_height);
    width = width.maybe_clamp(min_w, max_w);
    height = height.maybe_clamp(min_h, max_h);

    if width.is_undefined() || height.is_undefined() {
        let modes = Size {
            width: if width.is_defined() { MeasureMode::Exactly } else { MeasureMode::Undefined },
            height: if height.is_defined() { MeasureMode::Exactly } else { MeasureMode::Undefined },
        };
        let measured = compute_node_layout(
            tree,
            child,
            width.maybe_max(Number::ZERO),
            height.maybe_max(Number::ZERO),
            resolved_direction,
            modes.width,
            modes.height,
            container_width,
            container_height,
            false,
            measure,
        )?;
        if width.is_undefined() {
            width = Number::defined(measured.width.max(0.0));
        }
        if height.is_undefined() {
            height = Number::defined(measured.height.max(0.0));
        }
    }

    compute_node_layout(
        tree,
        child,
        width,
        height,
        resolved_direction,
        MeasureMode::Exactly,
        MeasureMode::Exactly,
        container_width,
        container_height,
        true,
        measure,
    )?;

    let content_left = container_edges.padding.get(Edge::Left) + container_edges.border.get(Edge::Left);
    let content_right = container_edges.padding.get(Edge::Right) + container_edges.border.get(Edge::Right);
    let content_top = container_edges.padding.get(Edge::Top) + container_edges.border.get(Edge::Top);
    let content_bottom = container_edges.padding.get(Edge::Bottom) + container_edges.border.get(Edge::Bottom);

    let pos_left = if left.is_defined() {
        content_left + left.0 + child_edges.margin.get(Edge::Left)
    } else if right.is_defined() {
        container_size.width - content_right - right.0 - width.0 - child_edges.margin.get(Edge::Right)
    } else if main_is_horizontal {
        match parent_style.justify_content {
            JustifyContent::Center => (container_size.width - width.0) / 2.0,
            JustifyContent::FlexEnd => container_size.width - width.0,
            _ => content_left + child_edges.margin.get(Edge::Left),
        }
    } else if align == Align::Center {
        (container_size.width - width.0) / 2.0
    } else if (align == Align::FlexEnd) != wrap_reverse {
        container_size.width - width.0
    } else {
        content_left + child_edges.margin.get(Edge::Left)
    };
    let pos_top = if top.is_defined() {
        content_top + top.0 + child_edges.margin.get(Edge::Top)
    } else if bottom.is_defined() {
        container_size.height - content_bottom - bottom.0 - height.0 - child_edges.margin.get(Edge::Bottom)
    } else if !main_is_horizontal {
        match parent_style.justify_content {
            JustifyContent::Center => (container_size.height - height.0) / 2.0,
            JustifyContent::FlexEnd => container_size.height - height.0,
            _ => content_top + child_edges.margin.get(Edge::Top),
        }
    } else if align == Align::Center {
        (container_size.height - height.0) / 2.0
    } else if (align == Align::FlexEnd) != wrap_reverse {
        container_size.height - height.0
    } else {
        content_top + child_edges.margin.get(Edge::Top)
    };

    let data = tree.node_data_mut(child)?;
    data.layout.position.left = pos_left;
    data.layout.position.top = pos_top;
    data.layout.dimensions = Size { width: width.0, height: height.0 };

    Ok(())
}
