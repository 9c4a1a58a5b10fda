//! Childless nodes (§4.5 Steps 1-3): measure-function leaves, empty containers, and the
//! fixed-size shortcut that skips measurement entirely when both axes are already exact.

use crate::compute::edges::BoxEdges;
use crate::compute::{MeasureClosure, MeasureMode};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Axis, Size};
use crate::number::Number;
use crate::style::Style;
use crate::tree::NodeId;

/// §4.5 Step 1. `available_*` are the node's full available space (margin not yet subtracted);
/// this clamps to the inner box, invokes the measure callback, then re-applies padding/border
/// and the style's min/max bounds.
pub(crate) fn measure_leaf<Context>(
    node: NodeId,
    style: &Style,
    context: Option<&mut Context>,
    measure: &mut MeasureClosure<Context>,
    available_width: Number,
    width_mode: MeasureMode,
    available_height: Number,
    height_mode: MeasureMode,
    edges: &BoxEdges,
) -> LayoutResult<Size<f32>> {
    let margin_w = edges.margin_axis(Axis::Horizontal);
    let margin_h = edges.margin_axis(Axis::Vertical);
    let pb_w = edges.padding_and_border_axis(Axis::Horizontal);
    let pb_h = edges.padding_and_border_axis(Axis::Vertical);

    let inner_width = (available_width - Number::defined(margin_w + pb_w)).maybe_max(Number::ZERO);
    let inner_height = (available_height - Number::defined(margin_h + pb_h)).maybe_max(Number::ZERO);

    let measured = measure(
        style,
        context,
        Size { width: inner_width, height: inner_height },
        Size { width: width_mode, height: height_mode },
    );

    if measured.width.is_nan() || measured.height.is_nan() {
        return Err(LayoutError::MeasureReturnedNaN(node));
    }

    let width = bound_measured_axis(
        width_mode,
        available_width,
        margin_w,
        measured.width,
        pb_w,
        style.min_size.width.resolve(available_width),
        style.max_size.width.resolve(available_width),
    );
    let height = bound_measured_axis(
        height_mode,
        available_height,
        margin_h,
        measured.height,
        pb_h,
        style.min_size.height.resolve(available_height),
        style.max_size.height.resolve(available_height),
    );

    Ok(Size { width, height })
}

fn bound_measured_axis(
    mode: MeasureMode,
    available: Number,
    margin: f32,
    measured: f32,
    padding_and_border: f32,
    min: Number,
    max: Number,
) -> f32 {
    let raw = if mode.is_exactly() {
        available.or(measured + padding_and_border) - margin
    } else {
        measured + padding_and_border
    };
    Number::defined(raw).maybe_clamp(min, max).0
}

/// §4.5 Step 2. A node with no children floors to its padding+border under `Undefined`/`AtMost`;
/// under `Exactly` it simply fills the available space minus margin. Either way the result is
/// still bound by the style's own min/max (`YGNodeBoundAxis`), since a no-children node can still
/// declare `min_size`/`max_size`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn empty_container_size(
    width_mode: MeasureMode,
    available_width: Number,
    height_mode: MeasureMode,
    available_height: Number,
    edges: &BoxEdges,
    min: Size<Number>,
    max: Size<Number>,
) -> Size<f32> {
    let margin_w = edges.margin_axis(Axis::Horizontal);
    let margin_h = edges.margin_axis(Axis::Vertical);
    let pb_w = edges.padding_and_border_axis(Axis::Horizontal);
    let pb_h = edges.padding_and_border_axis(Axis::Vertical);

    let width = if width_mode.is_exactly() { available_width.or(pb_w) - margin_w } else { pb_w };
    let height = if height_mode.is_exactly() { available_height.or(pb_h) - margin_h } else { pb_h };
    Size {
        width: Number::defined(width).maybe_clamp(min.width, max.width).0.max(pb_w),
        height: Number::defined(height).maybe_clamp(min.height, max.height).0.max(pb_h),
    }
}

/// §4.5 Step 3: both axes already pinned by an exact (or non-positive `AtMost`) constraint and no
/// full layout was requested, so the children never need to be visited at all.
pub(crate) fn fixed_size_shortcut_applies(
    perform_layout: bool,
    width_mode: MeasureMode,
    available_width: Number,
    height_mode: MeasureMode,
    available_height: Number,
) -> bool {
    if perform_layout {
        return false;
    }
    let width_fixed = width_mode.is_exactly() || (width_mode.is_at_most() && available_width.is_defined() && available_width.0 <= 0.0);
    let height_fixed = height_mode.is_exactly() || (height_mode.is_at_most() && available_height.is_defined() && available_height.0 <= 0.0);
    width_fixed && height_fixed
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn fixed_size_shortcut(
    width_mode: MeasureMode,
    available_width: Number,
    height_mode: MeasureMode,
    available_height: Number,
    edges: &BoxEdges,
    min: Size<Number>,
    max: Size<Number>,
) -> Size<f32> {
    let margin_w = edges.margin_axis(Axis::Horizontal);
    let margin_h = edges.margin_axis(Axis::Vertical);
    let width = if width_mode.is_exactly() { available_width.or(0.0) - margin_w } else { available_width.or(0.0).max(0.0) };
    let height = if height_mode.is_exactly() { available_height.or(0.0) - margin_h } else { available_height.or(0.0).max(0.0) };
    Size {
        width: Number::defined(width.max(0.0)).maybe_clamp(min.width, max.width).0,
        height: Number::defined(height.max(0.0)).maybe_clamp(min.height, max.height).0,
    }
}
