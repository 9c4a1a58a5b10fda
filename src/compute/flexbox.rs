//! The recursive flex solver (§4.5). Steps 0-3 dispatch to [`crate::compute::leaf`] for
//! measure-function leaves, empty containers and the fixed-size shortcut; everything else (line
//! collection, flexible-length resolution, justification, cross-axis alignment, multi-line
//! `align-content`, and the two post-passes) lives here.

use alloc::vec::Vec;

use crate::compute::edges::{is_margin_auto, resolve_box_edges, resolve_flow, BoxEdges};
use crate::compute::{absolute, leaf, MeasureClosure, MeasureMode};
use crate::error::LayoutResult;
use crate::geometry::{Axis, Edge, Rect, Size};
use crate::number::Number;
use crate::style::{leading_edge, resolve_direction, trailing_edge, Align, Direction, Display, FlexDirection, JustifyContent, Overflow, Style};
use crate::tree::layout::CachedMeasurement;
use crate::tree::{FlexTree, NodeId};

fn size_for_axes<T: Copy>(main_axis: Axis, main: T, cross: T) -> Size<T> {
    match main_axis {
        Axis::Horizontal => Size { width: main, height: cross },
        Axis::Vertical => Size { width: cross, height: main },
    }
}

fn other_axis(axis: Axis) -> Axis {
    match axis {
        Axis::Horizontal => Axis::Vertical,
        Axis::Vertical => Axis::Horizontal,
    }
}

/// Entry point and recursive workhorse both (§4.5 Steps 0-14). Called once per node per layout
/// pass; `perform_layout` distinguishes a full layout (children get final positions) from a
/// measurement-only pass (only this node's own size is wanted).
#[allow(clippy::too_many_arguments)]
pub fn compute_node_layout<Context: Clone>(
    tree: &mut FlexTree<Context>,
    node: NodeId,
    available_width: Number,
    available_height: Number,
    parent_direction: Direction,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    parent_width: Number,
    parent_height: Number,
    perform_layout: bool,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<Size<f32>> {
    debug_assert!(available_width.is_defined() || width_mode == MeasureMode::Undefined);
    debug_assert!(available_height.is_defined() || height_mode == MeasureMode::Undefined);

    let style = tree.node_data(node)?.style.clone();
    let resolved_direction = resolve_direction(style.direction, Some(parent_direction));
    let edges = resolve_box_edges(&style, resolved_direction, parent_width);

    // Step 0: write resolved edges + direction, then consult the cache.
    let generation = tree.generation();
    let data = tree.node_data_mut(node)?;
    data.layout.margin = edges.margin;
    data.layout.border = edges.border;
    data.layout.padding = edges.padding;
    if data.layout.generation_count != generation || data.layout.last_parent_direction != Some(resolved_direction) {
        data.layout.cache.clear();
    }
    data.layout.generation_count = generation;
    data.layout.last_parent_direction = Some(resolved_direction);
    data.layout.direction = resolved_direction;

    if perform_layout {
        if let Some(hit) = data.layout.cache.cached_layout {
            if hit.width_mode == width_mode
                && hit.height_mode == height_mode
                && hit.available_width == available_width
                && hit.available_height == available_height
            {
                data.config.log(Some(node), log::Level::Trace, "layout cache hit");
                return Ok(Size { width: hit.computed_width, height: hit.computed_height });
            }
        }
    } else if let Some(hit) = data.layout.cache.find(available_width, width_mode, available_height, height_mode, data.config.point_scale_factor) {
        data.config.log(Some(node), log::Level::Trace, "measurement cache hit");
        return Ok(Size { width: hit.computed_width, height: hit.computed_height });
    }
    data.config.log(Some(node), log::Level::Trace, "layout cache miss");

    let result = compute_uncached(
        tree,
        node,
        &style,
        resolved_direction,
        &edges,
        available_width,
        available_height,
        width_mode,
        height_mode,
        parent_width,
        parent_height,
        perform_layout,
        measure,
    )?;

    let entry = CachedMeasurement {
        available_width,
        width_mode,
        available_height,
        height_mode,
        computed_width: result.width,
        computed_height: result.height,
    };
    let data = tree.node_data_mut(node)?;
    if perform_layout {
        data.layout.cache.store_layout(entry);
        data.is_dirty = false;
    } else {
        data.layout.cache.store_measurement(entry);
    }

    Ok(result)
}

#[allow(clippy::too_many_arguments)]
fn compute_uncached<Context: Clone>(
    tree: &mut FlexTree<Context>,
    node: NodeId,
    style: &Style,
    resolved_direction: Direction,
    edges: &BoxEdges,
    available_width: Number,
    available_height: Number,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    parent_width: Number,
    parent_height: Number,
    perform_layout: bool,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<Size<f32>> {
    let data = tree.node_data(node)?;

    // Step 1: measure-function leaf.
    if data.needs_measure {
        let context = tree.get_node_context_mut(node);
        let size = leaf::measure_leaf(node, style, context, measure, available_width, width_mode, available_height, height_mode, edges)?;
        tree.node_data_mut(node)?.layout.dimensions = size;
        return Ok(size);
    }

    let child_count = tree.child_count(node)?;

    let min = Size { width: style.min_size.width.resolve(available_width), height: style.min_size.height.resolve(available_height) };
    let max = Size { width: style.max_size.width.resolve(available_width), height: style.max_size.height.resolve(available_height) };

    // Step 2: empty container.
    if child_count == 0 {
        let size = leaf::empty_container_size(width_mode, available_width, height_mode, available_height, edges, min, max);
        tree.node_data_mut(node)?.layout.dimensions = size;
        return Ok(size);
    }

    // Step 3: fixed-size shortcut.
    if leaf::fixed_size_shortcut_applies(perform_layout, width_mode, available_width, height_mode, available_height) {
        let size = leaf::fixed_size_shortcut(width_mode, available_width, height_mode, available_height, edges, min, max);
        tree.node_data_mut(node)?.layout.dimensions = size;
        return Ok(size);
    }

    compute_flex_layout(
        tree,
        node,
        style,
        resolved_direction,
        edges,
        available_width,
        available_height,
        width_mode,
        height_mode,
        parent_width,
        parent_height,
        perform_layout,
        measure,
    )
}

/// A single flex item once it has joined a line (§4.5 Steps 5-9).
struct Item {
    id: NodeId,
    style: Style,
    edges: BoxEdges,
    flex_grow: f32,
    flex_shrink: f32,
    basis: f32,
    min_main: Number,
    max_main: Number,
    main_size: f32,
    cross_size: f32,
    main_pos: f32,
    cross_pos: f32,
    frozen: bool,
}

struct Line {
    start: usize,
    end: usize,
    total_grow: f32,
    total_shrink_scaled: f32,
    cross_dim: f32,
}

#[allow(clippy::too_many_arguments)]
fn compute_flex_layout<Context: Clone>(
    tree: &mut FlexTree<Context>,
    node: NodeId,
    style: &Style,
    resolved_direction: Direction,
    edges: &BoxEdges,
    available_width: Number,
    available_height: Number,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    parent_width: Number,
    parent_height: Number,
    perform_layout: bool,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<Size<f32>> {
    let flow = resolve_flow(style, resolved_direction);
    let main_axis = crate::style::axis_for(flow.main);
    let cross_axis = other_axis(main_axis);
    let use_web_defaults = tree.node_data(node)?.config.use_web_defaults;

    let avail_size: Size<Number> = Size { width: available_width, height: available_height };
    let modes: Size<MeasureMode> = Size { width: width_mode, height: height_mode };

    let margin_main = edges.margin_for_axis(flow.main);
    let margin_cross = edges.margin_for_axis(flow.cross);
    let pb_main = edges.padding_and_border_for_axis(flow.main);
    let pb_cross = edges.padding_and_border_for_axis(flow.cross);

    let avail_main = *avail_size.get(main_axis);
    let avail_cross = *avail_size.get(cross_axis);
    let mode_main = *modes.get(main_axis);
    let mode_cross = *modes.get(cross_axis);

    let inner_main = (avail_main - Number::defined(margin_main)).maybe_max(Number::ZERO);
    let inner_cross = (avail_cross - Number::defined(margin_cross)).maybe_max(Number::ZERO);
    let content_main = (inner_main - Number::defined(pb_main)).maybe_max(Number::ZERO);
    let content_cross = (inner_cross - Number::defined(pb_cross)).maybe_max(Number::ZERO);

    let content_wh = size_for_axes(main_axis, content_main, content_cross);
    let child_parent_width = content_wh.width;
    let child_parent_height = content_wh.height;
    let _ = (parent_width, parent_height);

    let children: Vec<NodeId> = tree.children(node)?.to_vec();

    let mut items: Vec<Item> = Vec::with_capacity(children.len());
    let mut absolute_children: Vec<NodeId> = Vec::new();

    for child in children {
        let child_style = tree.style(child)?.clone();
        if child_style.display == Display::None {
            zero_subtree(tree, child)?;
            continue;
        }
        let child_edges = resolve_box_edges(&child_style, resolved_direction, child_parent_width);
        {
            let child_layout = &mut tree.node_data_mut(child)?.layout;
            child_layout.margin = child_edges.margin;
            child_layout.border = child_edges.border;
            child_layout.padding = child_edges.padding;
        }

        if child_style.position_type == crate::style::PositionType::Absolute {
            absolute_children.push(child);
            continue;
        }

        let min_main = child_style.min_size.get(main_axis).resolve(content_main);
        let max_main = child_style.max_size.get(main_axis).resolve(content_main);
        let basis = compute_child_flex_basis(
            tree,
            child,
            style,
            &child_style,
            &child_edges,
            main_axis,
            cross_axis,
            mode_cross,
            content_main,
            content_cross,
            child_parent_width,
            child_parent_height,
            resolved_direction,
            use_web_defaults,
            measure,
        )?;
        let basis = Number::defined(basis).maybe_clamp(min_main, max_main).0.max(0.0);

        items.push(Item {
            id: child,
            style: child_style,
            edges: child_edges,
            flex_grow: 0.0,
            flex_shrink: 0.0,
            basis,
            min_main,
            max_main,
            main_size: basis,
            cross_size: 0.0,
            main_pos: 0.0,
            cross_pos: 0.0,
            frozen: false,
        });
    }

    // The "single flex child" optimization (§4.5 Step 5): skip measurement for the sole growable
    // *and* shrinkable item in an exactly-sized container by pinning its basis to zero.
    if mode_main.is_exactly() && !tree.node_data(node)?.config.experimental_features.web_flex_basis {
        let mut candidate = None;
        let mut count = 0;
        for (idx, item) in items.iter().enumerate() {
            let grow = item.style.resolve_flex_grow();
            let shrink = item.style.resolve_flex_shrink(use_web_defaults);
            if grow > 0.0 && shrink > 0.0 {
                count += 1;
                candidate = Some(idx);
            }
        }
        if count == 1 {
            let idx = candidate.unwrap();
            items[idx].basis = 0.0;
            items[idx].main_size = 0.0;
        }
    }

    for item in &mut items {
        item.flex_grow = item.style.resolve_flex_grow();
        item.flex_shrink = item.style.resolve_flex_shrink(use_web_defaults);
    }

    // Step 6: collect into lines.
    let mut lines = collect_lines(&items, style.is_flex_wrap(), content_main, main_axis);

    let mut had_overflow = false;
    let mut max_line_main_content: f32 = 0.0;

    for line in &lines {
        resolve_flexible_lengths(&mut items[line.start..line.end], content_main, line.total_grow, line.total_shrink_scaled, main_axis);
    }

    for line in &mut lines {
        let slice = &mut items[line.start..line.end];
        let mut line_main_used = 0.0;
        for item in slice.iter_mut() {
            let cross = resolve_item_cross_size(
                tree,
                item,
                style,
                main_axis,
                cross_axis,
                content_cross,
                mode_cross,
                style.is_flex_wrap(),
                resolved_direction,
                child_parent_width,
                child_parent_height,
                measure,
            )?;
            item.cross_size = cross;
            line_main_used += item.main_size + item.edges.margin_for_axis(flow.main);
            line.cross_dim = line.cross_dim.max(cross + item.edges.margin_for_axis(flow.cross));
        }
        if line_main_used > content_main.or(line_main_used) + 1e-3 {
            had_overflow = true;
        }
        max_line_main_content = max_line_main_content.max(line_main_used);

        justify_line(slice, &flow, style.justify_content, content_main, mode_main, resolved_direction);
    }

    // A non-wrapping container has exactly one line, and that line's cross size is the
    // container's own cross size, not merely the max of its items' natural cross sizes — an
    // `align-items: center` child smaller than the container must center against the whole
    // container, not against its own height. A wrapping container has no such single-line
    // shortcut: each line's cross size stays the natural aggregate from above until `align-content`
    // distributes any remaining free space across all of them below.
    if !style.is_flex_wrap() && mode_cross.is_exactly() {
        for line in &mut lines {
            line.cross_dim = content_cross.0;
        }
    }

    // Step 10: multi-line `align-content`.
    let total_cross_used: f32 = lines.iter().map(|l| l.cross_dim).sum();
    let mut line_cross_offsets: Vec<f32> = Vec::with_capacity(lines.len());
    {
        let free_cross = content_cross.into_option().map(|c| (c - total_cross_used).max(0.0));
        let n = lines.len() as f32;
        let mut cursor = 0.0;
        let gap = match (style.align_content, free_cross) {
            (Align::SpaceBetween, Some(f)) if lines.len() > 1 => f / (n - 1.0),
            (Align::SpaceAround, Some(f)) => f / n,
            _ => 0.0,
        };
        let leading = match (style.align_content, free_cross) {
            (Align::Center, Some(f)) => f / 2.0,
            (Align::FlexEnd, Some(f)) => f,
            (Align::SpaceAround, Some(f)) => f / (2.0 * n),
            _ => 0.0,
        };
        let stretch_extra = match (style.align_content, free_cross) {
            (Align::Stretch, Some(f)) if !lines.is_empty() => f / lines.len() as f32,
            _ => 0.0,
        };
        cursor += leading;
        for line in lines.iter_mut() {
            line_cross_offsets.push(cursor);
            if stretch_extra > 0.0 {
                line.cross_dim += stretch_extra;
            }
            cursor += line.cross_dim + gap;
        }
    }

    if perform_layout {
        for (line_idx, (line, cross_offset)) in lines.iter().zip(line_cross_offsets.iter()).enumerate() {
            let slice = &mut items[line.start..line.end];
            align_cross(
                tree,
                slice,
                &flow,
                style,
                main_axis,
                cross_axis,
                mode_cross,
                content_cross,
                line.cross_dim,
                *cross_offset,
                resolved_direction,
                child_parent_width,
                child_parent_height,
                measure,
            )?;
            for item in slice.iter_mut() {
                tree.node_data_mut(item.id)?.layout.line_index = line_idx;
            }
        }
    }

    // Step 11: final container dimensions.
    let main_final = finalize_dim(mode_main, inner_main, max_line_main_content, pb_main, style.min_size.get(main_axis).resolve(content_main), style.max_size.get(main_axis).resolve(content_main), style.overflow);
    let cross_content = total_cross_used.max(lines.iter().map(|l| l.cross_dim).fold(0.0, f32::max));
    let cross_final = finalize_dim(mode_cross, inner_cross, cross_content, pb_cross, style.min_size.get(cross_axis).resolve(content_cross), style.max_size.get(cross_axis).resolve(content_cross), style.overflow);

    let final_size = size_for_axes(main_axis, main_final, cross_final);

    if perform_layout {
        // Commit item positions into the node tree, in (leading-edge, position) terms.
        for item in &items {
            let pos_main = pb_main_leading(edges, flow.main) + item.main_pos;
            let pos_cross = pb_leading(edges, flow.cross) + item.cross_pos;
            let wh = size_for_axes(main_axis, pos_main, pos_cross);
            let data = tree.node_data_mut(item.id)?;
            data.layout.position.left = wh.width;
            data.layout.position.top = wh.height;
            let dims = size_for_axes(main_axis, item.main_size, item.cross_size);
            data.layout.dimensions = dims;
        }

        // Step 12: wrap-reverse reflects every relative child's cross position.
        if style.flex_wrap == crate::style::FlexWrap::WrapReverse {
            let container_cross = *final_size.get(cross_axis);
            for item in &items {
                let data = tree.node_data_mut(item.id)?;
                match cross_axis {
                    Axis::Horizontal => data.layout.position.left = container_cross - data.layout.position.left - item.cross_size,
                    Axis::Vertical => data.layout.position.top = container_cross - data.layout.position.top - item.cross_size,
                }
            }
        }

        // Step 13: absolute children.
        for &child in &absolute_children {
            absolute::layout_absolute_child(tree, node, child, style, final_size, edges, resolved_direction, measure)?;
        }

        // Step 14: trailing-position fixup for reversed directions.
        if flow.main.is_reverse() || flow.cross.is_reverse() {
            apply_trailing_fixup(tree, node, main_axis, cross_axis, flow.main, flow.cross, final_size)?;
        }

        tree.node_data_mut(node)?.layout.had_overflow = had_overflow;
    }

    Ok(final_size)
}

fn pb_main_leading(edges: &BoxEdges, axis_dir: FlexDirection) -> f32 {
    edges.padding.get(leading_edge(axis_dir)) + edges.border.get(leading_edge(axis_dir))
}

fn pb_leading(edges: &BoxEdges, axis_dir: FlexDirection) -> f32 {
    edges.padding.get(leading_edge(axis_dir)) + edges.border.get(leading_edge(axis_dir))
}

fn zero_subtree<Context: Clone>(tree: &mut FlexTree<Context>, node: NodeId) -> LayoutResult<()> {
    let children = tree.children(node)?.to_vec();
    let data = tree.node_data_mut(node)?;
    data.layout.dimensions = Size::ZERO;
    data.layout.position = Rect::ZERO;
    for child in children {
        zero_subtree(tree, child)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn compute_child_flex_basis<Context: Clone>(
    tree: &mut FlexTree<Context>,
    child: NodeId,
    parent_style: &Style,
    child_style: &Style,
    child_edges: &BoxEdges,
    main_axis: Axis,
    cross_axis: Axis,
    mode_cross: MeasureMode,
    content_main: Number,
    content_cross: Number,
    parent_width: Number,
    parent_height: Number,
    resolved_direction: Direction,
    use_web_defaults: bool,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<f32> {
    let explicit = child_style.resolve_flex_basis(use_web_defaults);
    if explicit.is_defined() {
        if let Number(v) = explicit.resolve(content_main) {
            if !v.is_nan() {
                return Ok(v.max(0.0));
            }
        }
    }

    let dim = child_style.resolve_dimension(main_axis).resolve(content_main);
    if dim.is_defined() {
        return Ok(dim.0.max(0.0));
    }

    // Cross-axis stretch inference, checked before the aspect-ratio derivation below since an
    // explicit style dimension on the cross axis takes precedence over both.
    let align = parent_style.align_for_child(child_style);
    let style_cross = child_style.resolve_dimension(cross_axis).resolve(content_cross);
    let cross_val = if style_cross.is_defined() {
        style_cross
    } else if matches!(align, Align::Stretch) && mode_cross.is_exactly() && content_cross.is_defined() {
        content_cross
    } else {
        Number::UNDEFINED
    };

    // A known cross size plus `aspectRatio` derives the main-axis basis directly, the same way
    // the source's `YGNodeComputeFlexBasisForChild` does, without a measurement recurse.
    if let Some(ratio) = child_style.aspect_ratio {
        if cross_val.is_defined() {
            let derived = if main_axis == Axis::Horizontal { cross_val.0 * ratio } else { cross_val.0 / ratio };
            return Ok(derived.max(0.0));
        }
    }

    let cross_mode = if cross_val.is_defined() {
        MeasureMode::Exactly
    } else if matches!(child_style.overflow, Overflow::Scroll) {
        MeasureMode::Undefined
    } else {
        MeasureMode::AtMost
    };

    let avail = size_for_axes(main_axis, content_main, cross_val);
    let modes = size_for_axes(main_axis, MeasureMode::Undefined, cross_mode);
    let result = compute_node_layout(
        tree,
        child,
        avail.width,
        avail.height,
        resolved_direction,
        modes.width,
        modes.height,
        parent_width,
        parent_height,
        false,
        measure,
    )?;
    let _ = child_edges;
    Ok((*result.get(main_axis)).max(0.0))
}

fn collect_lines(items: &[Item], wrap: bool, content_main: Number, main_axis: Axis) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut consumed = 0.0f32;
    let mut total_grow = 0.0f32;
    let mut total_shrink = 0.0f32;

    for (i, item) in items.iter().enumerate() {
        let size = item.basis + item.edges.margin_axis(main_axis);
        if wrap && i > start && content_main.is_defined() && consumed + size > content_main.0 + 1e-3 {
            lines.push(finish_line(start, i, total_grow, total_shrink));
            start = i;
            consumed = 0.0;
            total_grow = 0.0;
            total_shrink = 0.0;
        }
        consumed += size;
        total_grow += item.flex_grow.max(0.0);
        total_shrink += item.flex_shrink.max(0.0) * item.basis;
    }
    lines.push(finish_line(start, items.len(), total_grow, total_shrink));
    lines
}

fn finish_line(start: usize, end: usize, mut total_grow: f32, mut total_shrink: f32) -> Line {
    if total_grow > 0.0 && total_grow < 1.0 {
        total_grow = 1.0;
    }
    if total_shrink > 0.0 && total_shrink < 1.0 {
        total_shrink = 1.0;
    }
    Line { start, end, total_grow, total_shrink_scaled: total_shrink, cross_dim: 0.0 }
}

fn resolve_flexible_lengths(items: &mut [Item], content_main: Number, total_grow: f32, total_shrink: f32, main_axis: Axis) {
    let sum_basis_margin: f32 = items.iter().map(|i| i.basis + i.edges.margin_axis(main_axis)).sum();
    let available = content_main.or(sum_basis_margin);
    let mut remaining = available - sum_basis_margin;
    let mut grow = total_grow;
    let mut shrink = total_shrink;

    // Pass 1: freeze items whose min/max would be violated by the naive proportional delta.
    if remaining < 0.0 && shrink > 0.0 {
        for item in items.iter_mut() {
            if item.flex_shrink <= 0.0 {
                continue;
            }
            let scaled = item.flex_shrink * item.basis;
            let delta = remaining * (scaled / shrink);
            let base = item.basis + delta;
            let bound = Number::defined(base).maybe_clamp(item.min_main, item.max_main).0;
            if (bound - base).abs() > 1e-4 {
                shrink -= scaled;
                remaining -= bound - item.basis;
                item.main_size = bound;
                item.frozen = true;
            }
        }
    } else if remaining > 0.0 && grow > 0.0 {
        for item in items.iter_mut() {
            if item.flex_grow <= 0.0 {
                continue;
            }
            let delta = remaining * (item.flex_grow / grow);
            let base = item.basis + delta;
            let bound = Number::defined(base).maybe_clamp(item.min_main, item.max_main).0;
            if (bound - base).abs() > 1e-4 {
                grow -= item.flex_grow;
                remaining -= bound - item.basis;
                item.main_size = bound;
                item.frozen = true;
            }
        }
    }

    // Pass 2: distribute the (possibly reduced) remaining space among the still-unfrozen items.
    for item in items.iter_mut() {
        if item.frozen {
            continue;
        }
        let delta = if remaining < 0.0 && shrink > 0.0 {
            remaining * (item.flex_shrink * item.basis / shrink)
        } else if remaining > 0.0 && grow > 0.0 {
            remaining * (item.flex_grow / grow)
        } else {
            0.0
        };
        let base = item.basis + delta;
        item.main_size = Number::defined(base).maybe_clamp(item.min_main, item.max_main).0.max(0.0);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_item_cross_size<Context: Clone>(
    tree: &mut FlexTree<Context>,
    item: &mut Item,
    parent_style: &Style,
    main_axis: Axis,
    cross_axis: Axis,
    content_cross: Number,
    mode_cross: MeasureMode,
    is_wrap: bool,
    resolved_direction: Direction,
    parent_width: Number,
    parent_height: Number,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<f32> {
    let align = parent_style.align_for_child(&item.style);
    let min_cross = item.style.min_size.get(cross_axis).resolve(content_cross);
    let max_cross = item.style.max_size.get(cross_axis).resolve(content_cross);

    let style_cross = item.style.resolve_dimension(cross_axis).resolve(content_cross);

    let cross_auto_margin = is_margin_auto(&item.style, leading_edge(flip_for(cross_axis)), resolved_direction)
        || is_margin_auto(&item.style, trailing_edge(flip_for(cross_axis)), resolved_direction);

    // A container that wraps can't know its final per-line cross size until every line has been
    // collected (§4.5 Step 10), so a `Stretch` item here is only measured at its natural content
    // size (`AtMost` against `content_cross`), not pre-stretched to the whole container — the real
    // stretch happens later in `align_cross` against each line's own `line_cross_dim`. A non-wrap
    // container has exactly one line, so `content_cross` already *is* that line's final size.
    let target: Number = if let Some(ratio) = item.style.aspect_ratio {
        let main_known = Number::defined(item.main_size);
        let derived = if main_axis == Axis::Horizontal { main_known.0 / ratio } else { main_known.0 * ratio };
        Number::defined(derived)
    } else if style_cross.is_defined() {
        style_cross
    } else if align == Align::Stretch && mode_cross.is_exactly() && !cross_auto_margin && !is_wrap {
        content_cross
    } else {
        Number::UNDEFINED
    };

    let (cross_avail, cross_mode) = if target.is_defined() {
        (target, MeasureMode::Exactly)
    } else {
        (content_cross, if content_cross.is_defined() { MeasureMode::AtMost } else { MeasureMode::Undefined })
    };

    let avail = size_for_axes(main_axis, Number::defined(item.main_size), cross_avail);
    let modes = size_for_axes(main_axis, MeasureMode::Exactly, cross_mode);
    let size = compute_node_layout(
        tree,
        item.id,
        avail.width,
        avail.height,
        resolved_direction,
        modes.width,
        modes.height,
        parent_width,
        parent_height,
        false,
        measure,
    )?;

    let cross = Number::defined(*size.get(cross_axis)).maybe_clamp(min_cross, max_cross).0;
    Ok(cross)
}

fn flip_for(axis: Axis) -> FlexDirection {
    match axis {
        Axis::Horizontal => FlexDirection::Row,
        Axis::Vertical => FlexDirection::Column,
    }
}

fn justify_line(items: &mut [Item], flow: &crate::compute::edges::ResolvedFlow, justify: JustifyContent, content_main: Number, mode_main: MeasureMode, direction: Direction) {
    let used: f32 = items.iter().map(|i| i.main_size + i.edges.margin_for_axis(flow.main)).sum();
    let mut free = content_main.into_option().map(|c| c - used).unwrap_or(0.0);
    if mode_main.is_at_most() && free > 0.0 {
        free = free.max(0.0);
    }
    free = free.max(0.0);

    let auto_margin_edges: Vec<(bool, bool)> = items
        .iter()
        .map(|i| {
            let leading = is_margin_auto(&i.style, leading_edge(flow.main), direction);
            let trailing = is_margin_auto(&i.style, trailing_edge(flow.main), direction);
            (leading, trailing)
        })
        .collect();
    let auto_margin_count: usize = auto_margin_edges.iter().map(|(a, b)| usize::from(*a) + usize::from(*b)).sum();

    let n = items.len();
    let (mut cursor, between) = if auto_margin_count > 0 {
        (0.0, 0.0)
    } else {
        match justify {
            JustifyContent::FlexStart => (0.0, 0.0),
            JustifyContent::Center => (free / 2.0, 0.0),
            JustifyContent::FlexEnd => (free, 0.0),
            JustifyContent::SpaceBetween => (0.0, if n > 1 { free / (n - 1) as f32 } else { 0.0 }),
            JustifyContent::SpaceAround => (free / (2.0 * n as f32), free / n as f32),
            JustifyContent::SpaceEvenly => (free / (n + 1) as f32, free / (n + 1) as f32),
        }
    };

    let per_auto_margin = if auto_margin_count > 0 { free / auto_margin_count as f32 } else { 0.0 };

    for (idx, item) in items.iter_mut().enumerate() {
        let (auto_leading, auto_trailing) = auto_margin_edges[idx];
        if auto_leading {
            cursor += per_auto_margin;
        }
        item.main_pos = cursor;
        cursor += item.main_size + item.edges.margin_for_axis(flow.main);
        if auto_trailing {
            cursor += per_auto_margin;
        }
        if idx + 1 < n {
            cursor += between;
        }
    }
}

/// Step 9's cross-axis alignment, plus the re-stretch every Stretch item needs against its own
/// line's `line_cross_dim` rather than the whole container's cross size (§4.5 Step 10: "re-layout
/// stretch children per line if their cross is not defined").
#[allow(clippy::too_many_arguments)]
fn align_cross<Context: Clone>(
    tree: &mut FlexTree<Context>,
    items: &mut [Item],
    flow: &crate::compute::edges::ResolvedFlow,
    parent_style: &Style,
    main_axis: Axis,
    cross_axis: Axis,
    mode_cross: MeasureMode,
    content_cross: Number,
    line_cross_dim: f32,
    line_offset: f32,
    direction: Direction,
    parent_width: Number,
    parent_height: Number,
    measure: &mut MeasureClosure<Context>,
) -> LayoutResult<()> {
    let mut aligns: Vec<Align> = Vec::with_capacity(items.len());
    let mut ascents: Vec<f32> = Vec::with_capacity(items.len());
    let mut max_ascent = 0.0f32;

    for item in items.iter() {
        let mut align = parent_style.align_for_child(&item.style);
        if align == Align::Baseline && (flow.main.is_column() || !tree.node_data(item.id)?.needs_baseline) {
            align = Align::FlexStart;
        }
        let ascent = if align == Align::Baseline {
            let ascent = match tree.node_data(item.id)?.baseline.clone() {
                Some(baseline_fn) => baseline_fn(item.id, item.main_size, item.cross_size),
                None => item.cross_size,
            };
            max_ascent = max_ascent.max(ascent);
            ascent
        } else {
            0.0
        };
        aligns.push(align);
        ascents.push(ascent);
    }

    for (idx, item) in items.iter_mut().enumerate() {
        let align = aligns[idx];

        if align == Align::Stretch {
            let min_cross = item.style.min_size.get(cross_axis).resolve(content_cross);
            let max_cross = item.style.max_size.get(cross_axis).resolve(content_cross);
            let style_cross = item.style.resolve_dimension(cross_axis).resolve(content_cross);
            let cross_auto_margin = is_margin_auto(&item.style, leading_edge(flip_for(cross_axis)), direction)
                || is_margin_auto(&item.style, trailing_edge(flip_for(cross_axis)), direction);

            if style_cross.is_undefined() && item.style.aspect_ratio.is_none() && mode_cross.is_exactly() && !cross_auto_margin {
                let target = Number::defined(line_cross_dim).maybe_clamp(min_cross, max_cross);
                if (target.0 - item.cross_size).abs() > 1e-4 {
                    let avail = size_for_axes(main_axis, Number::defined(item.main_size), target);
                    let modes = size_for_axes(main_axis, MeasureMode::Exactly, MeasureMode::Exactly);
                    let size = compute_node_layout(
                        tree,
                        item.id,
                        avail.width,
                        avail.height,
                        direction,
                        modes.width,
                        modes.height,
                        parent_width,
                        parent_height,
                        true,
                        measure,
                    )?;
                    item.cross_size = Number::defined(*size.get(cross_axis)).maybe_clamp(min_cross, max_cross).0;
                }
            }
        }

        let auto_leading = is_margin_auto(&item.style, leading_edge(flow.cross), direction);
        let auto_trailing = is_margin_auto(&item.style, trailing_edge(flow.cross), direction);
        let free = (line_cross_dim - item.cross_size - item.edges.margin_for_axis(flow.cross)).max(0.0);

        item.cross_pos = if auto_leading && auto_trailing {
            line_offset + free / 2.0
        } else if auto_leading {
            line_offset + free
        } else if auto_trailing {
            line_offset
        } else {
            match align {
                Align::Center => line_offset + free / 2.0,
                Align::FlexEnd => line_offset + free,
                Align::Baseline => line_offset + (max_ascent - ascents[idx]),
                Align::Stretch | Align::FlexStart => line_offset,
                Align::SpaceBetween | Align::SpaceAround | Align::Auto => line_offset,
            }
        };
    }
    Ok(())
}

fn finalize_dim(mode: MeasureMode, inner_available: Number, content_size: f32, pb: f32, min: Number, max: Number, overflow: Overflow) -> f32 {
    let natural = content_size + pb;
    let value = if mode.is_exactly() {
        inner_available.or(natural)
    } else if mode.is_at_most() {
        match (inner_available.into_option(), overflow) {
            (Some(a), Overflow::Scroll) => natural.clamp(pb, (a + pb).max(pb)),
            (Some(a), _) => natural.min(a.max(pb)),
            (None, _) => natural,
        }
    } else {
        natural
    };
    let value = Number::defined(value).maybe_clamp(min, max).0;
    value.max(pb)
}

#[allow(clippy::too_many_arguments)]
fn apply_trailing_fixup<Context: Clone>(
    tree: &mut FlexTree<Context>,
    node: NodeId,
    main_axis: Axis,
    cross_axis: Axis,
    main_dir: FlexDirection,
    cross_dir: FlexDirection,
    container_size: Size<f32>,
) -> LayoutResult<()> {
    let children: Vec<NodeId> = tree.children(node)?.to_vec();
    for child in children {
        let child_style = tree.style(child)?.clone();
        if child_style.display == Display::None {
            continue;
        }
        let data = tree.node_data_mut(child)?;
        if main_dir.is_reverse() {
            let dim = *data.layout.dimensions.get(main_axis);
            let container_main = *container_size.get(main_axis);
            let pos_leading = match main_axis {
                Axis::Horizontal => data.layout.position.left,
                Axis::Vertical => data.layout.position.top,
            };
            let trailing = container_main - dim - pos_leading;
            match trailing_edge(main_dir) {
                Edge::Right => data.layout.position.right = trailing,
                Edge::Left => data.layout.position.left = trailing,
                Edge::Bottom => data.layout.position.bottom = trailing,
                Edge::Top => data.layout.position.top = trailing,
                _ => {}
            }
        }
        if cross_dir.is_reverse() {
            let dim = *data.layout.dimensions.get(cross_axis);
            let container_cross = *container_size.get(cross_axis);
            let pos_leading = match cross_axis {
                Axis::Horizontal => data.layout.position.left,
                Axis::Vertical => data.layout.position.top,
            };
            let trailing = container_cross - dim - pos_leading;
            match trailing_edge(cross_dir) {
                Edge::Right => data.layout.position.right = trailing,
                Edge::Left => data.layout.position.left = trailing,
                Edge::Bottom => data.layout.position.bottom = trailing,
                Edge::Top => data.layout.position.top = trailing,
                _ => {}
            }
        }
    }
    Ok(())
}
