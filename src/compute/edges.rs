//! Shared margin/border/padding resolution (§3.3, §4.5 Step 0), used by every step of the solver.

use crate::geometry::{Axis, Edge};
use crate::number::Number;
use crate::style::{
    computed_physical_edge, flex_direction_cross, leading_edge, resolve_flex_direction, trailing_edge, Direction,
    FlexDirection, Style, StyleLength,
};
use crate::tree::ComputedEdges;

/// The node's resolved main and cross flow directions (§4.3). Cross is never itself reversed by
/// direction resolution; only a row main axis mirrors under RTL.
pub(crate) struct ResolvedFlow {
    pub main: FlexDirection,
    pub cross: FlexDirection,
    pub direction: Direction,
}

pub(crate) fn resolve_flow(style: &Style, resolved_direction: Direction) -> ResolvedFlow {
    let main = resolve_flex_direction(style.flex_direction, resolved_direction);
    let cross = flex_direction_cross(main, resolved_direction);
    ResolvedFlow { main, cross, direction: resolved_direction }
}

/// Resolved margin, border and padding in absolute pixels, keyed by physical edge (§3.3).
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BoxEdges {
    pub margin: ComputedEdges,
    pub border: ComputedEdges,
    pub padding: ComputedEdges,
}

impl BoxEdges {
    pub fn leading(&self, edges: &ComputedEdges, axis_dir: FlexDirection) -> f32 {
        edges.get(leading_edge(axis_dir))
    }

    pub fn trailing(&self, edges: &ComputedEdges, axis_dir: FlexDirection) -> f32 {
        edges.get(trailing_edge(axis_dir))
    }

    pub fn margin_for_axis(&self, axis_dir: FlexDirection) -> f32 {
        self.leading(&self.margin, axis_dir) + self.trailing(&self.margin, axis_dir)
    }

    pub fn padding_and_border_for_axis(&self, axis_dir: FlexDirection) -> f32 {
        self.leading(&self.padding, axis_dir)
            + self.trailing(&self.padding, axis_dir)
            + self.leading(&self.border, axis_dir)
            + self.trailing(&self.border, axis_dir)
    }

    pub fn margin_axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.margin.get(Edge::Left) + self.margin.get(Edge::Right),
            Axis::Vertical => self.margin.get(Edge::Top) + self.margin.get(Edge::Bottom),
        }
    }

    pub fn padding_and_border_axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => {
                self.padding.get(Edge::Left) + self.padding.get(Edge::Right) + self.border.get(Edge::Left) + self.border.get(Edge::Right)
            }
            Axis::Vertical => {
                self.padding.get(Edge::Top) + self.padding.get(Edge::Bottom) + self.border.get(Edge::Top) + self.border.get(Edge::Bottom)
            }
        }
    }
}

/// Resolves margin/border/padding against the parent's width (CSS percentages for all four edges
/// resolve against the containing block's width, never its height).
pub(crate) fn resolve_box_edges(style: &Style, direction: Direction, parent_width: Number) -> BoxEdges {
    let margin = resolve_edge_set(&style.margin, direction, parent_width, true);
    let border = resolve_edge_set(&style.border, direction, parent_width, false);
    let padding = resolve_edge_set(&style.padding, direction, parent_width, false);
    BoxEdges { margin, border, padding }
}

fn resolve_edge_set(
    edges: &crate::style::EdgeValues,
    direction: Direction,
    parent_width: Number,
    allow_auto_zero: bool,
) -> ComputedEdges {
    let mut out = ComputedEdges::default();
    let resolve = |lv: StyleLength| -> f32 {
        if allow_auto_zero && lv.is_auto() {
            0.0
        } else {
            lv.resolve(parent_width).or(0.0)
        }
    };

    let left = resolve(computed_physical_edge(edges, Edge::Left, direction, StyleLength::ZERO));
    let right = resolve(computed_physical_edge(edges, Edge::Right, direction, StyleLength::ZERO));
    let top = resolve(computed_physical_edge(edges, Edge::Top, direction, StyleLength::ZERO));
    let bottom = resolve(computed_physical_edge(edges, Edge::Bottom, direction, StyleLength::ZERO));

    out.set(Edge::Left, left);
    out.set(Edge::Right, right);
    out.set(Edge::Top, top);
    out.set(Edge::Bottom, bottom);
    out.set(Edge::Start, if direction == Direction::RTL { right } else { left });
    out.set(Edge::End, if direction == Direction::RTL { left } else { right });
    out
}

/// Whether a margin edge is `Auto` (used by the justify/align auto-margin rules of §4.5 Steps
/// 8-9); resolved independent of parent size since we only need the unit, not the value.
pub(crate) fn is_margin_auto(style: &Style, physical: Edge, direction: Direction) -> bool {
    computed_physical_edge(&style.margin, physical, direction, StyleLength::ZERO).is_auto()
}
