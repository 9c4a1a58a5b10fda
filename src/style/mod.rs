//! Per-node style (§3.2) and edge/direction resolution (§3.3, §4.3).

pub mod length;

use crate::geometry::{Edge, Size, EDGE_COUNT};
use crate::number::Number;
pub use length::StyleLength;

/// Resolved writing direction. `Inherit` is only ever a *style* value; resolved layout direction
/// is always `LTR` or `RTL` (§4.3).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Inherit,
    LTR,
    RTL,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_column(self) -> bool {
        !self.is_row()
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }

    pub fn reverse(self) -> FlexDirection {
        match self {
            FlexDirection::Row => FlexDirection::RowReverse,
            FlexDirection::RowReverse => FlexDirection::Row,
            FlexDirection::Column => FlexDirection::ColumnReverse,
            FlexDirection::ColumnReverse => FlexDirection::Column,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Only valid for `align_self`; means "defer to the parent's `align_items`".
    Auto,
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    Baseline,
    SpaceBetween,
    SpaceAround,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionType {
    #[default]
    Relative,
    Absolute,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// One value per [`Edge`] (§3.2). Backed by a fixed array so lookups never allocate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeValues(pub [StyleLength; EDGE_COUNT]);

impl Default for EdgeValues {
    fn default() -> Self {
        EdgeValues([StyleLength::Undefined; EDGE_COUNT])
    }
}

impl EdgeValues {
    pub fn get(&self, edge: Edge) -> StyleLength {
        self.0[edge.index()]
    }

    pub fn set(&mut self, edge: Edge, value: StyleLength) {
        self.0[edge.index()] = value;
    }
}

/// Edge resolution per §3.3. `row_is_rtl` controls whether, in a row-flow axis, `Start`/`End`
/// values take precedence over `Left`/`Right` when both are defined (they always do; the flag
/// only affects which physical edge `Start`/`End` *are*, which the caller has already baked into
/// how it calls this function by passing the right [`Edge`]).
pub fn computed_edge_value(edges: &EdgeValues, edge: Edge, default: StyleLength) -> StyleLength {
    let direct = edges.get(edge);
    if direct.is_defined() {
        return direct;
    }

    match edge {
        Edge::Top | Edge::Bottom => {
            let v = edges.get(Edge::Vertical);
            if v.is_defined() {
                return v;
            }
        }
        Edge::Left | Edge::Right | Edge::Start | Edge::End => {
            let v = edges.get(Edge::Horizontal);
            if v.is_defined() {
                return v;
            }
        }
        _ => {}
    }

    let all = edges.get(Edge::All);
    if all.is_defined() {
        return all;
    }

    if matches!(edge, Edge::Start | Edge::End) {
        return StyleLength::Undefined;
    }

    default
}

/// A node's style (§3.2). Immutable by convention: [`crate::tree::FlexTree::set_style`] is the
/// only way to mutate a node's style after creation, and it always re-dirties the subtree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_content: Align,
    pub align_items: Align,
    pub align_self: Align,
    pub position_type: PositionType,
    pub flex_wrap: FlexWrap,
    pub overflow: Overflow,
    pub display: Display,

    pub flex: Option<f32>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub aspect_ratio: Option<f32>,
    pub flex_basis: StyleLength,

    pub margin: EdgeValues,
    pub position: EdgeValues,
    pub padding: EdgeValues,
    pub border: EdgeValues,

    pub size: Size<StyleLength>,
    pub min_size: Size<StyleLength>,
    pub max_size: Size<StyleLength>,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            direction: Direction::default(),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::default(),
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::default(),
            flex_wrap: FlexWrap::default(),
            overflow: Overflow::default(),
            display: Display::default(),
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            aspect_ratio: None,
            flex_basis: StyleLength::Auto,
            margin: EdgeValues::default(),
            position: EdgeValues::default(),
            padding: EdgeValues::default(),
            border: EdgeValues::default(),
            size: Size { width: StyleLength::Auto, height: StyleLength::Auto },
            min_size: Size { width: StyleLength::Auto, height: StyleLength::Auto },
            max_size: Size { width: StyleLength::Auto, height: StyleLength::Auto },
        }
    }
}

impl Style {
    /// A style matching [`crate::tree::FlexTree::new_leaf`]'s `use_web_defaults` variant:
    /// row main axis and stretch `align_content` (§4.2).
    pub fn web_defaults() -> Style {
        Style { flex_direction: FlexDirection::Row, align_content: Align::Stretch, ..Style::default() }
    }

    /// Effective flex-grow factor (§4.3): `flex_grow` if set, else `flex` if positive, else `0`.
    pub fn resolve_flex_grow(&self) -> f32 {
        if let Some(g) = self.flex_grow {
            return g;
        }
        if let Some(f) = self.flex {
            if f > 0.0 {
                return f;
            }
        }
        0.0
    }

    /// Effective flex-shrink factor (§4.3). `use_web_defaults` changes the implicit default from
    /// `0` to `1`.
    pub fn resolve_flex_shrink(&self, use_web_defaults: bool) -> f32 {
        if let Some(s) = self.flex_shrink {
            return s;
        }
        if !use_web_defaults {
            if let Some(f) = self.flex {
                if f < 0.0 {
                    return -f;
                }
            }
        }
        if use_web_defaults {
            1.0
        } else {
            0.0
        }
    }

    /// Effective flex-basis (§4.3): an undefined/auto style basis with positive `flex` collapses
    /// to `0` (or `Auto` under web defaults, which lets the browser-compatible basis come from
    /// content instead).
    pub fn resolve_flex_basis(&self, use_web_defaults: bool) -> StyleLength {
        let explicit = self.flex_basis;
        if !explicit.is_auto() && !matches!(explicit, StyleLength::Undefined) {
            return explicit;
        }
        if let Some(f) = self.flex {
            if f > 0.0 {
                return if use_web_defaults { StyleLength::Auto } else { StyleLength::ZERO };
            }
        }
        explicit
    }

    /// §4.3 `ResolveDimension`: if min and max are both defined and equal, pin to that value.
    pub fn resolve_dimension(&self, axis: crate::geometry::Axis) -> StyleLength {
        use crate::geometry::Axis;
        let (dim, min, max) = match axis {
            Axis::Horizontal => (self.size.width, self.min_size.width, self.max_size.width),
            Axis::Vertical => (self.size.height, self.min_size.height, self.max_size.height),
        };
        if min.is_defined() && max.is_defined() {
            if let (StyleLength::Point(a), StyleLength::Point(b)) = (min, max) {
                if (a - b).abs() < 1e-4 {
                    return max;
                }
            }
        }
        dim
    }

    /// The alignment to use for a child of this node: `child.align_self`, or this node's
    /// `align_items` if the child left it `Auto` (§4.3, §4.5 Step 9).
    pub fn align_for_child(&self, child: &Style) -> Align {
        if matches!(child.align_self, Align::Auto) {
            self.align_items
        } else {
            child.align_self
        }
    }

    pub fn is_flex_wrap(&self) -> bool {
        !matches!(self.flex_wrap, FlexWrap::NoWrap)
    }
}

/// Resolves a physical Left/Right edge honoring logical Start/End precedence (§3.3: "In
/// row-flow axes, Start/End take precedence over Left/Right when defined"). Top/Bottom never
/// have a logical counterpart (no vertical writing modes).
pub fn computed_physical_edge(edges: &EdgeValues, physical: Edge, direction: Direction, default: StyleLength) -> StyleLength {
    match physical {
        Edge::Left | Edge::Right => {
            let is_rtl = direction == Direction::RTL;
            let logical = match (physical, is_rtl) {
                (Edge::Left, false) | (Edge::Right, true) => Edge::Start,
                _ => Edge::End,
            };
            let v = computed_edge_value(edges, logical, StyleLength::Undefined);
            if v.is_defined() {
                return v;
            }
            computed_edge_value(edges, physical, default)
        }
        _ => computed_edge_value(edges, physical, default),
    }
}

/// §4.3 `ResolveDirection`.
pub fn resolve_direction(style_direction: Direction, parent_direction: Option<Direction>) -> Direction {
    match style_direction {
        Direction::Inherit => parent_direction.unwrap_or(Direction::LTR),
        other => other,
    }
}

/// §4.3 `ResolveFlexDirection`: mirror row axes under RTL.
pub fn resolve_flex_direction(dir: FlexDirection, resolved_direction: Direction) -> FlexDirection {
    if resolved_direction == Direction::RTL && dir.is_row() {
        dir.reverse()
    } else {
        dir
    }
}

/// §4.3 `FlexDirectionCross`: the axis orthogonal to `dir`, itself resolved for RTL if it's a row.
pub fn flex_direction_cross(dir: FlexDirection, resolved_direction: Direction) -> FlexDirection {
    if dir.is_column() {
        resolve_flex_direction(FlexDirection::Row, resolved_direction)
    } else {
        FlexDirection::Column
    }
}

/// The physical leading edge for a flex-direction value (ignores wrap-reverse, which flips the
/// cross axis post-hoc in §4.5 Step 12 rather than here).
pub fn leading_edge(dir: FlexDirection) -> Edge {
    match dir {
        FlexDirection::Row => Edge::Left,
        FlexDirection::RowReverse => Edge::Right,
        FlexDirection::Column => Edge::Top,
        FlexDirection::ColumnReverse => Edge::Bottom,
    }
}

pub fn trailing_edge(dir: FlexDirection) -> Edge {
    match dir {
        FlexDirection::Row => Edge::Right,
        FlexDirection::RowReverse => Edge::Left,
        FlexDirection::Column => Edge::Bottom,
        FlexDirection::ColumnReverse => Edge::Top,
    }
}

/// The axis (horizontal/vertical) a flex-direction flows along.
pub fn axis_for(dir: FlexDirection) -> crate::geometry::Axis {
    if dir.is_row() {
        crate::geometry::Axis::Horizontal
    } else {
        crate::geometry::Axis::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_resolution_falls_back_through_vertical_then_all() {
        let mut edges = EdgeValues::default();
        edges.set(Edge::All, StyleLength::Point(4.0));
        assert_eq!(computed_edge_value(&edges, Edge::Top, StyleLength::ZERO), StyleLength::Point(4.0));

        edges.set(Edge::Vertical, StyleLength::Point(8.0));
        assert_eq!(computed_edge_value(&edges, Edge::Top, StyleLength::ZERO), StyleLength::Point(8.0));

        edges.set(Edge::Top, StyleLength::Point(16.0));
        assert_eq!(computed_edge_value(&edges, Edge::Top, StyleLength::ZERO), StyleLength::Point(16.0));
    }

    #[test]
    fn start_end_never_fall_back_to_default() {
        let edges = EdgeValues::default();
        assert_eq!(computed_edge_value(&edges, Edge::Start, StyleLength::Point(99.0)), StyleLength::Undefined);
    }

    #[test]
    fn resolve_direction_inherits_or_defaults_ltr() {
        assert_eq!(resolve_direction(Direction::Inherit, Some(Direction::RTL)), Direction::RTL);
        assert_eq!(resolve_direction(Direction::Inherit, None), Direction::LTR);
        assert_eq!(resolve_direction(Direction::RTL, Some(Direction::LTR)), Direction::RTL);
    }

    #[test]
    fn rtl_mirrors_row_direction() {
        assert_eq!(resolve_flex_direction(FlexDirection::Row, Direction::RTL), FlexDirection::RowReverse);
        assert_eq!(resolve_flex_direction(FlexDirection::Column, Direction::RTL), FlexDirection::Column);
    }

    #[test]
    fn resolve_flex_basis_collapses_to_zero_when_growing() {
        let style = Style { flex: Some(1.0), flex_basis: StyleLength::Auto, ..Style::default() };
        assert_eq!(style.resolve_flex_basis(false), StyleLength::ZERO);
        assert_eq!(style.resolve_flex_basis(true), StyleLength::Auto);
    }
}
