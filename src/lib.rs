//! A deterministic flexbox layout engine (spec.md §1-§2).
//!
//! The core is [`tree::FlexTree`], an arena of styled, measurable boxes. Build a tree with
//! [`tree::FlexTree::new_leaf`]/[`tree::FlexTree::new_with_children`], then call
//! [`tree::FlexTree::compute_layout`] (or [`tree::FlexTree::compute_layout_with_measure`] for
//! trees with measure-function leaves, e.g. text) and read results back with
//! [`tree::FlexTree::layout`].
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod compute;
pub mod config;
pub mod error;
pub mod geometry;
pub mod number;
pub mod style;
pub mod tree;
pub mod util;

pub mod prelude {
    //! Common imports for building and reading a tree.
    pub use crate::compute::MeasureMode;
    pub use crate::config::{BaselineFunc, ClonedFunc, Config, ConfigRef, ExperimentalFeatures, LoggerFunc};
    pub use crate::error::{LayoutError, LayoutResult};
    pub use crate::geometry::{Axis, Edge, Point, Rect, Size};
    pub use crate::number::Number;
    pub use crate::style::{
        Align, Direction, Display, EdgeValues, FlexDirection, FlexWrap, JustifyContent, Overflow, PositionType, Style, StyleLength,
    };
    pub use crate::tree::{FlexTree, Layout, NodeId, NodeType};
}

use crate::compute::MeasureMode;
use crate::error::LayoutResult;
use crate::geometry::{Axis, Size};
use crate::number::Number;
use crate::style::{Direction, Style};
use crate::tree::{FlexTree, NodeId};

impl<Context: Clone> FlexTree<Context> {
    /// `CalculateLayout` (§4.5, §6): the sole recursion entry point. Mirrors the source's
    /// `YGNodeCalculateLayout(root, width, height, direction)` — an axis with a defined
    /// `available_space` gets an `Exactly` constraint, an undefined one gets `Undefined`; the
    /// root is never itself constrained `AtMost` (that mode only ever arises once a descendant is
    /// being sized against a container whose own size isn't fixed yet). Bumps the tree's
    /// generation counter (§4.4) before recursing, then runs the pixel-grid rounding pass (§4.5)
    /// using the root's own config.
    pub fn compute_layout_with_measure<F>(&mut self, root: NodeId, available_space: Size<Number>, mut measure: F) -> LayoutResult<()>
    where
        F: FnMut(&Style, Option<&mut Context>, Size<Number>, Size<MeasureMode>) -> Size<f32>,
    {
        let style = self.style(root)?.clone();
        self.bump_generation();

        // A root with its own defined dimension (§4.3 `ResolveDimension`) uses that instead of
        // `available_space`, matching the source's `YGNodeCalculateLayout` entry point; only a
        // style-undefined axis falls back to the caller-supplied space.
        let style_width = style.resolve_dimension(Axis::Horizontal).resolve(available_space.width);
        let style_height = style.resolve_dimension(Axis::Vertical).resolve(available_space.height);

        let (width, width_mode) = if style_width.is_defined() {
            (style_width, MeasureMode::Exactly)
        } else if available_space.width.is_defined() {
            (available_space.width, MeasureMode::Exactly)
        } else {
            (Number::UNDEFINED, MeasureMode::Undefined)
        };
        let (height, height_mode) = if style_height.is_defined() {
            (style_height, MeasureMode::Exactly)
        } else if available_space.height.is_defined() {
            (available_space.height, MeasureMode::Exactly)
        } else {
            (Number::UNDEFINED, MeasureMode::Undefined)
        };

        compute::compute_node_layout(self, root, width, height, Direction::LTR, width_mode, height_mode, width, height, true, &mut measure)?;

        let scale = self.node_data(root)?.config.point_scale_factor;
        compute::round_layout(self, root, scale)
    }

    /// [`FlexTree::compute_layout_with_measure`] for a tree with no measure-function leaves.
    /// Calling this on a tree that does have one is a logic error: the closure here is never
    /// invoked, so any `needs_measure` leaf would get a zero size.
    pub fn compute_layout(&mut self, root: NodeId, available_space: Size<Number>) -> LayoutResult<()> {
        self.compute_layout_with_measure(root, available_space, |_, _, _, _| Size::ZERO)
    }
}
