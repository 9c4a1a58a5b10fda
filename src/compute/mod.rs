//! The recursive layout solver (§4.5). This is the 65%-of-the-budget core: flex-basis
//! computation, line collection, free-space distribution, main/cross-axis alignment, absolute
//! placement, trailing-position fixup and pixel-grid rounding.

mod absolute;
mod edges;
mod flexbox;
mod leaf;
mod rounding;

pub use flexbox::compute_node_layout;
pub use rounding::round_layout;

use crate::geometry::Size;
use crate::number::Number;
use crate::style::Style;

/// The single tree-wide measurement closure threaded through the whole recursion (§6
/// `MeasureFunc`), mirroring the teacher's `compute_layout_with_measure` rather than a per-node
/// boxed closure.
pub(crate) type MeasureClosure<'a, Context> =
    dyn FnMut(&Style, Option<&mut Context>, Size<Number>, Size<MeasureMode>) -> Size<f32> + 'a;

/// How a node's available space in one axis was constrained (§4.5 precondition, GLOSSARY).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeasureMode {
    /// No constraint; the node should use its intrinsic size.
    Undefined,
    /// The available size must be met exactly.
    Exactly,
    /// The available size is an upper bound the node must not exceed.
    AtMost,
}

impl MeasureMode {
    pub fn is_exactly(self) -> bool {
        matches!(self, MeasureMode::Exactly)
    }

    pub fn is_at_most(self) -> bool {
        matches!(self, MeasureMode::AtMost)
    }
}
