//! Error classification (§7). Programmer-error preconditions and measurement errors surface as
//! [`LayoutError`] instead of aborting the process outright, so an engine embedded in a larger
//! application can recover (SPEC_FULL §B.1).

use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("node {0:?} is not part of this tree")]
    InvalidNode(NodeId),

    #[error("node {child:?} already has a parent and cannot be inserted into {parent:?}")]
    ChildAlreadyHasParent { parent: NodeId, child: NodeId },

    #[error("node {0:?} has a measure function and cannot accept children")]
    MeasureNodeCannotHaveChildren(NodeId),

    #[error("child index {index} out of bounds for parent {parent:?} with {child_count} children")]
    ChildIndexOutOfBounds { parent: NodeId, index: usize, child_count: usize },

    #[error("node {0:?} could not be found among its parent's children")]
    ChildNotFound(NodeId),

    #[error("MarkDirty may only be called on a node with a measure function ({0:?} has none)")]
    MarkDirtyRequiresMeasureFunction(NodeId),

    #[error("Reset requires a node with no children and no parent ({0:?} has one or the other)")]
    ResetRequiresDetachedNode(NodeId),

    #[error("measure callback for node {0:?} returned NaN")]
    MeasureReturnedNaN(NodeId),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
