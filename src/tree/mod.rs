//! The node tree (§3.4) and its computed-layout output (§3.5).

pub mod layout;
pub mod node;

pub use layout::{CachedMeasurement, ComputedEdges, Layout, MeasureCache, MAX_CACHED_MEASUREMENTS};
pub use node::{FlexTree, NodeId, NodeType};

pub(crate) use node::NodeData;
