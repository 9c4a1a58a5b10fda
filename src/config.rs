//! Process-or-caller-scoped configuration shared by a group of nodes (§3.7).

use alloc::rc::Rc;
use core::fmt;

use crate::tree::NodeId;

/// Experimental feature toggles. Kept as a bitflag-shaped struct rather than an enum set so new
/// flags can be added without breaking callers who construct `Config` with `..Default::default()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExperimentalFeatures {
    /// Mirrors the source's `WebFlexBasis` experimental flag: when set, an auto flex-basis is
    /// measured from content even when the node is the single flex child of an exactly-sized
    /// container, rather than being short-circuited (§4.5 Step 5, "single flex child").
    pub web_flex_basis: bool,
}

/// `LoggerFunc` (§6): invoked in addition to the `log` crate facade, never instead of it
/// (SPEC_FULL §B.2).
pub type LoggerFunc<Context> = Rc<dyn Fn(&Config<Context>, Option<NodeId>, log::Level, &str)>;

/// `ClonedFunc` (§6): notified whenever copy-on-write clones a child during a tree mutation.
pub type ClonedFunc<Context> = Rc<dyn Fn(NodeId, NodeId, NodeId, usize)>;

/// `BaselineFunc(node, w, h) -> y` (§6): returns a node's ascent for `alignItems`/`alignSelf:
/// Baseline` on a row main axis. Set per-node via [`crate::tree::FlexTree::set_baseline_func`],
/// not on `Config`, mirroring `dirtied` rather than `logger`/`cloned`.
pub type BaselineFunc<Context> = Rc<dyn Fn(NodeId, f32, f32) -> f32>;

/// A config instance. Cheaply cloneable (`Rc`-backed internally via [`ConfigRef`]); multiple
/// nodes may share one.
pub struct Config<Context = ()> {
    pub experimental_features: ExperimentalFeatures,
    pub use_web_defaults: bool,
    pub use_legacy_stretch_behaviour: bool,
    pub should_diff_layout_without_legacy_stretch_behaviour: bool,
    /// `0.0` disables pixel-grid rounding (§4.5 Pixel-grid rounding).
    pub point_scale_factor: f32,
    pub logger: Option<LoggerFunc<Context>>,
    pub cloned: Option<ClonedFunc<Context>>,
    pub context: Option<Context>,
}

impl<Context> fmt::Debug for Config<Context> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("experimental_features", &self.experimental_features)
            .field("use_web_defaults", &self.use_web_defaults)
            .field("use_legacy_stretch_behaviour", &self.use_legacy_stretch_behaviour)
            .field(
                "should_diff_layout_without_legacy_stretch_behaviour",
                &self.should_diff_layout_without_legacy_stretch_behaviour,
            )
            .field("point_scale_factor", &self.point_scale_factor)
            .finish()
    }
}

impl<Context> Default for Config<Context> {
    fn default() -> Self {
        Config {
            experimental_features: ExperimentalFeatures::default(),
            use_web_defaults: false,
            use_legacy_stretch_behaviour: false,
            should_diff_layout_without_legacy_stretch_behaviour: false,
            point_scale_factor: 1.0,
            logger: None,
            cloned: None,
            context: None,
        }
    }
}

impl<Context> Config<Context> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_experimental_feature_enabled(&mut self, feature: fn(&mut ExperimentalFeatures, bool), enabled: bool) {
        feature(&mut self.experimental_features, enabled);
    }

    /// Emits through both the `log` facade and, if installed, the caller's logger closure
    /// (SPEC_FULL §B.2).
    pub fn log(&self, node: Option<NodeId>, level: log::Level, message: &str) {
        log::log!(level, "{message}");
        if let Some(logger) = &self.logger {
            logger(self, node, level, message);
        }
    }
}

/// A shared, reference-counted handle to a [`Config`]. Cloning a [`ConfigRef`] is an `Rc` bump,
/// not a deep copy: many nodes hold the same `ConfigRef` (§3.7).
pub type ConfigRef<Context> = Rc<Config<Context>>;
