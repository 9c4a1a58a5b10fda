//! The node tree (§3.4, §4.2) and its copy-on-write child sharing (§3.6).

use alloc::rc::Rc;
use alloc::vec::Vec;

use slotmap::{new_key_type, SlotMap, SparseSecondaryMap};

use crate::config::{BaselineFunc, Config, ConfigRef};
use crate::error::{LayoutError, LayoutResult};
use crate::style::Style;
use crate::tree::layout::Layout;

new_key_type! {
    /// An opaque handle to a node. Cheap to copy; carries no lifetime, so it can be stashed
    /// anywhere (§3.4: `parent` is a weak back reference, never an owning lifetime).
    pub struct NodeId;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeType {
    Default,
    Text,
}

/// Per-node data. Owns its `children` list exclusively unless the tree is in the shared
/// (copy-on-write) state described by §3.6, in which case `children[i]`'s `parent` back
/// reference points elsewhere until the next mutation triggers a clone.
pub(crate) struct NodeData<Context> {
    pub style: Style,
    pub node_type: NodeType,
    pub needs_measure: bool,
    pub needs_baseline: bool,
    pub baseline: Option<BaselineFunc<Context>>,
    pub dirtied: Option<Rc<dyn Fn(NodeId)>>,
    pub config: ConfigRef<Context>,
    pub layout: Layout,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub is_dirty: bool,
}

impl<Context> NodeData<Context> {
    fn new(style: Style, config: ConfigRef<Context>) -> Self {
        NodeData {
            style,
            node_type: NodeType::Default,
            needs_measure: false,
            needs_baseline: false,
            baseline: None,
            dirtied: None,
            config,
            layout: Layout::default(),
            parent: None,
            children: Vec::new(),
            is_dirty: true,
        }
    }
}

/// A tree of styled, measurable boxes (§3.4). `Context` is arbitrary user payload associated with
/// measure-function leaves, mirroring the teacher's `Taffy<NodeContext>` (`tree/taffy_tree/tree.rs`).
pub struct FlexTree<Context = ()> {
    pub(crate) nodes: SlotMap<NodeId, NodeData<Context>>,
    pub(crate) node_context_data: SparseSecondaryMap<NodeId, Context>,
    default_config: ConfigRef<Context>,
    /// `currentGenerationCount` (§4.4), scoped to this tree instance rather than process-wide, so
    /// concurrent independent `FlexTree`s never invalidate each other's caches (§5, §9).
    pub(crate) generation: u64,
}

impl<Context> Default for FlexTree<Context> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Context: Clone> FlexTree<Context> {
    pub fn new() -> Self {
        Self::with_config(Rc::new(Config::default()))
    }

    pub fn with_config(config: ConfigRef<Context>) -> Self {
        FlexTree {
            nodes: SlotMap::with_key(),
            node_context_data: SparseSecondaryMap::new(),
            default_config: config,
            generation: 0,
        }
    }

    fn require(&self, id: NodeId) -> LayoutResult<&NodeData<Context>> {
        self.nodes.get(id).ok_or(LayoutError::InvalidNode(id))
    }

    fn require_mut(&mut self, id: NodeId) -> LayoutResult<&mut NodeData<Context>> {
        self.nodes.get_mut(id).ok_or(LayoutError::InvalidNode(id))
    }

    /// Internal accessor for the solver (`crate::compute`), which needs direct access to layout,
    /// style and measure-function bookkeeping that the public API intentionally doesn't expose.
    pub(crate) fn node_data(&self, id: NodeId) -> LayoutResult<&NodeData<Context>> {
        self.require(id)
    }

    pub(crate) fn node_data_mut(&mut self, id: NodeId) -> LayoutResult<&mut NodeData<Context>> {
        self.require_mut(id)
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// `New`/`NewWithConfig` (§4.2, §6): a fresh node with column main axis (row under
    /// `use_web_defaults`), stretch `align_items`, auto dimensions.
    pub fn new_leaf(&mut self, style: Style) -> NodeId {
        self.new_leaf_with_config(style, self.default_config.clone())
    }

    pub fn new_leaf_with_config(&mut self, style: Style, config: ConfigRef<Context>) -> NodeId {
        let style = if config.use_web_defaults && style == Style::default() { Style::web_defaults() } else { style };
        self.nodes.insert(NodeData::new(style, config))
    }

    /// A leaf node with a measure function (§3.4 invariant: zero children). The `context` is
    /// threaded back to the closure passed to [`FlexTree::compute_layout_with_measure`].
    pub fn new_leaf_with_measure(&mut self, style: Style, context: Context) -> NodeId {
        let node = self.new_leaf(style);
        self.nodes[node].needs_measure = true;
        self.node_context_data.insert(node, context);
        node
    }

    pub fn new_with_children(&mut self, style: Style, children: &[NodeId]) -> LayoutResult<NodeId> {
        let node = self.new_leaf(style);
        for (i, child) in children.iter().enumerate() {
            self.insert_child(node, *child, i)?;
        }
        Ok(node)
    }

    /// Sets whether this node participates in baseline cross-axis alignment (§4.5 Step 9).
    pub fn set_needs_baseline(&mut self, node: NodeId, needs_baseline: bool) -> LayoutResult<()> {
        self.require_mut(node)?.needs_baseline = needs_baseline;
        Ok(())
    }

    /// Installs the `BaselineFunc` consulted for this node when an ancestor aligns it with
    /// `Baseline` on a row main axis (§4.5 Step 9, §6). Has no effect unless
    /// [`FlexTree::set_needs_baseline`] is also set: a node with no baseline func and
    /// `needs_baseline == false` is aligned as `FlexStart` instead.
    pub fn set_baseline_func(&mut self, node: NodeId, f: Option<BaselineFunc<Context>>) -> LayoutResult<()> {
        self.require_mut(node)?.baseline = f;
        Ok(())
    }

    pub fn set_node_type(&mut self, node: NodeId, node_type: NodeType) -> LayoutResult<()> {
        self.require_mut(node)?.node_type = node_type;
        Ok(())
    }

    pub fn set_dirtied_func(&mut self, node: NodeId, f: Option<Rc<dyn Fn(NodeId)>>) -> LayoutResult<()> {
        self.require_mut(node)?.dirtied = f;
        Ok(())
    }

    /// `Clone(node)` (§6): shallow clone that shares the child list (§3.6). Fires the config's
    /// `cloned` callback is the caller's responsibility at the call site that triggers the share
    /// (`ensure_owned_children`), not here — a bare `clone_node` call with no subsequent mutation
    /// never invokes it.
    pub fn clone_node(&mut self, node: NodeId) -> LayoutResult<NodeId> {
        let data = self.require(node)?;
        let cloned = NodeData {
            style: data.style.clone(),
            node_type: data.node_type,
            needs_measure: data.needs_measure,
            needs_baseline: data.needs_baseline,
            baseline: data.baseline.clone(),
            dirtied: data.dirtied.clone(),
            config: data.config.clone(),
            layout: data.layout.clone(),
            parent: None,
            children: data.children.clone(),
            is_dirty: data.is_dirty,
        };
        let context = self.node_context_data.get(node).cloned();
        let new_node = self.nodes.insert(cloned);
        if let Some(ctx) = context {
            self.node_context_data.insert(new_node, ctx);
        }
        Ok(new_node)
    }

    /// `InsertChild` (§4.2, §6). Fails if `child` already has a parent or `parent` has a measure
    /// function; triggers clone-on-write and marks `parent` dirty-and-propagates.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> LayoutResult<()> {
        if self.require(child)?.parent.is_some() {
            return Err(LayoutError::ChildAlreadyHasParent { parent, child });
        }
        if self.require(parent)?.needs_measure {
            return Err(LayoutError::MeasureNodeCannotHaveChildren(parent));
        }
        self.ensure_owned_children(parent)?;

        let parent_data = self.require_mut(parent)?;
        let index = index.min(parent_data.children.len());
        parent_data.children.insert(index, child);
        self.require_mut(child)?.parent = Some(parent);
        self.mark_dirty(parent)
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        let index = self.child_count(parent)?;
        self.insert_child(parent, child, index)
    }

    /// `RemoveChild` (§4.2): detaches if `parent` owns the child list; otherwise clones every
    /// *other* child so the excluded one remains valid under its other owner (§4.2).
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<NodeId> {
        let index = self
            .require(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(LayoutError::ChildNotFound(child))?;
        self.remove_child_at_index(parent, index)
    }

    pub fn remove_child_at_index(&mut self, parent: NodeId, index: usize) -> LayoutResult<NodeId> {
        self.ensure_owned_children(parent)?;
        let parent_data = self.require_mut(parent)?;
        let child_count = parent_data.children.len();
        if index >= child_count {
            return Err(LayoutError::ChildIndexOutOfBounds { parent, index, child_count });
        }
        let child = parent_data.children.remove(index);
        if let Ok(child_data) = self.require_mut(child) {
            child_data.parent = None;
        }
        self.mark_dirty(parent)?;
        Ok(child)
    }

    pub fn remove_all_children(&mut self, parent: NodeId) -> LayoutResult<()> {
        self.ensure_owned_children(parent)?;
        let children = core::mem::take(&mut self.require_mut(parent)?.children);
        for child in &children {
            if let Ok(child_data) = self.require_mut(*child) {
                child_data.parent = None;
            }
        }
        self.mark_dirty(parent)
    }

    /// Copy-on-write trigger (§3.6): if the first child's back-pointer no longer points at
    /// `parent`, the child list is shared with another owner — clone every child and rewire
    /// before any mutation proceeds.
    fn ensure_owned_children(&mut self, parent: NodeId) -> LayoutResult<()> {
        let children = self.require(parent)?.children.clone();
        let Some(&first) = children.first() else { return Ok(()) };
        if self.require(first)?.parent == Some(parent) {
            return Ok(());
        }

        let mut new_children = Vec::with_capacity(children.len());
        for (index, old_child) in children.iter().enumerate() {
            let new_child = self.clone_node(*old_child)?;
            self.require_mut(new_child)?.parent = Some(parent);
            if let Some(cloned_cb) = self.require(parent)?.config.cloned.clone() {
                cloned_cb(*old_child, new_child, parent, index);
            }
            new_children.push(new_child);
        }
        self.require_mut(parent)?.children = new_children;
        Ok(())
    }

    pub fn children(&self, node: NodeId) -> LayoutResult<&[NodeId]> {
        Ok(&self.require(node)?.children)
    }

    pub fn child_at_index(&self, node: NodeId, index: usize) -> LayoutResult<NodeId> {
        let data = self.require(node)?;
        data.children.get(index).copied().ok_or(LayoutError::ChildIndexOutOfBounds {
            parent: node,
            index,
            child_count: data.children.len(),
        })
    }

    pub fn child_count(&self, node: NodeId) -> LayoutResult<usize> {
        Ok(self.require(node)?.children.len())
    }

    pub fn parent(&self, node: NodeId) -> LayoutResult<Option<NodeId>> {
        Ok(self.require(node)?.parent)
    }

    /// `CopyStyle` (§6): copies and dirties only if the style actually changed.
    pub fn copy_style(&mut self, dst: NodeId, src: NodeId) -> LayoutResult<()> {
        let style = self.require(src)?.style.clone();
        self.set_style(dst, style)
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) -> LayoutResult<()> {
        let changed = self.require(node)?.style != style;
        self.require_mut(node)?.style = style;
        if changed {
            self.mark_dirty(node)?;
        }
        Ok(())
    }

    pub fn style(&self, node: NodeId) -> LayoutResult<&Style> {
        Ok(&self.require(node)?.style)
    }

    pub fn layout(&self, node: NodeId) -> LayoutResult<&Layout> {
        Ok(&self.require(node)?.layout)
    }

    pub fn get_node_context_mut(&mut self, node: NodeId) -> Option<&mut Context> {
        self.node_context_data.get_mut(node)
    }

    /// Internal dirtying: marks `node` and propagates up to the root, invoking `dirtied` at
    /// each newly-dirtied node (§4.2).
    pub(crate) fn mark_dirty(&mut self, node: NodeId) -> LayoutResult<()> {
        let mut current = Some(node);
        while let Some(id) = current {
            let data = self.require_mut(id)?;
            if data.is_dirty {
                break;
            }
            data.is_dirty = true;
            data.layout.cache.clear();
            if let Some(cb) = data.dirtied.clone() {
                cb(id);
            }
            current = data.parent;
        }
        Ok(())
    }

    /// Public `MarkDirty` (§4.2, §6): legal only on nodes with a measure function.
    pub fn mark_node_dirty(&mut self, node: NodeId) -> LayoutResult<()> {
        if !self.require(node)?.needs_measure {
            return Err(LayoutError::MarkDirtyRequiresMeasureFunction(node));
        }
        self.mark_dirty(node)
    }

    /// `MarkDirtyAndPropagateToDescendants` (§6): a debugging/benchmark helper, not gated on
    /// having a measure function.
    pub fn mark_dirty_and_propagate_to_descendants(&mut self, node: NodeId) -> LayoutResult<()> {
        let children = self.children(node)?.to_vec();
        self.require_mut(node)?.is_dirty = true;
        self.require_mut(node)?.layout.cache.clear();
        for child in children {
            self.mark_dirty_and_propagate_to_descendants(child)?;
        }
        Ok(())
    }

    pub fn is_dirty(&self, node: NodeId) -> LayoutResult<bool> {
        Ok(self.require(node)?.is_dirty)
    }

    /// `Reset` (§4.2): requires the node to be detached (no children, no parent).
    pub fn reset(&mut self, node: NodeId) -> LayoutResult<()> {
        let data = self.require(node)?;
        if !data.children.is_empty() || data.parent.is_some() {
            return Err(LayoutError::ResetRequiresDetachedNode(node));
        }
        let config = data.config.clone();
        let data = self.require_mut(node)?;
        *data = NodeData::new(Style::default(), config);
        self.node_context_data.remove(node);
        Ok(())
    }

    pub fn free(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get(node) {
            if let Some(parent) = data.parent {
                let _ = self.remove_child(parent, node);
            }
        }
        self.nodes.remove(node);
        self.node_context_data.remove(node);
    }

    pub fn free_recursive(&mut self, node: NodeId) {
        let children = self.children(node).map(|c| c.to_vec()).unwrap_or_default();
        for child in children {
            self.free_recursive(child);
        }
        self.nodes.remove(node);
        self.node_context_data.remove(node);
    }

    pub fn total_node_count(&self) -> usize {
        self.nodes.len()
    }
}
