//! Optional HTML-like serialization of a tree for diagnostics (§6 `PrintFunc`). Never consulted
//! by the solver; purely a debugging aid.

use alloc::string::String;
use core::fmt::Write;

use crate::error::LayoutResult;
use crate::tree::{FlexTree, NodeId};

/// Which sections of each node to include, mirroring the source's `Layout | Style | Children`
/// option bitmask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintOptions {
    pub layout: bool,
    pub style: bool,
    pub children: bool,
}

impl PrintOptions {
    pub const ALL: PrintOptions = PrintOptions { layout: true, style: true, children: true };
}

/// Renders `node` (and, if [`PrintOptions::children`] is set, its whole subtree) as indented
/// HTML-like tags.
pub fn print_tree<Context>(tree: &FlexTree<Context>, node: NodeId, options: PrintOptions) -> LayoutResult<String> {
    let mut out = String::new();
    print_node(tree, node, options, 0, &mut out)?;
    Ok(out)
}

fn print_node<Context>(tree: &FlexTree<Context>, node: NodeId, options: PrintOptions, depth: usize, out: &mut String) -> LayoutResult<()> {
    let data = tree.node_data(node)?;
    let indent = "  ".repeat(depth);

    let _ = write!(out, "{indent}<node");
    if options.layout {
        let l = &data.layout;
        let _ = write!(
            out,
            " layout=\"width: {:.2}; height: {:.2}; left: {:.2}; top: {:.2};\"",
            l.dimensions.width, l.dimensions.height, l.position.left, l.position.top
        );
    }
    if options.style {
        let _ = write!(
            out,
            " style=\"flex-direction: {:?}; justify-content: {:?}; align-items: {:?};\"",
            data.style.flex_direction, data.style.justify_content, data.style.align_items
        );
    }

    let children = if options.children { tree.children(node)?.to_vec() } else { alloc::vec::Vec::new() };
    if children.is_empty() {
        let _ = write!(out, "></node>\n");
    } else {
        let _ = write!(out, ">\n");
        for child in children {
            print_node(tree, child, options, depth + 1, out)?;
        }
        let _ = write!(out, "{indent}</node>\n");
    }

    Ok(())
}
