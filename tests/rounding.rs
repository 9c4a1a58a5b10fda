use std::rc::Rc;

use flexly::config::Config;
use flexly::prelude::*;
use flexly::util::{print_tree, PrintOptions};

#[test]
fn rounding_doesnt_leave_gaps_between_fractional_siblings() {
    let mut tree: FlexTree = FlexTree::new();

    let square = Size { width: StyleLength::Point(100.3), height: StyleLength::Point(100.3) };
    let child_a = tree.new_leaf(Style { size: square, ..Default::default() });
    let child_b = tree.new_leaf(Style { size: square, ..Default::default() });

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                size: Size { width: StyleLength::Point(963.3333), height: StyleLength::Point(1000.0) },
                justify_content: JustifyContent::Center,
                ..Default::default()
            },
            &[child_a, child_b],
        )
        .unwrap();

    tree.compute_layout(root, Size { width: Number::UNDEFINED, height: Number::UNDEFINED }).unwrap();

    let layout_a = tree.layout(child_a).unwrap();
    let layout_b = tree.layout(child_b).unwrap();
    print_tree(&tree, root, PrintOptions::ALL).unwrap();

    assert_eq!(layout_a.position.left + layout_a.dimensions.width, layout_b.position.left);
}

#[test]
fn rounding_snaps_to_the_configured_pixel_grid() {
    let config = Rc::new(Config { point_scale_factor: 2.0, ..Default::default() });
    let mut tree: FlexTree = FlexTree::with_config(config);

    let node = tree.new_leaf(Style { size: Size { width: StyleLength::Point(10.3), height: StyleLength::Point(10.3) }, ..Default::default() });

    tree.compute_layout(node, Size { width: Number::UNDEFINED, height: Number::UNDEFINED }).unwrap();

    let layout = tree.layout(node).unwrap();
    // At a 2x grid only half-pixel boundaries are representable.
    assert_eq!((layout.dimensions.width * 2.0).round(), layout.dimensions.width * 2.0);
    assert_eq!((layout.dimensions.height * 2.0).round(), layout.dimensions.height * 2.0);
}

#[test]
fn rounding_disabled_when_scale_factor_is_zero() {
    let config = Rc::new(Config { point_scale_factor: 0.0, ..Default::default() });
    let mut tree: FlexTree = FlexTree::with_config(config);

    let node = tree.new_leaf(Style { size: Size { width: StyleLength::Point(10.3), height: StyleLength::Point(10.3) }, ..Default::default() });

    tree.compute_layout(node, Size { width: Number::UNDEFINED, height: Number::UNDEFINED }).unwrap();

    let layout = tree.layout(node).unwrap();
    assert_eq!(layout.dimensions.width, 10.3);
    assert_eq!(layout.dimensions.height, 10.3);
}
