//! End-to-end scenarios, one per named case.

use flexly::prelude::*;

fn exact(w: f32, h: f32) -> Size<Number> {
    Size { width: Number::defined(w), height: Number::defined(h) }
}

#[test]
fn row_with_three_equal_flex_children() {
    let mut tree: FlexTree = FlexTree::new();
    let children: Vec<NodeId> =
        (0..3).map(|_| tree.new_leaf(Style { flex_grow: Some(1.0), ..Default::default() })).collect();

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                size: Size { width: StyleLength::Point(300.0), height: StyleLength::Point(50.0) },
                ..Default::default()
            },
            &children,
        )
        .unwrap();

    tree.compute_layout(root, exact(300.0, 50.0)).unwrap();

    for (i, &child) in children.iter().enumerate() {
        let layout = tree.layout(child).unwrap();
        assert_eq!(layout.position.left, i as f32 * 100.0);
        assert_eq!(layout.dimensions.width, 100.0);
        assert_eq!(layout.dimensions.height, 50.0);
    }
}

#[test]
fn percent_padding() {
    let mut tree: FlexTree = FlexTree::new();
    let child = tree.new_leaf(Style { flex_grow: Some(1.0), ..Default::default() });

    let mut padding = EdgeValues::default();
    padding.set(Edge::All, StyleLength::Percent(10.0));

    let root = tree
        .new_with_children(
            Style { size: Size { width: StyleLength::Point(200.0), height: StyleLength::Point(200.0) }, padding, ..Default::default() },
            &[child],
        )
        .unwrap();

    tree.compute_layout(root, exact(200.0, 200.0)).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.position.left, 20.0);
    assert_eq!(layout.position.top, 20.0);
    assert_eq!(layout.dimensions.width, 160.0);
    assert_eq!(layout.dimensions.height, 160.0);
}

#[test]
fn absolute_child_anchored_trailing_only() {
    let mut tree: FlexTree = FlexTree::new();

    let mut position = EdgeValues::default();
    position.set(Edge::Right, StyleLength::Point(10.0));
    position.set(Edge::Top, StyleLength::Point(10.0));

    let child = tree.new_leaf(Style {
        position_type: PositionType::Absolute,
        position,
        size: Size { width: StyleLength::Point(30.0), height: StyleLength::Point(30.0) },
        ..Default::default()
    });

    let root = tree
        .new_with_children(Style { size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) }, ..Default::default() }, &[child])
        .unwrap();

    tree.compute_layout(root, exact(100.0, 100.0)).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.position.left, 60.0);
    assert_eq!(layout.position.top, 10.0);
    assert_eq!(layout.dimensions.width, 30.0);
    assert_eq!(layout.dimensions.height, 30.0);
}

#[test]
fn wrap_with_wrap_reverse_reflects_the_cross_axis() {
    let mut tree: FlexTree = FlexTree::new();
    let children: Vec<NodeId> = (0..4)
        .map(|_| tree.new_leaf(Style { size: Size { width: StyleLength::Point(60.0), height: StyleLength::Point(25.0) }, ..Default::default() }))
        .collect();

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::WrapReverse,
                size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) },
                ..Default::default()
            },
            &children,
        )
        .unwrap();

    tree.compute_layout(root, exact(100.0, 100.0)).unwrap();

    // Two lines of 60px-wide items fit one-per-line in a 100px-wide container; WrapReverse flows
    // the second line above the first rather than below it.
    let line_one_top = tree.layout(children[0]).unwrap().position.top;
    let line_two_top = tree.layout(children[1]).unwrap().position.top;
    assert!(line_two_top < line_one_top);
}

#[test]
fn rtl_row_with_start_padding() {
    let mut tree: FlexTree = FlexTree::new();
    let child = tree.new_leaf(Style { size: Size { width: StyleLength::Point(50.0), height: StyleLength::Point(50.0) }, ..Default::default() });

    let mut padding = EdgeValues::default();
    padding.set(Edge::Start, StyleLength::Point(20.0));

    let root = tree
        .new_with_children(
            Style {
                direction: Direction::RTL,
                flex_direction: FlexDirection::Row,
                size: Size { width: StyleLength::Point(200.0), height: StyleLength::Point(50.0) },
                padding,
                ..Default::default()
            },
            &[child],
        )
        .unwrap();

    tree.compute_layout(root, exact(200.0, 50.0)).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.position.left, 130.0);
    assert_eq!(layout.position.left + layout.dimensions.width, 180.0);
}

#[test]
fn aspect_ratio_with_width_only() {
    let mut tree: FlexTree = FlexTree::new();
    let child = tree.new_leaf(Style { size: Size { width: StyleLength::Point(50.0), ..Default::default() }, aspect_ratio: Some(2.0), ..Default::default() });

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                size: Size { width: StyleLength::Point(200.0), height: StyleLength::Point(200.0) },
                align_items: Align::FlexStart,
                ..Default::default()
            },
            &[child],
        )
        .unwrap();

    tree.compute_layout(root, exact(200.0, 200.0)).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.dimensions.width, 50.0);
    assert_eq!(layout.dimensions.height, 25.0);
}

#[test]
fn align_items_center_is_honored_by_auto_align_self_children() {
    let mut tree: FlexTree = FlexTree::new();
    let child = tree.new_leaf(Style { size: Size { width: StyleLength::Point(20.0), height: StyleLength::Point(20.0) }, ..Default::default() });

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                align_items: Align::Center,
                size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) },
                ..Default::default()
            },
            &[child],
        )
        .unwrap();

    tree.compute_layout(root, exact(100.0, 100.0)).unwrap();

    // align_self is left at its default (Auto), so the child must inherit the parent's
    // align_items: Center instead of silently stretching to fill the cross axis.
    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.dimensions.height, 20.0);
    assert_eq!(layout.position.top, 40.0);
}

#[test]
fn wrapped_stretch_lines_do_not_overlap() {
    let mut tree: FlexTree = FlexTree::new();

    // First line: one item with an explicit height, forcing that line's cross size to 40.
    let tall = tree.new_leaf(Style { size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(40.0) }, ..Default::default() });
    // Second line: a lone Stretch item with no explicit height of its own.
    let stretchy = tree.new_leaf(Style { size: Size { width: StyleLength::Point(100.0), ..Default::default() }, ..Default::default() });

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                align_content: Align::Stretch,
                size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(200.0) },
                ..Default::default()
            },
            &[tall, stretchy],
        )
        .unwrap();

    tree.compute_layout(root, exact(100.0, 200.0)).unwrap();

    let tall_layout = tree.layout(tall).unwrap();
    let stretchy_layout = tree.layout(stretchy).unwrap();

    // Line one's natural cross size is 40 (from `tall`'s explicit height); line two's natural
    // cross size is 0 (its only item has no explicit height). `align-content: stretch` then
    // splits the remaining 160px evenly, giving each line +80: line one becomes 120, line two 80.
    assert_eq!(tall_layout.position.top, 0.0);
    assert_eq!(tall_layout.dimensions.height, 40.0);
    // The second line must start where the first one's (stretched) box ends, not overlap it, and
    // the lone Stretch item on it must fill only its own line (80px), not the whole container.
    assert_eq!(stretchy_layout.position.top, 120.0);
    assert_eq!(stretchy_layout.dimensions.height, 80.0);
}

#[test]
fn absolute_child_with_no_insets_follows_parent_justify_and_align() {
    let mut tree: FlexTree = FlexTree::new();

    let child = tree.new_leaf(Style {
        position_type: PositionType::Absolute,
        size: Size { width: StyleLength::Point(20.0), height: StyleLength::Point(20.0) },
        ..Default::default()
    });

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::FlexEnd,
                align_items: Align::Center,
                size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) },
                ..Default::default()
            },
            &[child],
        )
        .unwrap();

    tree.compute_layout(root, exact(100.0, 100.0)).unwrap();

    // Neither inset is defined, so the child falls back to justify_content on the main (row)
    // axis and align_items on the cross axis instead of defaulting to FlexStart on both.
    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.position.left, 80.0);
    assert_eq!(layout.position.top, 40.0);
}

#[test]
fn baseline_aligned_row_offsets_by_ascent() {
    let mut tree: FlexTree = FlexTree::new();

    let short = tree.new_leaf(Style { size: Size { width: StyleLength::Point(20.0), height: StyleLength::Point(20.0) }, ..Default::default() });
    let tall = tree.new_leaf(Style { size: Size { width: StyleLength::Point(20.0), height: StyleLength::Point(40.0) }, ..Default::default() });

    tree.set_needs_baseline(short, true).unwrap();
    tree.set_needs_baseline(tall, true).unwrap();
    // Ascent is half the box height for both, so the taller item's baseline sits 10px lower.
    tree.set_baseline_func(short, Some(std::rc::Rc::new(|_, _, h| h / 2.0))).unwrap();
    tree.set_baseline_func(tall, Some(std::rc::Rc::new(|_, _, h| h / 2.0))).unwrap();

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                align_items: Align::Baseline,
                size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) },
                ..Default::default()
            },
            &[short, tall],
        )
        .unwrap();

    tree.compute_layout(root, exact(100.0, 100.0)).unwrap();

    let short_layout = tree.layout(short).unwrap();
    let tall_layout = tree.layout(tall).unwrap();

    // max_ascent is 20 (tall's own ascent); short's ascent is 10, so it shifts down by 10 to
    // line its own baseline up with tall's.
    assert_eq!(tall_layout.position.top, 0.0);
    assert_eq!(short_layout.position.top, 10.0);
}
