use flexly::prelude::*;

fn edges(edge: Edge, value: f32) -> EdgeValues {
    let mut e = EdgeValues::default();
    e.set(edge, StyleLength::Point(value));
    e
}

#[test]
fn border_on_a_single_axis_doesnt_increase_the_other_axis() {
    for edge in [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom] {
        let mut tree: FlexTree = FlexTree::new();
        let node = tree.new_leaf(Style { border: edges(edge, 10.0), ..Default::default() });

        tree.compute_layout(node, Size { width: Number::UNDEFINED, height: Number::UNDEFINED }).unwrap();

        let layout = tree.layout(node).unwrap();
        assert_eq!(layout.dimensions.width * layout.dimensions.height, 0.0);
    }
}

#[test]
fn padding_on_a_single_axis_doesnt_increase_the_other_axis() {
    for edge in [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom] {
        let mut tree: FlexTree = FlexTree::new();
        let node = tree.new_leaf(Style { padding: edges(edge, 10.0), ..Default::default() });

        tree.compute_layout(node, Size { width: Number::UNDEFINED, height: Number::UNDEFINED }).unwrap();

        let layout = tree.layout(node).unwrap();
        assert_eq!(layout.dimensions.width * layout.dimensions.height, 0.0);
    }
}

#[test]
fn border_and_padding_on_the_same_edge_stack() {
    let mut tree: FlexTree = FlexTree::new();
    let node = tree.new_leaf(Style { border: edges(Edge::Left, 10.0), padding: edges(Edge::Left, 5.0), ..Default::default() });

    tree.compute_layout(node, Size { width: Number::UNDEFINED, height: Number::UNDEFINED }).unwrap();

    let layout = tree.layout(node).unwrap();
    assert_eq!(layout.dimensions.width, 15.0);
    assert_eq!(layout.dimensions.height, 0.0);
}

#[test]
fn percent_padding_always_resolves_against_the_containing_block_width() {
    // §3.3: unlike border/margin, padding percentages resolve against the parent's width on
    // every edge, including `top`/`bottom` — never the parent's height.
    let mut tree: FlexTree = FlexTree::new();

    let mut padding = EdgeValues::default();
    padding.set(Edge::Left, StyleLength::Percent(10.0));
    padding.set(Edge::Top, StyleLength::Percent(10.0));

    let node = tree.new_leaf(Style {
        padding,
        size: Size { width: StyleLength::Point(200.0), height: StyleLength::Point(50.0) },
        ..Default::default()
    });

    tree.compute_layout(node, Size { width: Number::defined(200.0), height: Number::defined(100.0) }).unwrap();

    let layout = tree.layout(node).unwrap();
    assert_eq!(layout.padding.get(Edge::Left), 20.0);
    assert_eq!(layout.padding.get(Edge::Top), 20.0);
}
