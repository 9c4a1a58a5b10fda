use flexly::prelude::*;

#[test]
fn min_overrides_max() {
    let mut tree: FlexTree = FlexTree::new();

    let child = tree.new_leaf(Style {
        size: Size { width: StyleLength::Point(50.0), height: StyleLength::Point(50.0) },
        min_size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) },
        max_size: Size { width: StyleLength::Point(10.0), height: StyleLength::Point(10.0) },
        ..Default::default()
    });

    tree.compute_layout(child, Size { width: Number::defined(100.0), height: Number::defined(100.0) }).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.dimensions.width, 100.0);
    assert_eq!(layout.dimensions.height, 100.0);
}

#[test]
fn max_overrides_size() {
    let mut tree: FlexTree = FlexTree::new();

    let child = tree.new_leaf(Style {
        size: Size { width: StyleLength::Point(50.0), height: StyleLength::Point(50.0) },
        max_size: Size { width: StyleLength::Point(10.0), height: StyleLength::Point(10.0) },
        ..Default::default()
    });

    tree.compute_layout(child, Size { width: Number::defined(100.0), height: Number::defined(100.0) }).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.dimensions.width, 10.0);
    assert_eq!(layout.dimensions.height, 10.0);
}

#[test]
fn min_overrides_size() {
    let mut tree: FlexTree = FlexTree::new();

    let child = tree.new_leaf(Style {
        size: Size { width: StyleLength::Point(50.0), height: StyleLength::Point(50.0) },
        min_size: Size { width: StyleLength::Point(100.0), height: StyleLength::Point(100.0) },
        ..Default::default()
    });

    tree.compute_layout(child, Size { width: Number::defined(100.0), height: Number::defined(100.0) }).unwrap();

    let layout = tree.layout(child).unwrap();
    assert_eq!(layout.dimensions.width, 100.0);
    assert_eq!(layout.dimensions.height, 100.0);
}
