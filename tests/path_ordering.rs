//! §8 item 6: applying the orderer twice, feeding its own output back in as
//! the next input, is a fixed point.

use beadline::ordering::path_order::{order_paths, OrderedPath, PathToOrder, SeamConfig};
use beadline::IntPoint;

fn square(offset_x: i64, offset_y: i64) -> PathToOrder {
    PathToOrder::new(
        vec![
            IntPoint::new(offset_x, offset_y),
            IntPoint::new(offset_x + 1000, offset_y),
            IntPoint::new(offset_x + 1000, offset_y + 1000),
            IntPoint::new(offset_x, offset_y + 1000),
        ],
        true,
    )
}

fn line(ax: i64, ay: i64, bx: i64, by: i64) -> PathToOrder {
    PathToOrder::new(vec![IntPoint::new(ax, ay), IntPoint::new(bx, by)], false)
}

/// Rebuilds a path as it would be printed given an ordering decision:
/// rotated to its chosen start vertex (closed) or reversed (open), in the
/// order the pass placed it.
fn materialize(paths: &[PathToOrder], order: &[OrderedPath]) -> Vec<PathToOrder> {
    order
        .iter()
        .map(|o| {
            let original = &paths[o.index];
            let mut points = original.points.clone();
            if original.is_closed {
                points.rotate_left(o.start_index);
            } else if o.reversed {
                points.reverse();
            }
            PathToOrder::new(points, original.is_closed)
        })
        .collect()
}

#[test]
fn reordering_an_already_ordered_set_is_a_fixed_point() {
    let paths = vec![
        square(10_000, 0),
        square(0, 0),
        line(100, 0, 100, 10_000),
        line(100, 10_050, 100, 10_100),
    ];
    let config = SeamConfig::default();
    let start = IntPoint::ZERO;

    let first_pass = order_paths(&paths, start, &config);
    let reprinted = materialize(&paths, &first_pass);

    let second_pass = order_paths(&reprinted, start, &config);

    for (i, ordered) in second_pass.iter().enumerate() {
        assert_eq!(ordered.index, i, "path {i} was reordered on the second pass");
        assert_eq!(ordered.start_index, 0, "path {i} didn't start where it was rotated to");
        assert!(!ordered.reversed, "path {i} was reversed again on the second pass");
    }
}
