use lampshade_core::{GeometryDefect, Point2, ShapeParameters};
use lampshade_geometry::{
    build_layer, contains, even_odd_segments, x_intersections, ScanlineFill,
};
use proptest::prelude::*;

fn rectangle(cx: f64, cy: f64, w: f64, h: f64) -> Vec<Point2> {
    vec![
        Point2::new(cx - w / 2.0, cy - h / 2.0),
        Point2::new(cx + w / 2.0, cy - h / 2.0),
        Point2::new(cx + w / 2.0, cy + h / 2.0),
        Point2::new(cx - w / 2.0, cy + h / 2.0),
    ]
}

/// Chevron with a notch on the left
fn concave(cx: f64, cy: f64, s: f64) -> Vec<Point2> {
    vec![
        Point2::new(cx - 2.0 * s, cy - 2.0 * s),
        Point2::new(cx, cy - 2.0 * s),
        Point2::new(cx, cy - s),
        Point2::new(cx + 2.0 * s, cy),
        Point2::new(cx, cy + s),
        Point2::new(cx, cy + 2.0 * s),
        Point2::new(cx - 2.0 * s, cy + 2.0 * s),
        Point2::new(cx - s, cy),
    ]
}

#[test]
fn test_rectangle_scanline() {
    let rect = rectangle(105.0, 105.0, 70.0, 50.0);
    let xs = x_intersections(&rect, 105.0);
    assert_eq!(xs, vec![70.0, 140.0]);

    let segs = even_odd_segments(&xs, 105.0).unwrap();
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].start, Point2::new(70.0, 105.0));
    assert_eq!(segs[0].end, Point2::new(140.0, 105.0));
}

/// U-shaped polygon open at the top between x = 10 and x = 20
fn u_shape() -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(30.0, 0.0),
        Point2::new(30.0, 30.0),
        Point2::new(20.0, 30.0),
        Point2::new(20.0, 10.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 30.0),
        Point2::new(0.0, 30.0),
    ]
}

#[test]
fn test_concave_polygon_splits_into_two_spans() {
    let poly = u_shape();
    let xs = x_intersections(&poly, 20.0);
    assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0]);

    let segs = even_odd_segments(&xs, 20.0).unwrap();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].length(), 10.0);
    assert_eq!(segs[1].start.x, 20.0);

    // Below the notch the whole width is interior
    assert_eq!(x_intersections(&poly, 5.0), vec![0.0, 30.0]);

    assert!(!contains(&poly, Point2::new(15.0, 20.0)));
    assert!(contains(&poly, Point2::new(5.0, 20.0)));
    assert!(contains(&poly, Point2::new(15.0, 5.0)));
}

#[test]
fn test_odd_intersections_rejected() {
    assert!(matches!(
        even_odd_segments(&[0.0], 1.0),
        Err(GeometryDefect::OddIntersectionCount { count: 1, .. })
    ));
}

#[test]
fn test_fill_concave_has_no_odd_rows() {
    let fill = ScanlineFill::new(0.5, 0.9, 1e-3);
    let sweep = fill.sweep(&concave(50.0, 50.0, 10.0)).unwrap();
    assert!(!sweep.scan_ys.is_empty());
    assert!(sweep.segment_count() >= sweep.scan_ys.len());

    let path = sweep.serpentine();
    assert!(path.windows(2).all(|w| w[0] != w[1]));
}

proptest! {
    #[test]
    fn convex_layer_has_even_crossings(y_frac in 0.0f64..1.0, n in 12usize..128) {
        let shape = ShapeParameters::default();
        let layer = build_layer(10.0, &shape, Point2::new(105.0, 105.0), n).unwrap();
        let r = layer.radius();
        let y = 105.0 - r + 2.0 * r * y_frac;

        let xs = x_intersections(layer.points(), y);
        prop_assert_eq!(xs.len() % 2, 0);
        prop_assert!(even_odd_segments(&xs, y).is_ok());
    }
}
