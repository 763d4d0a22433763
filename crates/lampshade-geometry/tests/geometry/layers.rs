use approx::assert_relative_eq;
use lampshade_core::{Point2, ProfileKind, ShapeParameters, TwistKind};
use lampshade_geometry::{build_layer, build_layers};
use proptest::prelude::*;

const CENTER: Point2 = Point2::new(105.0, 105.0);

proptest! {
    #[test]
    fn layers_are_closed_with_expected_count(
        num_points in 3usize..256,
        frac in 0.0f64..=1.0,
        twist in -360.0f64..360.0,
        amplitude in 0.0f64..5.0,
    ) {
        let shape = ShapeParameters::default()
            .with_profile(ProfileKind::Convex)
            .with_twist(TwistKind::Accelerating, twist)
            .with_wave(amplitude, 6, 3.0);
        let z = frac * shape.total_height;

        let layer = build_layer(z, &shape, CENTER, num_points).unwrap();
        prop_assert_eq!(layer.len(), num_points + 1);
        prop_assert_eq!(layer.points().first(), layer.points().last());

        let again = build_layer(z, &shape, CENTER, num_points).unwrap();
        prop_assert_eq!(layer, again);
    }
}

#[test]
fn test_plain_layer_approximates_circle() {
    let shape = ShapeParameters::new(30.0, 25.0, 50.0, ProfileKind::Linear).unwrap();
    let layer = build_layer(10.0, &shape, CENTER, 64).unwrap();
    assert_relative_eq!(layer.radius(), 29.0, epsilon = 1e-12);
    for p in layer.points() {
        assert_relative_eq!(p.distance_to(&CENTER), 29.0, epsilon = 1e-9);
    }
    // Chord perimeter of a 64-gon is just under the circumference
    let circumference = 2.0 * std::f64::consts::PI * 29.0;
    assert!(layer.perimeter() < circumference);
    assert!(layer.perimeter() > circumference * 0.998);
}

#[test]
fn test_build_layers_matches_schedule() {
    let shape = ShapeParameters::default();
    let layers = build_layers(&shape, CENTER, 32, 0.2).unwrap();
    assert_eq!(layers.len(), 250);
    assert_relative_eq!(layers[0].z(), 0.2);
    assert_relative_eq!(layers[249].z(), 50.0, epsilon = 1e-9);
    assert!(layers.windows(2).all(|w| w[0].z() < w[1].z()));
}
