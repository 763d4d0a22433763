use approx::assert_relative_eq;
use lampshade_core::{Point2, ProfileKind, ShapeParameters, TwistKind};
use lampshade_geometry::build_layers;
use lampshade_toolpath::build_spiral;
use lampshade_toolpath::spiral::has_no_repeated_xy;
use proptest::prelude::*;

const CENTER: Point2 = Point2::new(105.0, 105.0);

#[test]
fn test_all_profiles_share_point_count_and_span() {
    let base = ShapeParameters::new(30.0, 25.0, 50.0, ProfileKind::Linear).unwrap();
    let mut counts = Vec::new();

    for profile in ProfileKind::ALL {
        let shape = base.clone().with_profile(profile);
        let layers = build_layers(&shape, CENTER, 64, 0.2).unwrap();
        let spiral = build_spiral(&layers, 0.2).unwrap();

        let (low, high) = spiral.z_range();
        assert_relative_eq!(low, 0.2, epsilon = 1e-12);
        // The last lap ends one point short of a full layer above the top
        assert!(high < 50.0 + 0.2 && high > 50.0, "top z = {}", high);
        assert!((high - low - 50.0).abs() < 0.2);
        assert!(spiral
            .points()
            .windows(2)
            .all(|w| w[1].z > w[0].z));

        counts.push(spiral.len());
    }

    assert!(counts.iter().all(|&c| c == 250 * 64));
}

proptest! {
    #[test]
    fn spiral_is_monotonic_without_seam_duplicates(
        num_points in 12usize..96,
        layer_height in 0.1f64..0.3,
        twist in -180.0f64..180.0,
        amplitude in 0.0f64..3.0,
    ) {
        let shape = ShapeParameters::new(25.0, 20.0, 5.0, ProfileKind::Sinusoidal)
            .unwrap()
            .with_twist(TwistKind::Decelerating, twist)
            .with_wave(amplitude, 5, 2.0);
        let layers = build_layers(&shape, CENTER, num_points, layer_height).unwrap();
        let spiral = build_spiral(&layers, layer_height).unwrap();

        prop_assert_eq!(spiral.len(), layers.len() * num_points);
        prop_assert!(spiral.points().windows(2).all(|w| w[1].z >= w[0].z));
        prop_assert!(has_no_repeated_xy(spiral.points()));
    }
}
