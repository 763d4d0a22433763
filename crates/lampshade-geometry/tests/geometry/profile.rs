use approx::assert_relative_eq;
use lampshade_core::{ProfileKind, ShapeParameters};
use lampshade_geometry::{radius_at, radius_at_height, sample_profile};
use proptest::prelude::*;

fn any_profile() -> impl Strategy<Value = ProfileKind> {
    prop_oneof![
        Just(ProfileKind::Linear),
        Just(ProfileKind::Concave),
        Just(ProfileKind::Convex),
        Just(ProfileKind::Sinusoidal),
    ]
}

proptest! {
    #[test]
    fn endpoints_match_base_and_top(
        base in 10.0f64..100.0,
        top in 10.0f64..100.0,
        height in 10.0f64..200.0,
        profile in any_profile(),
    ) {
        let shape = ShapeParameters::new(base, top, height, profile).unwrap();
        prop_assert!((radius_at(0.0, &shape).unwrap() - base).abs() < 1e-9);
        prop_assert!((radius_at(1.0, &shape).unwrap() - top).abs() < 1e-9);
    }

    #[test]
    fn radius_defined_over_unit_interval(t in 0.0f64..=1.0, profile in any_profile()) {
        let shape = ShapeParameters::default().with_profile(profile);
        let r = radius_at(t, &shape).unwrap();
        prop_assert!(r.is_finite() && r > 0.0);
    }
}

#[test]
fn test_sinusoidal_endpoints_follow_linear() {
    let linear = ShapeParameters::new(40.0, 20.0, 80.0, ProfileKind::Linear).unwrap();
    let sine = linear.clone().with_profile(ProfileKind::Sinusoidal);
    for t in [0.0, 1.0] {
        assert_relative_eq!(
            radius_at(t, &sine).unwrap(),
            radius_at(t, &linear).unwrap(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_sample_profile_reaches_top() {
    let shape = ShapeParameters::default();
    let samples = sample_profile(&shape, 0.2).unwrap();
    assert_eq!(samples.len(), 251);
    let last = samples.last().unwrap();
    assert_relative_eq!(last.z, 50.0, epsilon = 1e-9);
    assert_relative_eq!(last.radius, 25.0, epsilon = 1e-9);
    assert_relative_eq!(
        radius_at_height(25.0, &shape).unwrap(),
        27.5,
        epsilon = 1e-12
    );
}
