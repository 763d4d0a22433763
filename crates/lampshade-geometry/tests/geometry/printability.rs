use approx::assert_relative_eq;
use lampshade_core::{ProfileKind, ShapeParameters};
use lampshade_geometry::{check_shape, max_overhang, sample_profile, PrintabilityVerdict};
use proptest::prelude::*;

#[test]
fn test_gentle_linear_taper_is_printable() {
    let shape = ShapeParameters::new(30.0, 25.0, 50.0, ProfileKind::Linear).unwrap();

    let verdict = check_shape(&shape, 0.2, 45.0).unwrap();
    assert!(verdict.is_printable());

    let samples = sample_profile(&shape, 0.2).unwrap();
    let worst = max_overhang(&samples).unwrap().unwrap();
    assert_relative_eq!(worst.angle, 5.71, epsilon = 0.01);
    assert_relative_eq!(worst.angle, (5.0f64 / 50.0).atan().to_degrees(), epsilon = 1e-6);
}

#[test]
fn test_exaggerated_concave_fails_at_correct_height() {
    // r = 30 - 20 t^2 over 10mm: per-layer dr = 0.08 z - 0.008 passes 0.2 just after z = 2.6
    let shape = ShapeParameters::new(30.0, 10.0, 10.0, ProfileKind::Concave).unwrap();

    match check_shape(&shape, 0.2, 45.0).unwrap() {
        PrintabilityVerdict::Violation(v) => {
            assert!(v.angle > 45.0, "angle = {}", v.angle);
            assert!(v.z > 2.5 && v.z < 2.9, "z = {}", v.z);
            assert_eq!(v.max_angle, 45.0);
        }
        other => panic!("expected violation, got {:?}", other),
    }
}

#[test]
fn test_max_overhang_continues_past_first_violation() {
    let shape = ShapeParameters::new(30.0, 10.0, 10.0, ProfileKind::Concave).unwrap();
    let samples = sample_profile(&shape, 0.2).unwrap();
    let worst = max_overhang(&samples).unwrap().unwrap();
    // Concave flares hardest at the top
    assert_relative_eq!(worst.z, 10.0, epsilon = 1e-9);
    assert!(worst.angle > 75.0);
}

fn tapered(delta: f64, profile: ProfileKind) -> ShapeParameters {
    ShapeParameters::new(40.0, 40.0 - delta, 50.0, profile).unwrap()
}

fn worst_angle(shape: &ShapeParameters) -> f64 {
    let samples = sample_profile(shape, 0.5).unwrap();
    max_overhang(&samples).unwrap().map_or(0.0, |e| e.angle)
}

proptest! {
    #[test]
    fn larger_radius_change_never_reduces_overhang(
        small in 0.0f64..25.0,
        extra in 0.0f64..10.0,
        profile in prop_oneof![
            Just(ProfileKind::Linear),
            Just(ProfileKind::Concave),
            Just(ProfileKind::Convex),
        ],
    ) {
        let gentle = worst_angle(&tapered(small, profile));
        let steep = worst_angle(&tapered(small + extra, profile));
        prop_assert!(steep + 1e-9 >= gentle, "{} < {}", steep, gentle);
    }
}
