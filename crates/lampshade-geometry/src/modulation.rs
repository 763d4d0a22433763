//! Twist and wave surface modulation
//!
//! Both functions are stateless and safe to evaluate per point in any order.

use lampshade_core::{ShapeParameters, TwistKind};

/// Rotation of the cross-section at height `z` (radians).
pub fn twist_angle(z: f64, shape: &ShapeParameters) -> f64 {
    if !shape.twist_enabled {
        return 0.0;
    }

    let t = z / shape.total_height;
    let total = shape.twist_degrees.to_radians();

    match shape.twist_kind {
        TwistKind::Linear => t * total,
        TwistKind::Accelerating => t * t * total,
        TwistKind::Decelerating => (1.0 - (1.0 - t) * (1.0 - t)) * total,
    }
}

/// Radial texture offset (mm) at angular position `angle` and height `z`.
///
/// Horizontal waves around the perimeter are multiplied by vertical waves
/// along the height, giving a helical interference pattern.
pub fn radial_wave(angle: f64, z: f64, shape: &ShapeParameters) -> f64 {
    if !shape.wave_enabled {
        return 0.0;
    }

    let horizontal = (shape.wave_frequency as f64 * angle).sin();
    let vertical = (shape.wave_vertical_frequency * z).cos();
    shape.wave_amplitude * horizontal * vertical
}
