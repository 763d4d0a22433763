//! Profile engine
//!
//! Maps normalized height `t ∈ [0, 1]` to the shade radius for each profile
//! family. All functions here are pure and continuous in `t`.

use lampshade_core::error::ensure_positive;
use lampshade_core::{ConfigurationError, ProfileKind, ShapeParameters};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Slack allowed when normalizing accumulated layer heights.
const HEIGHT_TOLERANCE: f64 = 1e-9;

/// Amplitude of the sinusoidal ripple as a fraction of the mean radius.
const SINUSOIDAL_AMPLITUDE_FRACTION: f64 = 0.05;

/// One `(z, radius)` pair of a realized profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub z: f64,
    pub radius: f64,
}

impl ProfileSample {
    pub fn new(z: f64, radius: f64) -> Self {
        Self { z, radius }
    }
}

/// Radius at normalized height `t`. Fails outside `[0, 1]`.
pub fn radius_at(t: f64, shape: &ShapeParameters) -> Result<f64, ConfigurationError> {
    if !(0.0..=1.0).contains(&t) {
        return Err(ConfigurationError::NormalizedHeightOutOfRange { t });
    }

    let base = shape.base_radius;
    let delta = shape.radius_delta();

    let radius = match shape.profile {
        ProfileKind::Linear => base + t * delta,
        ProfileKind::Concave => base + t * t * delta,
        ProfileKind::Convex => base + t.sqrt() * delta,
        ProfileKind::Sinusoidal => {
            let mean_radius = (shape.base_radius + shape.top_radius) / 2.0;
            let amplitude = SINUSOIDAL_AMPLITUDE_FRACTION * mean_radius;
            base + t * delta + amplitude * (4.0 * PI * t).sin()
        }
    };

    Ok(radius)
}

/// Convert an absolute height to `t`, absorbing floating-point overshoot at
/// either end of the object.
pub fn normalized_height(z: f64, total_height: f64) -> Result<f64, ConfigurationError> {
    let t = z / total_height;
    if t < -HEIGHT_TOLERANCE || t > 1.0 + HEIGHT_TOLERANCE || !t.is_finite() {
        return Err(ConfigurationError::NormalizedHeightOutOfRange { t });
    }
    Ok(t.clamp(0.0, 1.0))
}

/// Radius at absolute height `z` (mm).
pub fn radius_at_height(z: f64, shape: &ShapeParameters) -> Result<f64, ConfigurationError> {
    radius_at(normalized_height(z, shape.total_height)?, shape)
}

/// Layer heights `layer_height, 2·layer_height, …` up to the total height.
///
/// Fails when not even one layer fits.
pub fn layer_heights(
    total_height: f64,
    layer_height: f64,
) -> Result<Vec<f64>, ConfigurationError> {
    ensure_positive("total_height", total_height)?;
    ensure_positive("layer_height", layer_height)?;

    let count = (total_height / layer_height + HEIGHT_TOLERANCE).floor() as usize;
    if count == 0 {
        return Err(ConfigurationError::out_of_range(
            "layer_height",
            layer_height,
            0.0,
            total_height,
        ));
    }
    Ok((1..=count).map(|i| i as f64 * layer_height).collect())
}

/// Sample the realized profile at the base and at every layer height.
pub fn sample_profile(
    shape: &ShapeParameters,
    layer_height: f64,
) -> Result<Vec<ProfileSample>, ConfigurationError> {
    let heights = layer_heights(shape.total_height, layer_height)?;

    std::iter::once(0.0)
        .chain(heights)
        .map(|z| radius_at_height(z, shape).map(|radius| ProfileSample::new(z, radius)))
        .collect()
}
