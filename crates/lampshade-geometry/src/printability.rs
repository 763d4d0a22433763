//! Printability validation
//!
//! FDM printers can bridge outward (or inward) wall steps only up to a limited
//! angle from vertical before unsupported plastic droops. The overhang angle
//! between two consecutive profile samples is `atan(|Δr| / Δz)`.
//!
//! Two distinct questions are answered here:
//! - [`validate_printability`] stops at the first sample pair steeper than the
//!   limit and reports where it happened.
//! - [`max_overhang`] scans the whole profile and reports the steepest pair.

use crate::profile::{sample_profile, ProfileSample};
use lampshade_core::{ConfigurationError, PrintabilityViolation, ShapeParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a printability check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintabilityVerdict {
    /// Every sample pair is within the limit
    Printable {
        /// Steepest angle encountered (degrees)
        max_angle: f64,
    },
    /// The first sample pair over the limit
    Violation(PrintabilityViolation),
}

impl PrintabilityVerdict {
    pub fn is_printable(&self) -> bool {
        matches!(self, Self::Printable { .. })
    }

    /// Convert into a `Result` for callers that treat a violation as an error.
    pub fn into_result(self) -> Result<(), PrintabilityViolation> {
        match self {
            Self::Printable { .. } => Ok(()),
            Self::Violation(violation) => Err(violation),
        }
    }
}

/// The steepest overhang in a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverhangExtreme {
    /// Height of the upper sample of the steepest pair (mm)
    pub z: f64,
    /// Angle from vertical (degrees)
    pub angle: f64,
}

/// Overhang angle in degrees for a radius change `dr` over height `dz`.
///
/// `dz` must be strictly positive; a zero step is a configuration error
/// rather than an infinite angle.
pub fn overhang_angle(dr: f64, dz: f64, z: f64) -> Result<f64, ConfigurationError> {
    if dz == 0.0 {
        return Err(ConfigurationError::ZeroHeightStep { z });
    }
    if dz < 0.0 {
        return Err(ConfigurationError::DescendingSamples {
            z,
            previous: z - dz,
        });
    }
    Ok((dr.abs() / dz).atan().to_degrees())
}

fn pair_angle(lower: &ProfileSample, upper: &ProfileSample) -> Result<f64, ConfigurationError> {
    overhang_angle(upper.radius - lower.radius, upper.z - lower.z, upper.z)
}

/// Report the first sample pair whose overhang exceeds `max_overhang_angle`.
pub fn validate_printability(
    samples: &[ProfileSample],
    max_overhang_angle: f64,
) -> Result<PrintabilityVerdict, ConfigurationError> {
    let mut steepest = 0.0_f64;

    for pair in samples.windows(2) {
        let angle = pair_angle(&pair[0], &pair[1])?;
        if angle > max_overhang_angle {
            debug!(
                "Overhang {:.2} deg at z={:.3}mm exceeds {:.1} deg",
                angle, pair[1].z, max_overhang_angle
            );
            return Ok(PrintabilityVerdict::Violation(PrintabilityViolation {
                z: pair[1].z,
                angle,
                max_angle: max_overhang_angle,
            }));
        }
        steepest = steepest.max(angle);
    }

    Ok(PrintabilityVerdict::Printable {
        max_angle: steepest,
    })
}

/// Steepest overhang over the whole profile, or `None` with fewer than two samples.
pub fn max_overhang(
    samples: &[ProfileSample],
) -> Result<Option<OverhangExtreme>, ConfigurationError> {
    let mut extreme: Option<OverhangExtreme> = None;

    for pair in samples.windows(2) {
        let angle = pair_angle(&pair[0], &pair[1])?;
        if extreme.map_or(true, |e| angle > e.angle) {
            extreme = Some(OverhangExtreme {
                z: pair[1].z,
                angle,
            });
        }
    }

    Ok(extreme)
}

/// Sample a shape at `layer_height` and validate it.
pub fn check_shape(
    shape: &ShapeParameters,
    layer_height: f64,
    max_overhang_angle: f64,
) -> Result<PrintabilityVerdict, ConfigurationError> {
    let samples = sample_profile(shape, layer_height)?;
    validate_printability(&samples, max_overhang_angle)
}
