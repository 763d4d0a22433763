//! Shape parameters for a single-wall rotational object
//!
//! A lamp shade is described by its base and top radius, its height, the
//! profile curve joining them, and two optional surface modulations: a twist
//! that rotates each cross-section around the axis, and a radial wave texture.

use crate::error::{ensure_positive, ConfigurationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Profile curve family mapping normalized height to radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Straight taper
    Linear,
    /// Curves inward (quadratic in height)
    Concave,
    /// Curves outward (square root of height)
    Convex,
    /// Linear taper with two gentle ripples
    Sinusoidal,
}

impl ProfileKind {
    /// All profile kinds, in comparison-table order.
    pub const ALL: [ProfileKind; 4] = [
        ProfileKind::Linear,
        ProfileKind::Concave,
        ProfileKind::Convex,
        ProfileKind::Sinusoidal,
    ];
}

impl Default for ProfileKind {
    fn default() -> Self {
        Self::Linear
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Concave => write!(f, "concave"),
            Self::Convex => write!(f, "convex"),
            Self::Sinusoidal => write!(f, "sinusoidal"),
        }
    }
}

impl FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "concave" => Ok(Self::Concave),
            "convex" => Ok(Self::Convex),
            "sinusoidal" | "sine" => Ok(Self::Sinusoidal),
            _ => Err(format!("Unknown profile type: {}", s)),
        }
    }
}

/// How twist accumulates with height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwistKind {
    /// Constant twist rate
    Linear,
    /// More twist toward the top
    Accelerating,
    /// More twist toward the bottom
    Decelerating,
}

impl Default for TwistKind {
    fn default() -> Self {
        Self::Linear
    }
}

impl fmt::Display for TwistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Accelerating => write!(f, "accelerating"),
            Self::Decelerating => write!(f, "decelerating"),
        }
    }
}

impl FromStr for TwistKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "accelerating" => Ok(Self::Accelerating),
            "decelerating" => Ok(Self::Decelerating),
            _ => Err(format!("Unknown twist type: {}", s)),
        }
    }
}

/// Geometry of the lamp shade
///
/// Stages borrow this immutably; nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeParameters {
    /// Radius at z=0 (mm)
    pub base_radius: f64,
    /// Radius at the top (mm)
    pub top_radius: f64,
    /// Total height (mm)
    pub total_height: f64,
    /// Profile curve
    #[serde(default)]
    pub profile: ProfileKind,

    /// Rotate cross-sections with height
    #[serde(default)]
    pub twist_enabled: bool,
    /// Twist accumulation curve
    #[serde(default)]
    pub twist_kind: TwistKind,
    /// Total twist over the full height (degrees)
    #[serde(default)]
    pub twist_degrees: f64,

    /// Add radial wave texture
    #[serde(default)]
    pub wave_enabled: bool,
    /// Radial displacement amplitude (mm)
    #[serde(default)]
    pub wave_amplitude: f64,
    /// Number of waves around the perimeter
    #[serde(default = "default_wave_frequency")]
    pub wave_frequency: u32,
    /// Vertical wave frequency (radians per mm of height)
    #[serde(default = "default_wave_vertical_frequency")]
    pub wave_vertical_frequency: f64,
}

fn default_wave_frequency() -> u32 {
    6
}

fn default_wave_vertical_frequency() -> f64 {
    3.0
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            base_radius: 30.0,
            top_radius: 25.0,
            total_height: 50.0,
            profile: ProfileKind::Linear,
            twist_enabled: false,
            twist_kind: TwistKind::Linear,
            twist_degrees: 0.0,
            wave_enabled: false,
            wave_amplitude: 0.0,
            wave_frequency: default_wave_frequency(),
            wave_vertical_frequency: default_wave_vertical_frequency(),
        }
    }
}

impl ShapeParameters {
    /// Create validated shape parameters with twist and wave disabled.
    pub fn new(
        base_radius: f64,
        top_radius: f64,
        total_height: f64,
        profile: ProfileKind,
    ) -> Result<Self, ConfigurationError> {
        let shape = Self {
            base_radius,
            top_radius,
            total_height,
            profile,
            ..Self::default()
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Enable twist.
    pub fn with_twist(mut self, kind: TwistKind, degrees: f64) -> Self {
        self.twist_enabled = true;
        self.twist_kind = kind;
        self.twist_degrees = degrees;
        self
    }

    /// Enable radial wave texture.
    pub fn with_wave(mut self, amplitude: f64, frequency: u32, vertical_frequency: f64) -> Self {
        self.wave_enabled = true;
        self.wave_amplitude = amplitude;
        self.wave_frequency = frequency;
        self.wave_vertical_frequency = vertical_frequency;
        self
    }

    /// Same shape with a different profile.
    pub fn with_profile(mut self, profile: ProfileKind) -> Self {
        self.profile = profile;
        self
    }

    /// Check the shape invariants: positive radii and height, finite modulation.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive("base_radius", self.base_radius)?;
        ensure_positive("top_radius", self.top_radius)?;
        ensure_positive("total_height", self.total_height)?;

        if !self.twist_degrees.is_finite() {
            return Err(ConfigurationError::InvalidValue {
                name: "twist_degrees".to_string(),
                reason: "must be finite".to_string(),
            });
        }

        if !self.wave_amplitude.is_finite() || self.wave_amplitude < 0.0 {
            return Err(ConfigurationError::InvalidValue {
                name: "wave_amplitude".to_string(),
                reason: "must be a non-negative finite value".to_string(),
            });
        }

        if !self.wave_vertical_frequency.is_finite() {
            return Err(ConfigurationError::InvalidValue {
                name: "wave_vertical_frequency".to_string(),
                reason: "must be finite".to_string(),
            });
        }

        // A wave deeper than the narrowest radius would fold the wall through the axis
        if self.wave_enabled && self.wave_amplitude >= self.base_radius.min(self.top_radius) {
            return Err(ConfigurationError::InvalidValue {
                name: "wave_amplitude".to_string(),
                reason: format!(
                    "{} mm is not smaller than the narrowest radius",
                    self.wave_amplitude
                ),
            });
        }

        Ok(())
    }

    /// Largest radial extent including wave texture.
    pub fn max_extent(&self) -> f64 {
        let wave = if self.wave_enabled {
            self.wave_amplitude
        } else {
            0.0
        };
        self.base_radius.max(self.top_radius) + wave
    }

    /// Radius change from base to top (negative for a taper).
    pub fn radius_delta(&self) -> f64 {
        self.top_radius - self.base_radius
    }
}
