//! Error handling for the lampshade pipeline
//!
//! Errors fall into three categories with different propagation rules:
//! - Configuration errors (invalid shape or printer parameters). Fatal, raised
//!   before any geometry is produced.
//! - Printability violations (overhang steeper than the configured limit).
//!   Recoverable; callers may log and continue.
//! - Geometry defects (malformed polygons, non-monotonic Z). Internal
//!   invariant failures that abort the run.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Invalid shape, printer or print settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A value that must be strictly positive was zero or negative
    #[error("Parameter '{name}' must be positive (got {value})")]
    NonPositive {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// A value lies outside its accepted range
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Too few points to form a polygon
    #[error("Need at least {min} points per layer (got {got})")]
    TooFewPoints {
        /// Requested point count.
        got: usize,
        /// Minimum point count.
        min: usize,
    },

    /// Normalized height outside the unit interval
    #[error("Normalized height {t} is outside [0, 1]")]
    NormalizedHeightOutOfRange {
        /// The rejected normalized height.
        t: f64,
    },

    /// Two consecutive profile samples share the same height
    #[error("Zero height step between profile samples at z={z}mm")]
    ZeroHeightStep {
        /// Height of the repeated sample.
        z: f64,
    },

    /// Profile samples are not ordered bottom to top
    #[error("Profile samples must ascend in z (z={z}mm follows z={previous}mm)")]
    DescendingSamples {
        /// Height of the sample that went down.
        z: f64,
        /// Height of the preceding sample.
        previous: f64,
    },

    /// The object does not fit on the print bed
    #[error("Lamp shade extends beyond bed boundaries (radius {radius:.1}mm around ({center_x:.1}, {center_y:.1}))")]
    ExceedsBed {
        /// Widest radius of the object.
        radius: f64,
        /// Bed center X.
        center_x: f64,
        /// Bed center Y.
        center_y: f64,
    },

    /// The object is taller than the printer can build
    #[error("Height {height:.1}mm exceeds printer maximum ({max_z:.1}mm)")]
    ExceedsMaxZ {
        /// Requested object height.
        height: f64,
        /// Printer build height.
        max_z: f64,
    },

    /// A value is invalid for some other reason
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// Parameter name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigurationError {
    /// Create a `NonPositive` error.
    pub fn non_positive(name: impl Into<String>, value: f64) -> Self {
        Self::NonPositive {
            name: name.into(),
            value,
        }
    }

    /// Create an `OutOfRange` error.
    pub fn out_of_range(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            name: name.into(),
            value,
            min,
            max,
        }
    }
}

/// Check that a named value is strictly positive and finite.
pub fn ensure_positive(name: &str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::non_positive(name, value))
    }
}

/// A wall segment steeper than the printable overhang limit.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Overhang angle {angle:.1} deg exceeds maximum {max_angle:.1} deg at z={z:.1}mm")]
pub struct PrintabilityViolation {
    /// Height of the upper sample of the offending pair (mm)
    pub z: f64,
    /// Measured overhang angle (degrees from vertical)
    pub angle: f64,
    /// Configured limit (degrees)
    pub max_angle: f64,
}

/// Internal invariant failures in generated geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryDefect {
    /// Scanline crossed a polygon boundary an odd number of times
    #[error("Odd number of scanline intersections ({count}) at y={y}")]
    OddIntersectionCount {
        /// Number of intersections found.
        count: usize,
        /// Scanline height.
        y: f64,
    },

    /// First and last vertex differ
    #[error("Polygon is not closed")]
    OpenPolygon,

    /// Polygon has too few distinct vertices
    #[error("Degenerate polygon with {points} points")]
    DegeneratePolygon {
        /// Vertex count.
        points: usize,
    },

    /// Z went down along the toolpath
    #[error("Z decreased at toolpath point {index}: {z:.5} < {previous:.5}")]
    NonMonotonicZ {
        /// Index of the offending point.
        index: usize,
        /// Z of the offending point.
        z: f64,
        /// Z of the preceding point.
        previous: f64,
    },

    /// Layers passed to the spiral builder disagree on point count
    #[error("Layer {layer} has {got} points, expected {expected}")]
    MismatchedLayerSize {
        /// Layer index.
        layer: usize,
        /// Points found.
        got: usize,
        /// Points expected.
        expected: usize,
    },

    /// Nothing to print
    #[error("Toolpath is empty")]
    EmptyToolpath,

    /// An extruding move pushes more filament per mm than allowed
    #[error("Extrusion rate {rate:.5} mm/mm exceeds limit {limit:.5} on line {line}")]
    ExtrusionRateExceeded {
        /// 1-based G-code line number.
        line: usize,
        /// Filament per mm of travel.
        rate: f64,
        /// Configured limit.
        limit: f64,
    },

    /// A move leaves the printable area
    #[error("Move on line {line} leaves the bed: X{x:.3} Y{y:.3}")]
    OutsideBed {
        /// 1-based G-code line number.
        line: usize,
        /// Target X.
        x: f64,
        /// Target Y.
        y: f64,
    },
}

/// Top-level error type for the pipeline.
#[derive(Error, Debug)]
pub enum LampshadeError {
    /// Invalid input parameters
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Overhang limit exceeded
    #[error("Printability check failed: {0}")]
    Printability(#[from] PrintabilityViolation),

    /// Internal geometry invariant broken
    #[error("Geometry defect: {0}")]
    Geometry(#[from] GeometryDefect),

    /// I/O error writing output
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LampshadeError {
    /// Whether the caller may log this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Printability(_))
    }
}

/// Result type alias for pipeline operations.
pub type LampshadeResult<T> = Result<T, LampshadeError>;
