//! Printer and print-job configuration
//!
//! `PrinterSpecs` describes the machine and is constant for a run.
//! `PrintSettings` holds the per-job slicing choices.

use crate::error::{ensure_positive, ConfigurationError};
use crate::geometry::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extruder addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrusionMode {
    /// M83: each move carries its own filament delta
    Relative,
    /// M82: each move carries the running filament total
    Absolute,
}

impl Default for ExtrusionMode {
    fn default() -> Self {
        Self::Relative
    }
}

impl fmt::Display for ExtrusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative => write!(f, "relative"),
            Self::Absolute => write!(f, "absolute"),
        }
    }
}

/// Printer hardware (Prusa MK4S class defaults)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterSpecs {
    /// Model name written to the G-code header
    pub model: String,
    /// Bed size X, Y (mm)
    pub bed_size: (f64, f64),
    /// Object center on the bed (mm)
    pub bed_center: Point2,
    /// Build height (mm)
    pub max_z: f64,
    /// Nozzle diameter (mm)
    pub nozzle_diameter: f64,
    /// Filament diameter (mm)
    pub filament_diameter: f64,
    /// Maximum printable overhang from vertical (degrees)
    pub max_overhang_angle: f64,
    /// Extrusion multiplier
    pub flow_multiplier: f64,
    /// Printing feed rate (mm/min)
    pub print_speed: f64,
    /// Travel feed rate (mm/min)
    pub travel_speed: f64,
}

impl Default for PrinterSpecs {
    fn default() -> Self {
        Self {
            model: "Prusa MK4S".to_string(),
            bed_size: (250.0, 210.0),
            bed_center: Point2::new(105.0, 105.0),
            max_z: 220.0,
            nozzle_diameter: 0.4,
            filament_diameter: 1.75,
            max_overhang_angle: 45.0,
            flow_multiplier: 1.0,
            print_speed: 1500.0,
            travel_speed: 6000.0,
        }
    }
}

impl PrinterSpecs {
    /// Validate machine parameters.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive("bed_size.x", self.bed_size.0)?;
        ensure_positive("bed_size.y", self.bed_size.1)?;
        ensure_positive("max_z", self.max_z)?;
        ensure_positive("nozzle_diameter", self.nozzle_diameter)?;
        ensure_positive("filament_diameter", self.filament_diameter)?;
        ensure_positive("flow_multiplier", self.flow_multiplier)?;
        ensure_positive("print_speed", self.print_speed)?;
        ensure_positive("travel_speed", self.travel_speed)?;

        if !(self.max_overhang_angle > 0.0 && self.max_overhang_angle < 90.0) {
            return Err(ConfigurationError::out_of_range(
                "max_overhang_angle",
                self.max_overhang_angle,
                0.0,
                90.0,
            ));
        }

        let (cx, cy) = (self.bed_center.x, self.bed_center.y);
        if cx < 0.0 || cy < 0.0 || cx > self.bed_size.0 || cy > self.bed_size.1 {
            return Err(ConfigurationError::InvalidValue {
                name: "bed_center".to_string(),
                reason: format!("({:.1}, {:.1}) is off the bed", cx, cy),
            });
        }

        Ok(())
    }

    /// Whether a disc of `radius` around the bed center fits on the bed.
    pub fn fits_on_bed(&self, radius: f64) -> bool {
        let (cx, cy) = (self.bed_center.x, self.bed_center.y);
        cx - radius >= 0.0
            && cx + radius <= self.bed_size.0
            && cy - radius >= 0.0
            && cy + radius <= self.bed_size.1
    }
}

/// Per-job slicing and temperature settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSettings {
    /// Layer height (mm)
    pub layer_height: f64,
    /// Extrusion line width (mm), slightly wider than the nozzle
    pub line_width: f64,
    /// Points per layer cross-section
    pub num_points: usize,
    /// Nozzle temperature (Celsius)
    pub nozzle_temp: u32,
    /// Bed temperature (Celsius)
    pub bed_temp: u32,
    /// Extruder addressing mode
    #[serde(default)]
    pub extrusion_mode: ExtrusionMode,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            layer_height: 0.20,
            line_width: 0.48,
            num_points: 64,
            nozzle_temp: 215,
            bed_temp: 60,
            extrusion_mode: ExtrusionMode::Relative,
        }
    }
}

impl PrintSettings {
    /// Minimum points per layer for a polygon.
    pub const MIN_POINTS: usize = 3;

    /// Validate geometric slicing settings.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive("layer_height", self.layer_height)?;
        ensure_positive("line_width", self.line_width)?;
        if self.num_points < Self::MIN_POINTS {
            return Err(ConfigurationError::TooFewPoints {
                got: self.num_points,
                min: Self::MIN_POINTS,
            });
        }
        Ok(())
    }
}
