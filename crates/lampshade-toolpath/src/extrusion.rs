//! Extrusion calculator
//!
//! A deposited bead is modeled as a capsule: a `width × height` rectangle
//! capped by two half-circles of diameter `height`. Filament length is the
//! bead volume divided by the filament cross-section.

use lampshade_core::error::ensure_positive;
use lampshade_core::{ConfigurationError, PrintSettings, PrinterSpecs};
use std::f64::consts::PI;

/// Capsule cross-section area of a bead (mm²).
pub fn extruded_area(width: f64, height: f64) -> Result<f64, ConfigurationError> {
    ensure_positive("line_width", width)?;
    ensure_positive("layer_height", height)?;
    Ok(width * height + PI * (height / 2.0).powi(2))
}

/// Cross-section area of the filament (mm²).
pub fn filament_area(filament_diameter: f64) -> Result<f64, ConfigurationError> {
    ensure_positive("filament_diameter", filament_diameter)?;
    Ok(PI * (filament_diameter / 2.0).powi(2))
}

/// Filament length (mm) pushed for a move of `length` mm.
pub fn delta_e(
    length: f64,
    width: f64,
    height: f64,
    filament_diameter: f64,
    flow_multiplier: f64,
) -> Result<f64, ConfigurationError> {
    ensure_positive("length", length)?;
    ensure_positive("flow_multiplier", flow_multiplier)?;
    let volume = extruded_area(width, height)? * length;
    Ok(volume / filament_area(filament_diameter)? * flow_multiplier)
}

/// Precomputed filament-per-millimetre ratio for a fixed bead geometry.
///
/// The writer calls this once per move, so the areas are computed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionModel {
    e_per_mm: f64,
}

impl ExtrusionModel {
    pub fn new(
        line_width: f64,
        layer_height: f64,
        filament_diameter: f64,
        flow_multiplier: f64,
    ) -> Result<Self, ConfigurationError> {
        ensure_positive("flow_multiplier", flow_multiplier)?;
        let e_per_mm = extruded_area(line_width, layer_height)? / filament_area(filament_diameter)?
            * flow_multiplier;
        Ok(Self { e_per_mm })
    }

    pub fn from_settings(
        printer: &PrinterSpecs,
        settings: &PrintSettings,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            settings.line_width,
            settings.layer_height,
            printer.filament_diameter,
            printer.flow_multiplier,
        )
    }

    /// Filament per millimetre of travel
    pub fn e_per_mm(&self) -> f64 {
        self.e_per_mm
    }

    /// Filament for a move of `length` mm.
    pub fn delta_e(&self, length: f64) -> f64 {
        self.e_per_mm * length
    }
}
