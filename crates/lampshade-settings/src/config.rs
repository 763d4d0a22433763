//! Configuration file handling for the lampshade generator
//!
//! A configuration file groups every input of a run into sections:
//! - `shape`: profile, radii, height, twist and wave
//! - `printer`: machine limits and feed rates
//! - `print`: layer height, line width, points per layer, temperatures
//! - `material`: filament density for mass estimates
//! - `output`: where generated files go
//!
//! Files are JSON or TOML, chosen by extension. Missing sections take
//! their defaults.

use crate::error::{Result, SettingsError};
use lampshade_core::error::ensure_positive;
use lampshade_core::{
    ConfigurationError, FilamentMaterial, PrintSettings, PrinterSpecs, ProfileKind,
    ShapeParameters,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fewest points per layer that still reads as a smooth round wall
pub const MIN_POINTS_PER_LAYER: usize = 12;

/// Thickest layer the reference nozzle prints reliably (mm)
pub const MAX_LAYER_HEIGHT: f64 = 0.3;

/// Narrowest radius that stands up on its own (mm)
pub const MIN_STABLE_RADIUS: f64 = 10.0;

/// Output file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for G-code and reports
    pub directory: PathBuf,
    /// Write a JSON report next to the G-code
    pub write_report: bool,
    /// Print the comparison table for every profile
    pub compare_profiles: bool,
    /// Continue past printability violations with a warning
    pub allow_overhangs: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            write_report: true,
            compare_profiles: true,
            allow_overhangs: false,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub shape: ShapeParameters,
    pub printer: PrinterSpecs,
    pub print: PrintSettings,
    pub material: FilamentMaterial,
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, `<config_dir>/lampshade/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("lampshade").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section, then the product rules that tie them together.
    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        self.printer.validate()?;
        self.print.validate()?;
        ensure_positive("material.density_g_cm3", self.material.density_g_cm3)?;

        // Validate print settings
        let layer_height = self.print.layer_height;
        if layer_height > MAX_LAYER_HEIGHT {
            return Err(
                ConfigurationError::out_of_range("layer_height", layer_height, 0.0, MAX_LAYER_HEIGHT)
                    .into(),
            );
        }

        if layer_height > self.shape.total_height {
            return Err(ConfigurationError::out_of_range(
                "layer_height",
                layer_height,
                0.0,
                self.shape.total_height,
            )
            .into());
        }

        if self.print.num_points < MIN_POINTS_PER_LAYER {
            return Err(ConfigurationError::TooFewPoints {
                got: self.print.num_points,
                min: MIN_POINTS_PER_LAYER,
            }
            .into());
        }

        // Validate shape against the machine
        let narrowest = self.shape.base_radius.min(self.shape.top_radius);
        if narrowest < MIN_STABLE_RADIUS {
            return Err(ConfigurationError::InvalidValue {
                name: "radius".to_string(),
                reason: format!(
                    "{:.1}mm is below the {:.0}mm minimum for a stable shade",
                    narrowest, MIN_STABLE_RADIUS
                ),
            }
            .into());
        }

        let widest = self.shape.max_extent();
        if !self.printer.fits_on_bed(widest) {
            return Err(ConfigurationError::ExceedsBed {
                radius: widest,
                center_x: self.printer.bed_center.x,
                center_y: self.printer.bed_center.y,
            }
            .into());
        }

        if self.shape.total_height > self.printer.max_z {
            return Err(ConfigurationError::ExceedsMaxZ {
                height: self.shape.total_height,
                max_z: self.printer.max_z,
            }
            .into());
        }

        Ok(())
    }

    /// G-code path for a profile, `<output>/lamp_shade_<profile>.gcode`.
    pub fn gcode_path(&self, profile: ProfileKind) -> PathBuf {
        self.output
            .directory
            .join(format!("lamp_shade_{}.gcode", profile))
    }

    /// Report path for a profile, `<output>/lamp_shade_<profile>.json`.
    pub fn report_path(&self, profile: ProfileKind) -> PathBuf {
        self.output
            .directory
            .join(format!("lamp_shade_{}.json", profile))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(
                "Config file must be .json or .toml".to_string(),
            )),
        }
    }
}
