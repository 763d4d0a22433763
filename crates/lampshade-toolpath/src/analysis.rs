//! Performance analysis
//!
//! Derived metrics for a generated shade: steepest overhang, wall volume,
//! print time and filament mass. Nothing here feeds back into generation.

use crate::gcode_writer::RunStats;
use lampshade_core::error::ensure_positive;
use lampshade_core::{
    ConfigurationError, FilamentMaterial, Layer, PrintSettings, PrinterSpecs, ProfileKind,
};
use lampshade_geometry::{max_overhang, ProfileSample};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Multiplier on pure travel time for acceleration and deceleration
pub const ACCELERATION_OVERHEAD: f64 = 1.1;

/// Metrics for one generated shade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Steepest angle between consecutive layers (degrees)
    pub max_overhang_angle: f64,
    /// Height at which the steepest angle occurs (mm)
    pub max_overhang_z: f64,
    /// Wall volume (mm³)
    pub volume_mm3: f64,
    /// Estimated print time (minutes)
    pub print_time_minutes: f64,
    /// Filament mass (g)
    pub material_grams: f64,
}

/// Sum of thin cylindrical shells `2π · r · wall · layer_height`.
pub fn estimate_volume(layers: &[Layer], line_width: f64, layer_height: f64) -> f64 {
    layers
        .iter()
        .map(|layer| TAU * layer.radius() * line_width * layer_height)
        .sum()
}

/// Print time in minutes for `distance` mm at `print_speed` mm/min.
pub fn estimate_print_time(distance: f64, print_speed: f64) -> Result<f64, ConfigurationError> {
    ensure_positive("print_speed", print_speed)?;
    Ok(distance / print_speed * ACCELERATION_OVERHEAD)
}

/// Analyze generated layers and G-code statistics.
pub fn analyze(
    layers: &[Layer],
    stats: &RunStats,
    printer: &PrinterSpecs,
    settings: &PrintSettings,
    material: &FilamentMaterial,
) -> Result<AnalysisResult, ConfigurationError> {
    let samples: Vec<ProfileSample> = layers
        .iter()
        .map(|layer| ProfileSample::new(layer.z(), layer.radius()))
        .collect();
    let steepest = max_overhang(&samples)?;

    let volume_mm3 = estimate_volume(layers, settings.line_width, settings.layer_height);

    Ok(AnalysisResult {
        max_overhang_angle: steepest.map_or(0.0, |e| e.angle),
        max_overhang_z: steepest.map_or(0.0, |e| e.z),
        volume_mm3,
        print_time_minutes: estimate_print_time(stats.total_distance, printer.print_speed)?,
        material_grams: material.mass_grams(volume_mm3),
    })
}

/// One row of a profile comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub profile: ProfileKind,
    /// Present when the pipeline succeeded for this profile
    pub analysis: Option<AnalysisResult>,
    /// Failure message otherwise
    pub error: Option<String>,
}

fn capitalized(profile: ProfileKind) -> String {
    let name = profile.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

/// Render comparison rows as a Markdown table.
pub fn format_comparison_table(rows: &[ComparisonRow]) -> String {
    let mut table = String::new();
    table.push_str(&format!(
        "| {:12} | {:12} | {:10} | {:10} | {:10} |\n",
        "Profile", "Max Overhang", "Volume", "Print Time", "Material"
    ));
    table.push_str(&format!(
        "|{}|{}|{}|{}|{}|\n",
        "-".repeat(14),
        "-".repeat(14),
        "-".repeat(12),
        "-".repeat(12),
        "-".repeat(12)
    ));

    for row in rows {
        let name = capitalized(row.profile);
        match &row.analysis {
            Some(a) => table.push_str(&format!(
                "| {:12} | {:12} | {:10} | {:10} | {:10} |\n",
                name,
                format!("{:.1} deg", a.max_overhang_angle),
                format!("{:.0} mm3", a.volume_mm3),
                format!("{:.1} min", a.print_time_minutes),
                format!("{:.1} g", a.material_grams),
            )),
            None => table.push_str(&format!(
                "| {:12} | {:12} | {:10} | {:10} | {:10} |\n",
                name, "failed", "-", "-", "-"
            )),
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lampshade_core::Point2;

    fn ring_layer(z: f64, radius: f64) -> Layer {
        let ring = (0..8)
            .map(|i| {
                let a = TAU * i as f64 / 8.0;
                Point2::new(radius * a.cos(), radius * a.sin())
            })
            .collect();
        Layer::close(z, radius, ring).unwrap()
    }

    #[test]
    fn test_volume_and_mass() {
        let layers = vec![ring_layer(0.2, 10.0), ring_layer(0.4, 10.0)];
        let volume = estimate_volume(&layers, 0.5, 0.2);
        assert_relative_eq!(volume, 2.0 * TAU * 10.0 * 0.5 * 0.2, epsilon = 1e-12);

        let stats = RunStats {
            total_distance: 1500.0,
            ..Default::default()
        };
        let settings = PrintSettings {
            line_width: 0.5,
            layer_height: 0.2,
            ..Default::default()
        };
        let result = analyze(
            &layers,
            &stats,
            &PrinterSpecs::default(),
            &settings,
            &FilamentMaterial::pla(),
        )
        .unwrap();

        assert_relative_eq!(result.print_time_minutes, 1.1, epsilon = 1e-12);
        assert_relative_eq!(result.material_grams, volume / 1000.0 * 1.24, epsilon = 1e-12);
        assert_eq!(result.max_overhang_angle, 0.0);
    }

    #[test]
    fn test_overhang_from_layers() {
        let layers = vec![
            ring_layer(0.2, 30.0),
            ring_layer(0.4, 30.1),
            ring_layer(0.6, 30.4),
        ];
        let result = analyze(
            &layers,
            &RunStats::default(),
            &PrinterSpecs::default(),
            &PrintSettings::default(),
            &FilamentMaterial::pla(),
        )
        .unwrap();
        assert_relative_eq!(
            result.max_overhang_angle,
            1.5f64.atan().to_degrees(),
            epsilon = 1e-6
        );
        assert_relative_eq!(result.max_overhang_z, 0.6);
    }

    #[test]
    fn test_comparison_table() {
        let rows = vec![
            ComparisonRow {
                profile: ProfileKind::Linear,
                analysis: Some(AnalysisResult {
                    max_overhang_angle: 5.71,
                    max_overhang_z: 0.4,
                    volume_mm3: 9500.4,
                    print_time_minutes: 42.24,
                    material_grams: 11.78,
                }),
                error: None,
            },
            ComparisonRow {
                profile: ProfileKind::Concave,
                analysis: None,
                error: Some("overhang".to_string()),
            },
        ];
        let table = format_comparison_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Profile      | Max Overhang |"));
        assert_eq!(
            lines[2],
            "| Linear       | 5.7 deg      | 9500 mm3   | 42.2 min   | 11.8 g     |"
        );
        assert!(lines[3].contains("Concave") && lines[3].contains("failed"));
    }
}
