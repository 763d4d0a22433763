//! G-code writer
//!
//! Streams a spiral toolpath into `G1` moves between the start and end
//! blocks. Distance and extrusion are accumulated strictly in order since
//! every move's length depends on the previous emitted position.

use crate::extrusion::ExtrusionModel;
use crate::templates::{end_block, start_block, Z_FEED_RATE};
use lampshade_core::{
    ExtrusionMode, GeometryDefect, LampshadeResult, Point3, PrintSettings, PrinterSpecs,
    ShapeParameters, SpiralPath,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Moves shorter than this are dropped (mm)
pub const MIN_MOVE_LENGTH: f64 = 1e-9;

/// Statistics for one generated document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Time spent generating (seconds)
    pub generation_time: f64,
    /// Document size (bytes)
    pub file_size: usize,
    /// Number of lines in the document
    pub line_count: usize,
    /// Toolpath points consumed
    pub point_count: usize,
    /// Sum of extruding move lengths (mm)
    pub total_distance: f64,
    /// Filament pushed (mm)
    pub total_extrusion: f64,
    /// Points whose Z had to be raised to the previous Z
    pub z_clamps: usize,
}

/// Generated G-code text and its statistics
#[derive(Debug, Clone)]
pub struct GCodeDocument {
    text: String,
    stats: RunStats,
}

impl GCodeDocument {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Write the document to `path` with [`write_atomic`].
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        write_atomic(path, self.text.as_bytes())
    }
}

/// Write `contents` to `path`, creating parent directories.
///
/// The bytes go to a temporary file in the target directory which is then
/// renamed over `path`, so readers never observe a partial file.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        writer.write_all(contents)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Emits a complete print for one shape
pub struct GCodeWriter<'a> {
    shape: &'a ShapeParameters,
    printer: &'a PrinterSpecs,
    settings: &'a PrintSettings,
}

impl<'a> GCodeWriter<'a> {
    pub fn new(
        shape: &'a ShapeParameters,
        printer: &'a PrinterSpecs,
        settings: &'a PrintSettings,
    ) -> Self {
        Self {
            shape,
            printer,
            settings,
        }
    }

    /// Generate G-code for a spiral toolpath.
    pub fn generate(&self, path: &SpiralPath) -> LampshadeResult<GCodeDocument> {
        self.generate_points(path.points())
    }

    /// Generate G-code for a raw point sequence.
    ///
    /// Any point below its predecessor is clamped up to the previous Z and
    /// counted in [`RunStats::z_clamps`].
    pub fn generate_points(&self, points: &[Point3]) -> LampshadeResult<GCodeDocument> {
        let started = Instant::now();
        let first = *points.first().ok_or(GeometryDefect::EmptyToolpath)?;
        let model = ExtrusionModel::from_settings(self.printer, self.settings)?;

        let mut gcode = String::with_capacity(points.len() * 48 + 2048);
        self.write_header(&mut gcode, points.len());
        gcode.push_str(&start_block(self.printer, self.settings));
        gcode.push('\n');

        gcode.push_str(&format!(
            "G1 Z{:.3} F{:.0} ; move to start Z\n",
            first.z, Z_FEED_RATE
        ));
        gcode.push_str(&format!(
            "G1 X{:.3} Y{:.3} F{:.0} ; travel to start\n",
            first.x, first.y, self.printer.travel_speed
        ));
        gcode.push_str("; Begin spiral\n");

        let mut previous = first;
        let mut total_distance = 0.0;
        let mut total_extrusion = 0.0;
        let mut z_clamps = 0usize;

        for (index, point) in points.iter().enumerate().skip(1) {
            let mut target = *point;
            if target.z < previous.z {
                warn!(
                    "Toolpath Z decreased at point {} ({:.5} < {:.5}), clamping",
                    index, target.z, previous.z
                );
                target.z = previous.z;
                z_clamps += 1;
            }

            let length = previous.distance_to(&target);
            if length <= MIN_MOVE_LENGTH {
                continue;
            }

            let delta = model.delta_e(length);
            total_extrusion += delta;
            total_distance += length;

            let e = match self.settings.extrusion_mode {
                ExtrusionMode::Relative => delta,
                ExtrusionMode::Absolute => total_extrusion,
            };
            gcode.push_str(&format!(
                "G1 X{:.3} Y{:.3} Z{:.3} E{:.5} F{:.0}\n",
                target.x, target.y, target.z, e, self.printer.print_speed
            ));

            previous = target;
        }

        gcode.push_str("; End of spiral\n");
        gcode.push('\n');
        gcode.push_str(&end_block());

        let stats = RunStats {
            generation_time: started.elapsed().as_secs_f64(),
            file_size: gcode.len(),
            line_count: gcode.lines().count(),
            point_count: points.len(),
            total_distance,
            total_extrusion,
            z_clamps,
        };

        info!(
            "Generated {} lines ({:.1} KB), {:.2} m of toolpath, {:.1} mm filament",
            stats.line_count,
            stats.file_size as f64 / 1024.0,
            stats.total_distance / 1000.0,
            stats.total_extrusion
        );

        Ok(GCodeDocument { text: gcode, stats })
    }

    fn write_header(&self, gcode: &mut String, point_count: usize) {
        gcode.push_str("; Spiral Lamp Shade G-code\n");
        gcode.push_str(&format!(
            "; Generated: {}\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        gcode.push_str(&format!("; Profile: {}\n", self.shape.profile));
        gcode.push_str(&format!(
            "; Radius: {:.2}mm base, {:.2}mm top, height {:.2}mm\n",
            self.shape.base_radius, self.shape.top_radius, self.shape.total_height
        ));
        if self.shape.twist_enabled {
            gcode.push_str(&format!(
                "; Twist: {:.1} deg ({})\n",
                self.shape.twist_degrees, self.shape.twist_kind
            ));
        }
        if self.shape.wave_enabled {
            gcode.push_str(&format!(
                "; Wave: {:.2}mm x {}\n",
                self.shape.wave_amplitude, self.shape.wave_frequency
            ));
        }
        gcode.push_str(&format!(
            "; Layer height: {:.2}mm, line width: {:.2}mm\n",
            self.settings.layer_height, self.settings.line_width
        ));
        gcode.push_str(&format!("; Toolpath points: {}\n", point_count));
        gcode.push_str(&format!("; Extrusion: {}\n", self.settings.extrusion_mode));
        gcode.push_str(";\n");
    }
}
