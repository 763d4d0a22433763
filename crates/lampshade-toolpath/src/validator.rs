//! G-code validator
//!
//! Re-reads emitted G-code and checks the machine-safety invariants of a
//! spiral print: Z never goes down, extruding moves stay under a filament
//! per millimetre limit, and every move stays on the bed.

use lampshade_core::{GeometryDefect, PrinterSpecs};
use serde::{Deserialize, Serialize};

/// Default ceiling on filament per millimetre of travel
pub const DEFAULT_MAX_EXTRUSION_PER_MM: f64 = 0.25;

/// Slack for coordinates printed at three decimals
const COORDINATE_TOLERANCE: f64 = 1e-6;

/// Counters gathered while validating
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// `G0`/`G1` moves seen
    pub moves: usize,
    /// Moves that pushed filament
    pub extruding_moves: usize,
    /// Highest absolute Z reached by a move
    pub max_z: f64,
    /// Highest filament per millimetre seen
    pub max_extrusion_rate: f64,
    /// Net filament pushed by extruding moves (mm)
    pub total_extrusion: f64,
}

/// Checks emitted G-code against machine limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GCodeValidator {
    bed_size: (f64, f64),
    max_extrusion_per_mm: f64,
}

impl Default for GCodeValidator {
    fn default() -> Self {
        Self::for_printer(&PrinterSpecs::default())
    }
}

#[derive(Debug, Default)]
struct MachineState {
    relative_xyz: bool,
    relative_e: bool,
    position: [Option<f64>; 3],
    e: f64,
}

impl GCodeValidator {
    pub fn new(bed_size: (f64, f64)) -> Self {
        Self {
            bed_size,
            max_extrusion_per_mm: DEFAULT_MAX_EXTRUSION_PER_MM,
        }
    }

    pub fn for_printer(printer: &PrinterSpecs) -> Self {
        Self::new(printer.bed_size)
    }

    pub fn with_max_extrusion_per_mm(mut self, limit: f64) -> Self {
        self.max_extrusion_per_mm = limit;
        self
    }

    /// Validate a complete G-code text.
    pub fn validate_text(&self, text: &str) -> Result<ValidationSummary, GeometryDefect> {
        let lines: Vec<&str> = text.lines().collect();
        self.validate(&lines)
    }

    /// Validate G-code lines. Line numbers in errors are 1-based.
    pub fn validate<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<ValidationSummary, GeometryDefect> {
        let mut state = MachineState::default();
        let mut summary = ValidationSummary::default();

        for (index, raw) in lines.iter().enumerate() {
            let line_no = index + 1;
            let code = raw.as_ref().split(';').next().unwrap_or("").trim();
            let mut words = code.split_whitespace();
            let command = match words.next() {
                Some(c) => c.to_ascii_uppercase(),
                None => continue,
            };

            let params: Vec<(char, f64)> = words.filter_map(parse_word).collect();
            let param = |letter: char| {
                params
                    .iter()
                    .find(|(l, _)| *l == letter)
                    .map(|(_, v)| *v)
            };

            match command.as_str() {
                "G90" => state.relative_xyz = false,
                "G91" => state.relative_xyz = true,
                "M82" => state.relative_e = false,
                "M83" => state.relative_e = true,
                "G28" => state.position = [None; 3],
                "G92" => {
                    if let Some(e) = param('E') {
                        state.e = e;
                    }
                }
                "G0" | "G1" => {
                    self.check_move(line_no, &mut state, &mut summary, &param)?;
                }
                _ => {}
            }
        }

        Ok(summary)
    }

    fn check_move(
        &self,
        line_no: usize,
        state: &mut MachineState,
        summary: &mut ValidationSummary,
        param: &dyn Fn(char) -> Option<f64>,
    ) -> Result<(), GeometryDefect> {
        summary.moves += 1;

        let previous = state.position;
        let mut next = previous;
        for (axis, letter) in ['X', 'Y', 'Z'].into_iter().enumerate() {
            if let Some(value) = param(letter) {
                next[axis] = if state.relative_xyz {
                    previous[axis].map(|p| p + value)
                } else {
                    Some(value)
                };
            }
        }

        if let (Some(prev_z), Some(z)) = (previous[2], next[2]) {
            if z < prev_z - COORDINATE_TOLERANCE {
                return Err(GeometryDefect::NonMonotonicZ {
                    index: line_no,
                    z,
                    previous: prev_z,
                });
            }
        }
        if let Some(z) = next[2] {
            summary.max_z = summary.max_z.max(z);
        }

        let off_bed = |v: Option<f64>, limit: f64| {
            v.is_some_and(|v| v < -COORDINATE_TOLERANCE || v > limit + COORDINATE_TOLERANCE)
        };
        if off_bed(next[0], self.bed_size.0) || off_bed(next[1], self.bed_size.1) {
            return Err(GeometryDefect::OutsideBed {
                line: line_no,
                x: next[0].unwrap_or(f64::NAN),
                y: next[1].unwrap_or(f64::NAN),
            });
        }

        if let Some(e) = param('E') {
            let delta = if state.relative_e { e } else { e - state.e };
            state.e = if state.relative_e { state.e + e } else { e };

            if delta > 0.0 {
                let length = move_length(&previous, &next);
                let rate = if length > 0.0 {
                    delta / length
                } else {
                    f64::INFINITY
                };
                if rate > self.max_extrusion_per_mm {
                    return Err(GeometryDefect::ExtrusionRateExceeded {
                        line: line_no,
                        rate,
                        limit: self.max_extrusion_per_mm,
                    });
                }
                summary.extruding_moves += 1;
                summary.max_extrusion_rate = summary.max_extrusion_rate.max(rate);
                summary.total_extrusion += delta;
            }
        }

        state.position = next;
        Ok(())
    }
}

fn parse_word(word: &str) -> Option<(char, f64)> {
    let mut chars = word.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let value = chars.as_str().parse::<f64>().ok()?;
    Some((letter, value))
}

fn move_length(from: &[Option<f64>; 3], to: &[Option<f64>; 3]) -> f64 {
    from.iter()
        .zip(to.iter())
        .filter_map(|(a, b)| Some(b.as_ref()? - a.as_ref()?))
        .map(|d| d * d)
        .sum::<f64>()
        .sqrt()
}
