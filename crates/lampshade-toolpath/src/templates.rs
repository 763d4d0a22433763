//! Print start and end blocks
//!
//! Machine preparation around the spiral: units, positioning, acceleration
//! limits, heating and homing before; heaters off, retract and park after.

use lampshade_core::{ExtrusionMode, PrintSettings, PrinterSpecs};

/// Hotend temperature reached before homing
const PREHEAT_TEMP: u32 = 170;

/// Feed rate for Z-only moves (mm/min)
pub const Z_FEED_RATE: f64 = 900.0;

/// Machine preparation block.
pub fn start_block(printer: &PrinterSpecs, settings: &PrintSettings) -> String {
    let mut gcode = String::new();

    gcode.push_str(&format!("; printer_model = {}\n", printer.model));
    gcode.push_str(&format!("; nozzle_diameter = {}\n", printer.nozzle_diameter));
    gcode.push_str(&format!("; filament_diameter = {}\n", printer.filament_diameter));
    gcode.push('\n');

    gcode.push_str("G21 ; set units to millimeters\n");
    gcode.push_str("G90 ; use absolute coordinates for positioning\n");
    match settings.extrusion_mode {
        ExtrusionMode::Relative => {
            gcode.push_str("M83 ; use relative distances for extrusion\n");
        }
        ExtrusionMode::Absolute => {
            gcode.push_str("M82 ; use absolute distances for extrusion\n");
        }
    }
    gcode.push('\n');

    gcode.push_str("; Acceleration limits\n");
    gcode.push_str("M201 X2500 Y2500 Z200 E2500 ; max accelerations, mm/sec^2\n");
    gcode.push_str("M203 X200 Y200 Z12 E120 ; max feedrates, mm/sec\n");
    gcode.push_str("M204 P1250 R1250 T1250 ; print, retract and travel acceleration\n");
    gcode.push('\n');

    gcode.push_str("; Temperatures\n");
    gcode.push_str(&format!("M104 S{} ; set hotend temp\n", settings.nozzle_temp));
    gcode.push_str(&format!("M140 S{} ; set bed temp\n", settings.bed_temp));
    gcode.push_str(&format!("M190 S{} ; wait for bed temp\n", settings.bed_temp));
    gcode.push_str(&format!(
        "M109 S{} ; wait for hotend preheat\n",
        PREHEAT_TEMP.min(settings.nozzle_temp)
    ));
    gcode.push('\n');

    gcode.push_str("G28 ; home all axes\n");
    gcode.push('\n');

    gcode.push_str(&format!("M109 S{} ; wait for printing temp\n", settings.nozzle_temp));
    gcode.push_str("G92 E0 ; reset extruder position\n");

    gcode
}

/// Shutdown block: heaters and fan off, retract, raise Z, motors off.
pub fn end_block() -> String {
    let mut gcode = String::new();

    gcode.push_str("G92 E0 ; reset extruder\n");
    gcode.push_str("M104 S0 ; hotend off\n");
    gcode.push_str("M140 S0 ; bed off\n");
    gcode.push_str("M107 ; fan off\n");
    gcode.push_str("G91 ; relative positioning\n");
    gcode.push_str("G1 E-2 F2700 ; retract filament\n");
    gcode.push_str(&format!("G1 Z10 F{:.0} ; raise Z\n", Z_FEED_RATE));
    gcode.push_str("G90 ; absolute positioning\n");
    gcode.push_str("M84 ; disable motors\n");

    gcode
}
