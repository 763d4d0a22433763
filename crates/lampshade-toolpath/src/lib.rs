//! # Lampshade Toolpath
//!
//! Turns layers into a printable spiral and everything downstream of it:
//! the capsule extrusion model, the spiral toolpath builder, G-code
//! emission and validation, performance analysis and the end-to-end
//! pipeline.

pub mod analysis;
pub mod extrusion;
pub mod gcode_writer;
pub mod pipeline;
pub mod spiral;
pub mod templates;
pub mod validator;

pub use analysis::{analyze, format_comparison_table, AnalysisResult, ComparisonRow};
pub use extrusion::{delta_e, extruded_area, ExtrusionModel};
pub use gcode_writer::{write_atomic, GCodeDocument, GCodeWriter, RunStats};
pub use pipeline::{compare_profiles, Pipeline, PipelineOutput, RunReport};
pub use spiral::build_spiral;
pub use validator::{GCodeValidator, ValidationSummary};
