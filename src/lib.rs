//! # Lampshade
//!
//! Parametric lamp shade generator for FDM printers. A shade is a single
//! wall of revolution printed as one continuous spiral (vase mode), so Z
//! rises smoothly with every point and there is no layer seam.
//!
//! ## Architecture
//!
//! The workspace is split by stage:
//!
//! 1. **lampshade-core** - Shape, printer and print settings, points, layers,
//!    the spiral toolpath type and the error taxonomy
//! 2. **lampshade-geometry** - Profile curves, printability checks, twist and
//!    wave modulation, layer construction, scanline fill
//! 3. **lampshade-toolpath** - Extrusion model, spiral builder, G-code
//!    emission and validation, analysis, the end-to-end pipeline
//! 4. **lampshade-settings** - JSON/TOML configuration and product rules
//! 5. **lampshade** - This crate: the `lampshade` binary and run driver

pub mod app;

pub use lampshade_core::{
    ConfigurationError, ExtrusionMode, FilamentMaterial, GeometryDefect, LampshadeError,
    LampshadeResult, Layer, Point2, Point3, PrintSettings, PrintabilityViolation, PrinterSpecs,
    ProfileKind, ShapeParameters, SpiralPath, TwistKind,
};

pub use lampshade_geometry::{
    build_layers, radius_at, sample_profile, validate_printability, LayerGenerator,
    PrintabilityVerdict, ProfileSample, ScanlineFill,
};

pub use lampshade_toolpath::{
    build_spiral, compare_profiles, format_comparison_table, AnalysisResult, ComparisonRow,
    GCodeDocument, GCodeValidator, GCodeWriter, Pipeline, PipelineOutput, RunReport, RunStats,
};

pub use lampshade_settings::{Config, OutputSettings, SettingsError};

pub use app::{run, RunOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(())
}
