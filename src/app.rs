//! Run driver for the `lampshade` binary
//!
//! Validates a [`Config`], runs the pipeline for the configured profile,
//! writes the G-code and JSON report into the output directory and
//! optionally renders the profile comparison table.

use anyhow::Context;
use lampshade_core::ProfileKind;
use lampshade_settings::Config;
use lampshade_toolpath::{
    compare_profiles, format_comparison_table, write_atomic, Pipeline, PipelineOutput,
};
use std::path::PathBuf;
use tracing::info;

/// Files and results produced by [`run`]
#[derive(Debug)]
pub struct RunOutcome {
    pub output: PipelineOutput,
    pub gcode_path: PathBuf,
    pub report_path: Option<PathBuf>,
    /// Markdown comparison table, when enabled
    pub comparison: Option<String>,
}

/// Generate one lamp shade from `config`.
pub fn run(config: &Config) -> anyhow::Result<RunOutcome> {
    config.validate().context("Invalid configuration")?;

    let pipeline = Pipeline::new(
        config.shape.clone(),
        config.printer.clone(),
        config.print.clone(),
    )
    .with_material(config.material.clone())
    .allow_overhangs(config.output.allow_overhangs);

    let profile = config.shape.profile;
    let output = pipeline
        .run()
        .with_context(|| format!("Generation failed for {} profile", profile))?;

    let gcode_path = config.gcode_path(profile);
    output
        .document
        .write_to(&gcode_path)
        .with_context(|| format!("Failed to write {}", gcode_path.display()))?;
    info!("G-code written to {}", gcode_path.display());

    let report_path = if config.output.write_report {
        let path = config.report_path(profile);
        let report = pipeline.report(&output);
        let json = serde_json::to_string_pretty(&report)?;
        write_atomic(&path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Report written to {}", path.display());
        Some(path)
    } else {
        None
    };

    let comparison = config.output.compare_profiles.then(|| {
        let rows = compare_profiles(&pipeline, &ProfileKind::ALL);
        format_comparison_table(&rows)
    });

    Ok(RunOutcome {
        output,
        gcode_path,
        report_path,
        comparison,
    })
}
