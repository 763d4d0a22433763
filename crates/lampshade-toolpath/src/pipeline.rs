//! End-to-end generation pipeline
//!
//! Runs every stage in order for one shape:
//! validate, sample and check printability, build layers, build the spiral,
//! write G-code, re-validate the G-code, analyze. Each stage consumes the
//! previous stage's output and nothing is mutated afterwards.

use crate::analysis::{analyze, AnalysisResult, ComparisonRow};
use crate::extrusion::ExtrusionModel;
use crate::gcode_writer::{GCodeDocument, GCodeWriter, RunStats};
use crate::spiral::build_spiral;
use crate::validator::{GCodeValidator, ValidationSummary};
use chrono::{DateTime, Utc};
use lampshade_core::{
    FilamentMaterial, Layer, LampshadeResult, PrintSettings, PrinterSpecs, ProfileKind,
    ShapeParameters, SpiralPath,
};
use lampshade_geometry::{
    sample_profile, validate_printability, LayerGenerator, PrintabilityVerdict, ProfileSample,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Headroom over the nominal filament-per-mm ratio before the G-code check
/// fails. Covers three-decimal coordinate rounding on short moves.
const EXTRUSION_RATE_HEADROOM: f64 = 2.0;

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub samples: Vec<ProfileSample>,
    pub printability: PrintabilityVerdict,
    pub layers: Vec<Layer>,
    pub spiral: SpiralPath,
    pub document: GCodeDocument,
    pub validation: ValidationSummary,
    pub analysis: AnalysisResult,
}

impl PipelineOutput {
    pub fn stats(&self) -> &RunStats {
        self.document.stats()
    }
}

/// Serializable summary of a run for external reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub profile: ProfileKind,
    pub generated_at: DateTime<Utc>,
    pub shape: ShapeParameters,
    pub stats: RunStats,
    pub validation: ValidationSummary,
    pub analysis: AnalysisResult,
    /// Set when overhangs were allowed and the profile exceeded the limit
    pub overhang_warning: Option<String>,
}

/// Generation pipeline for one shape on one printer
#[derive(Debug, Clone)]
pub struct Pipeline {
    shape: ShapeParameters,
    printer: PrinterSpecs,
    settings: PrintSettings,
    material: FilamentMaterial,
    allow_overhangs: bool,
}

impl Pipeline {
    pub fn new(shape: ShapeParameters, printer: PrinterSpecs, settings: PrintSettings) -> Self {
        Self {
            shape,
            printer,
            settings,
            material: FilamentMaterial::default(),
            allow_overhangs: false,
        }
    }

    pub fn with_material(mut self, material: FilamentMaterial) -> Self {
        self.material = material;
        self
    }

    /// Log printability violations instead of aborting.
    pub fn allow_overhangs(mut self, allow: bool) -> Self {
        self.allow_overhangs = allow;
        self
    }

    /// Same pipeline with a different profile.
    pub fn with_profile(mut self, profile: ProfileKind) -> Self {
        self.shape.profile = profile;
        self
    }

    pub fn shape(&self) -> &ShapeParameters {
        &self.shape
    }

    pub fn printer(&self) -> &PrinterSpecs {
        &self.printer
    }

    pub fn settings(&self) -> &PrintSettings {
        &self.settings
    }

    /// Run every stage.
    pub fn run(&self) -> LampshadeResult<PipelineOutput> {
        self.shape.validate()?;
        self.printer.validate()?;
        self.settings.validate()?;

        let layer_height = self.settings.layer_height;
        info!(
            "Generating {} lamp shade: {:.1}mm -> {:.1}mm over {:.1}mm",
            self.shape.profile,
            self.shape.base_radius,
            self.shape.top_radius,
            self.shape.total_height
        );

        let samples = sample_profile(&self.shape, layer_height)?;
        let printability = validate_printability(&samples, self.printer.max_overhang_angle)?;
        if let PrintabilityVerdict::Violation(violation) = printability {
            if !self.allow_overhangs {
                return Err(violation.into());
            }
            warn!("{}; continuing", violation);
        }

        let layers = LayerGenerator::new(
            &self.shape,
            self.printer.bed_center,
            self.settings.num_points,
        )
        .generate(layer_height)?;

        let spiral = build_spiral(&layers, layer_height)?;
        let document =
            GCodeWriter::new(&self.shape, &self.printer, &self.settings).generate(&spiral)?;

        let model = ExtrusionModel::from_settings(&self.printer, &self.settings)?;
        let validation = GCodeValidator::for_printer(&self.printer)
            .with_max_extrusion_per_mm(model.e_per_mm() * EXTRUSION_RATE_HEADROOM)
            .validate_text(document.text())?;

        let analysis = analyze(
            &layers,
            document.stats(),
            &self.printer,
            &self.settings,
            &self.material,
        )?;

        info!(
            "{} profile: {} layers, {} points, max overhang {:.1} deg, {:.1} min, {:.1} g",
            self.shape.profile,
            layers.len(),
            spiral.len(),
            analysis.max_overhang_angle,
            analysis.print_time_minutes,
            analysis.material_grams
        );

        Ok(PipelineOutput {
            samples,
            printability,
            layers,
            spiral,
            document,
            validation,
            analysis,
        })
    }

    /// Build the serializable report for a finished run.
    pub fn report(&self, output: &PipelineOutput) -> RunReport {
        let overhang_warning = match output.printability {
            PrintabilityVerdict::Violation(v) => Some(v.to_string()),
            PrintabilityVerdict::Printable { .. } => None,
        };

        RunReport {
            profile: self.shape.profile,
            generated_at: Utc::now(),
            shape: self.shape.clone(),
            stats: output.stats().clone(),
            validation: output.validation.clone(),
            analysis: output.analysis.clone(),
            overhang_warning,
        }
    }
}

/// Run the pipeline once per profile with overhangs allowed, recording
/// failures per row instead of stopping.
pub fn compare_profiles(pipeline: &Pipeline, profiles: &[ProfileKind]) -> Vec<ComparisonRow> {
    profiles
        .iter()
        .map(|&profile| {
            let run = pipeline
                .clone()
                .with_profile(profile)
                .allow_overhangs(true)
                .run();

            match run {
                Ok(output) => ComparisonRow {
                    profile,
                    analysis: Some(output.analysis),
                    error: None,
                },
                Err(e) => {
                    warn!("Comparison run failed for {} profile: {}", profile, e);
                    ComparisonRow {
                        profile,
                        analysis: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}
