//! Layer builder
//!
//! Combines the profile with twist and wave modulation into closed
//! cross-section polygons. Angles are generated open (without the 2π
//! endpoint) and the polygon is closed explicitly afterwards.

use crate::modulation::{radial_wave, twist_angle};
use crate::profile::{layer_heights, normalized_height, radius_at};
use lampshade_core::{
    ConfigurationError, Layer, LampshadeResult, Point2, PrintSettings, ShapeParameters,
};
use rayon::prelude::*;
use std::f64::consts::TAU;
use tracing::debug;

/// Build the closed cross-section at height `z` around `center`.
///
/// Returns `num_points + 1` points; the last repeats the first.
pub fn build_layer(
    z: f64,
    shape: &ShapeParameters,
    center: Point2,
    num_points: usize,
) -> LampshadeResult<Layer> {
    if num_points < PrintSettings::MIN_POINTS {
        return Err(ConfigurationError::TooFewPoints {
            got: num_points,
            min: PrintSettings::MIN_POINTS,
        }
        .into());
    }

    let base_radius = radius_at(normalized_height(z, shape.total_height)?, shape)?;
    let twist = twist_angle(z, shape);

    let ring: Vec<Point2> = (0..num_points)
        .map(|i| {
            let angle = TAU * i as f64 / num_points as f64;
            let effective_angle = angle + twist;
            let r = base_radius + radial_wave(angle, z, shape);
            Point2::new(
                center.x + r * effective_angle.cos(),
                center.y + r * effective_angle.sin(),
            )
        })
        .collect();

    Ok(Layer::close(z, base_radius, ring)?)
}

/// Generates the full stack of layers for a shape
#[derive(Debug, Clone)]
pub struct LayerGenerator<'a> {
    shape: &'a ShapeParameters,
    center: Point2,
    num_points: usize,
}

impl<'a> LayerGenerator<'a> {
    pub fn new(shape: &'a ShapeParameters, center: Point2, num_points: usize) -> Self {
        Self {
            shape,
            center,
            num_points,
        }
    }

    /// Cross-section at a single height
    pub fn layer_at(&self, z: f64) -> LampshadeResult<Layer> {
        build_layer(z, self.shape, self.center, self.num_points)
    }

    /// All layers from `layer_height` to the top, bottom first.
    ///
    /// Layers are computed in parallel; the indexed collect keeps them in
    /// height order.
    pub fn generate(&self, layer_height: f64) -> LampshadeResult<Vec<Layer>> {
        let heights = layer_heights(self.shape.total_height, layer_height)?;

        let layers = heights
            .par_iter()
            .map(|&z| self.layer_at(z))
            .collect::<LampshadeResult<Vec<Layer>>>()?;

        debug!(
            "Generated {} layers of {} points ({} profile)",
            layers.len(),
            self.num_points,
            self.shape.profile
        );
        Ok(layers)
    }
}

/// Build every layer of `shape` at `layer_height`, bottom first.
pub fn build_layers(
    shape: &ShapeParameters,
    center: Point2,
    num_points: usize,
    layer_height: f64,
) -> LampshadeResult<Vec<Layer>> {
    LayerGenerator::new(shape, center, num_points).generate(layer_height)
}
