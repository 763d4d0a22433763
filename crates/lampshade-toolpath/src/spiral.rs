//! Spiral toolpath builder
//!
//! Stitches closed layers into one ascending helix. Within a layer of `n`
//! points the height rises by `layer_height / n` per point, so one lap
//! climbs exactly one layer and there is no seam.

use lampshade_core::error::ensure_positive;
use lampshade_core::{GeometryDefect, Layer, LampshadeResult, Point3, SpiralPath};
use tracing::debug;

/// Build the spiral from layers ordered bottom to top.
///
/// Every layer must carry the same number of points. The closing duplicate
/// of each layer is dropped so the seam has no zero-length move.
pub fn build_spiral(layers: &[Layer], layer_height: f64) -> LampshadeResult<SpiralPath> {
    ensure_positive("layer_height", layer_height)?;

    let expected = layers
        .first()
        .map(|layer| layer.ring().len())
        .ok_or(GeometryDefect::EmptyToolpath)?;
    let z_increment = z_increment_per_point(layer_height, expected);

    let mut points = Vec::with_capacity(layers.len() * expected);
    for (index, layer) in layers.iter().enumerate() {
        let ring = layer.ring();
        if ring.len() != expected {
            return Err(GeometryDefect::MismatchedLayerSize {
                layer: index,
                got: ring.len(),
                expected,
            }
            .into());
        }

        points.extend(
            ring.iter()
                .enumerate()
                .map(|(j, p)| p.with_z(layer.z() + j as f64 * z_increment)),
        );
    }

    let path = SpiralPath::new(points)?;
    debug!(
        "Spiral toolpath: {} points, z {:.3}..{:.3}",
        path.len(),
        path.z_range().0,
        path.z_range().1
    );
    Ok(path)
}

/// Z rise between consecutive points of a layer
pub fn z_increment_per_point(layer_height: f64, num_points: usize) -> f64 {
    layer_height / num_points as f64
}

/// True when no two consecutive points share the same XY position.
pub fn has_no_repeated_xy(points: &[Point3]) -> bool {
    points
        .windows(2)
        .all(|w| !w[0].xy().approx_eq(&w[1].xy(), 1e-12))
}
