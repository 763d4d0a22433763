//! Closed cross-section polygons

use crate::error::GeometryDefect;
use crate::geometry::Point2;
use serde::{Deserialize, Serialize};

/// A closed cross-section at a fixed height.
///
/// The first point is repeated as the last point. A layer is immutable once
/// built; the closure invariant is established by [`Layer::close`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayerRecord")]
pub struct Layer {
    z: f64,
    radius: f64,
    points: Vec<Point2>,
}

/// Serialized form, checked before it becomes a [`Layer`]
#[derive(Deserialize)]
struct LayerRecord {
    z: f64,
    radius: f64,
    points: Vec<Point2>,
}

impl TryFrom<LayerRecord> for Layer {
    type Error = GeometryDefect;

    fn try_from(record: LayerRecord) -> Result<Self, Self::Error> {
        let LayerRecord { z, radius, mut points } = record;
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if first == last => {}
            _ => return Err(GeometryDefect::OpenPolygon),
        }
        points.pop();
        Self::close(z, radius, points)
    }
}

impl Layer {
    /// Close an open ring of distinct vertices by appending a copy of its first vertex.
    pub fn close(z: f64, radius: f64, ring: Vec<Point2>) -> Result<Self, GeometryDefect> {
        if ring.len() < 3 {
            return Err(GeometryDefect::DegeneratePolygon { points: ring.len() });
        }
        let first = ring[0];
        let mut points = ring;
        points.push(first);
        Ok(Self { z, radius, points })
    }

    /// Height of this layer (mm)
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Profile radius at this height, before wave texture (mm)
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Closed polygon, first point repeated at the end
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Distinct vertices, without the closing duplicate
    pub fn ring(&self) -> &[Point2] {
        &self.points[..self.points.len().saturating_sub(1)]
    }

    /// Number of points including the closing duplicate
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Perimeter length of the closed polygon
    pub fn perimeter(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}
