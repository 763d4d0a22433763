//! Continuous spiral toolpath

use crate::error::GeometryDefect;
use crate::geometry::Point3;
use serde::{Deserialize, Serialize};

/// An ascending helix of toolpath points.
///
/// Z never decreases along the sequence; [`SpiralPath::new`] refuses any
/// sequence that breaks this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpiralPathRecord")]
pub struct SpiralPath {
    points: Vec<Point3>,
}

#[derive(Deserialize)]
struct SpiralPathRecord {
    points: Vec<Point3>,
}

impl TryFrom<SpiralPathRecord> for SpiralPath {
    type Error = GeometryDefect;

    fn try_from(record: SpiralPathRecord) -> Result<Self, Self::Error> {
        Self::new(record.points)
    }
}

impl SpiralPath {
    /// Wrap a point sequence after checking Z monotonicity.
    pub fn new(points: Vec<Point3>) -> Result<Self, GeometryDefect> {
        if points.is_empty() {
            return Err(GeometryDefect::EmptyToolpath);
        }
        if let Some(index) = first_z_decrease(&points) {
            return Err(GeometryDefect::NonMonotonicZ {
                index,
                z: points[index].z,
                previous: points[index - 1].z,
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Lowest and highest Z
    pub fn z_range(&self) -> (f64, f64) {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first.z, last.z),
            _ => (0.0, 0.0),
        }
    }

    /// Sum of 3D segment lengths
    pub fn path_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

/// Index of the first point whose Z is below its predecessor.
pub fn first_z_decrease(points: &[Point3]) -> Option<usize> {
    points
        .windows(2)
        .position(|w| w[1].z < w[0].z)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_decreasing_z() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.2),
            Point3::new(1.0, 0.0, 0.3),
            Point3::new(1.0, 1.0, 0.25),
        ];
        assert_eq!(
            SpiralPath::new(points),
            Err(GeometryDefect::NonMonotonicZ {
                index: 2,
                z: 0.25,
                previous: 0.3
            })
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SpiralPath::new(Vec::new()), Err(GeometryDefect::EmptyToolpath));
    }

    #[test]
    fn test_z_range_and_length() {
        let path = SpiralPath::new(vec![
            Point3::new(0.0, 0.0, 0.2),
            Point3::new(3.0, 4.0, 0.2),
            Point3::new(3.0, 4.0, 0.4),
        ])
        .unwrap();
        assert_eq!(path.z_range(), (0.2, 0.4));
        assert_relative_eq!(path.path_length(), 5.2, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialize_checks_monotonic_z() {
        let rising = r#"{"points":[{"x":0.0,"y":0.0,"z":0.2},{"x":1.0,"y":0.0,"z":0.3}]}"#;
        assert_eq!(serde_json::from_str::<SpiralPath>(rising).unwrap().len(), 2);

        let falling = r#"{"points":[{"x":0.0,"y":0.0,"z":0.3},{"x":1.0,"y":0.0,"z":0.2}]}"#;
        assert!(serde_json::from_str::<SpiralPath>(falling).is_err());
        assert!(serde_json::from_str::<SpiralPath>(r#"{"points":[]}"#).is_err());
    }
}
