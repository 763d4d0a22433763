//! Scanline engine
//!
//! Horizontal-line/polygon intersection and even-odd pairing for simple
//! (non self-intersecting) polygons, convex or concave. Polygons may be
//! passed open or closed; the closing edge is implied either way.
//!
//! Tolerances are relative to the polygon's bounding-box extent, see
//! [`scan_tolerance`].

use lampshade_core::{GeometryDefect, Point2};
use serde::{Deserialize, Serialize};

/// Base relative tolerance for horizontal-edge detection.
const RELATIVE_EPSILON: f64 = 1e-9;

/// Tolerance scaled to the polygon: `1e-9 · max(1, extent)` where extent is
/// the larger bounding-box side.
///
/// Edges whose rise is within this tolerance are skipped as horizontal. A
/// scanline that falls strictly between the endpoint heights of such a
/// nearly-horizontal edge meets only one of its neighbours and yields an odd
/// count, which [`even_odd_segments`] reports. Callers sampling arbitrary
/// heights should keep scanlines off vertex heights by more than this band.
pub fn scan_tolerance(polygon: &[Point2]) -> f64 {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in polygon {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    let extent = (max.x - min.x).max(max.y - min.y);
    if extent.is_finite() {
        RELATIVE_EPSILON * extent.max(1.0)
    } else {
        RELATIVE_EPSILON
    }
}

/// Polygon edges including the closing edge, without a zero-length edge
/// when the input already repeats its first vertex.
fn edges(polygon: &[Point2]) -> impl Iterator<Item = (Point2, Point2)> + '_ {
    let closed = polygon.len() > 1 && polygon.first() == polygon.last();
    let vertices = if closed {
        &polygon[..polygon.len() - 1]
    } else {
        polygon
    };

    let n = vertices.len();
    let count = if n < 2 { 0 } else { n };
    (0..count).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// X coordinates where the horizontal line at `y` crosses the polygon, ascending.
pub fn x_intersections(polygon: &[Point2], y: f64) -> Vec<f64> {
    x_intersections_with_tolerance(polygon, y, scan_tolerance(polygon))
}

/// [`x_intersections`] with an explicit horizontal-edge tolerance.
///
/// Each edge covers the half-open interval `[ymin, ymax)`, so a scanline
/// through a shared vertex is counted on exactly one adjacent edge.
pub fn x_intersections_with_tolerance(polygon: &[Point2], y: f64, eps: f64) -> Vec<f64> {
    let mut xs: Vec<f64> = edges(polygon)
        .filter_map(|(p0, p1)| {
            if (p1.y - p0.y).abs() <= eps {
                return None;
            }

            let (ymin, ymax) = if p0.y < p1.y {
                (p0.y, p1.y)
            } else {
                (p1.y, p0.y)
            };
            if y < ymin || y >= ymax {
                return None;
            }

            let f = (y - p0.y) / (p1.y - p0.y);
            Some(p0.x + f * (p1.x - p0.x))
        })
        .collect();

    xs.sort_by(|a, b| a.total_cmp(b));
    xs
}

/// An interior span on one scanline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// The smaller X of the two endpoints
    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }
}

/// Pair sorted intersections into interior spans: `(xs[0], xs[1])`, `(xs[2], xs[3])`, ...
pub fn even_odd_segments(xs: &[f64], y: f64) -> Result<Vec<Segment>, GeometryDefect> {
    if xs.len() % 2 != 0 {
        return Err(GeometryDefect::OddIntersectionCount {
            count: xs.len(),
            y,
        });
    }

    Ok(xs
        .chunks_exact(2)
        .map(|pair| Segment::new(Point2::new(pair[0], y), Point2::new(pair[1], y)))
        .collect())
}

/// Even-odd interior test: a point is inside when a ray toward -X crosses
/// the boundary an odd number of times.
pub fn contains(polygon: &[Point2], point: Point2) -> bool {
    let crossings = x_intersections(polygon, point.y)
        .into_iter()
        .filter(|&x| x < point.x)
        .count();
    crossings % 2 == 1
}
