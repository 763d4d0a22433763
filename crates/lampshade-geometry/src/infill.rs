//! Scanline infill
//!
//! Sweeps horizontal scanlines over a shrunken copy of a perimeter and joins
//! the interior spans into a single serpentine path.

use crate::scanline::{even_odd_segments, x_intersections, Segment};
use lampshade_core::error::ensure_positive;
use lampshade_core::{ConfigurationError, GeometryDefect, LampshadeResult, Point2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Axis-aligned bounds of a point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Bounds of `points`, or `None` when empty.
pub fn bounding_box(points: &[Point2]) -> Option<BoundingBox> {
    let first = *points.first()?;
    let bbox = points.iter().fold(
        BoundingBox {
            min: first,
            max: first,
        },
        |mut b, p| {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
            b
        },
    );
    Some(bbox)
}

fn distinct_vertices(polygon: &[Point2]) -> &[Point2] {
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        &polygon[..polygon.len() - 1]
    } else {
        polygon
    }
}

/// Mean of the distinct vertices.
pub fn centroid(polygon: &[Point2]) -> Option<Point2> {
    let vertices = distinct_vertices(polygon);
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2::new(sx / n, sy / n))
}

/// Scale a polygon about its vertex centroid. The result is closed.
pub fn scale_polygon(polygon: &[Point2], scale: f64) -> Result<Vec<Point2>, GeometryDefect> {
    let vertices = distinct_vertices(polygon);
    if vertices.len() < 3 {
        return Err(GeometryDefect::DegeneratePolygon {
            points: vertices.len(),
        });
    }
    let c = centroid(vertices).ok_or(GeometryDefect::DegeneratePolygon { points: 0 })?;

    let mut scaled: Vec<Point2> = vertices
        .iter()
        .map(|p| Point2::new(c.x + scale * (p.x - c.x), c.y + scale * (p.y - c.y)))
        .collect();
    scaled.push(scaled[0]);
    Ok(scaled)
}

/// Infill sweep parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanlineFill {
    /// Distance between scanlines (mm)
    pub spacing: f64,
    /// Shrink factor applied to the perimeter before sweeping
    pub offset_scale: f64,
    /// Spans shorter than this are dropped (mm)
    pub min_segment_length: f64,
}

impl Default for ScanlineFill {
    fn default() -> Self {
        Self {
            spacing: 0.48,
            offset_scale: 0.9,
            min_segment_length: 1e-3,
        }
    }
}

/// Result of a scanline sweep
#[derive(Debug, Clone, PartialEq)]
pub struct ScanlineSweep {
    /// The shrunken perimeter that was swept
    pub offset_polygon: Vec<Point2>,
    /// Height of every scanline, bottom to top
    pub scan_ys: Vec<f64>,
    /// Interior spans per scanline
    pub rows: Vec<Vec<Segment>>,
}

impl ScanlineSweep {
    /// Total number of spans
    pub fn segment_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Join rows into one serpentine path.
    pub fn serpentine(&self) -> Vec<Point2> {
        serpentine_path(&self.rows)
    }
}

impl ScanlineFill {
    pub fn new(spacing: f64, offset_scale: f64, min_segment_length: f64) -> Self {
        Self {
            spacing,
            offset_scale,
            min_segment_length,
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive("spacing", self.spacing)?;
        ensure_positive("offset_scale", self.offset_scale)?;
        if !self.min_segment_length.is_finite() || self.min_segment_length < 0.0 {
            return Err(ConfigurationError::InvalidValue {
                name: "min_segment_length".to_string(),
                reason: "must be a non-negative finite value".to_string(),
            });
        }
        Ok(())
    }

    /// Sweep scanlines upward from `ymin + spacing/2`, stopping once past
    /// `ymax - spacing/4` of the shrunken polygon.
    pub fn sweep(&self, perimeter: &[Point2]) -> LampshadeResult<ScanlineSweep> {
        self.validate()?;

        let offset_polygon = scale_polygon(perimeter, self.offset_scale)?;
        let bbox = bounding_box(&offset_polygon).ok_or(GeometryDefect::DegeneratePolygon {
            points: offset_polygon.len(),
        })?;

        let mut scan_ys = Vec::new();
        let mut rows = Vec::new();

        let mut i = 0usize;
        loop {
            // Index-based stepping avoids drift from repeated addition
            let y = bbox.min.y + (i as f64 + 0.5) * self.spacing;
            if y > bbox.max.y - 0.25 * self.spacing {
                break;
            }

            let xs = x_intersections(&offset_polygon, y);
            let row: Vec<Segment> = even_odd_segments(&xs, y)?
                .into_iter()
                .filter(|s| s.length() >= self.min_segment_length)
                .collect();

            rows.push(row);
            scan_ys.push(y);
            i += 1;
        }

        debug!(
            "Swept {} scanlines at {:.3}mm spacing",
            scan_ys.len(),
            self.spacing
        );

        Ok(ScanlineSweep {
            offset_polygon,
            scan_ys,
            rows,
        })
    }
}

/// Join rows of spans boustrophedon-style: even rows left to right, odd
/// rows right to left. A joint shared by two rows is emitted once.
pub fn serpentine_path(rows: &[Vec<Segment>]) -> Vec<Point2> {
    let mut path: Vec<Point2> = Vec::new();

    for (row_idx, row) in rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }

        let mut sorted = row.clone();
        sorted.sort_by(|a, b| a.min_x().total_cmp(&b.min_x()));

        let mut row_points = Vec::with_capacity(sorted.len() * 2);
        if row_idx % 2 == 0 {
            for s in &sorted {
                let (a, b) = (s.start, s.end);
                row_points.extend(if a.x <= b.x { [a, b] } else { [b, a] });
            }
        } else {
            for s in sorted.iter().rev() {
                let (a, b) = (s.start, s.end);
                row_points.extend(if a.x >= b.x { [a, b] } else { [b, a] });
            }
        }

        let mut points = row_points.into_iter();
        if let Some(prev) = path.last().copied() {
            if let Some(next) = points.next() {
                if !prev.approx_eq(&next, 1e-6) {
                    path.push(next);
                }
            }
        }
        path.extend(points);
    }

    path
}
