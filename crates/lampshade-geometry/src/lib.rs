//! # Lampshade Geometry
//!
//! Analytic geometry stages of the lampshade generator:
//! - Profile engine: normalized height to radius for each profile family
//! - Printability validation: overhang angle checks
//! - Twist and wave modulation
//! - Layer builder: closed cross-section polygons, generated in parallel
//! - Scanline engine and scanline infill

pub mod infill;
pub mod layer_builder;
pub mod modulation;
pub mod printability;
pub mod profile;
pub mod scanline;

pub use infill::{
    bounding_box, centroid, scale_polygon, serpentine_path, BoundingBox, ScanlineFill,
    ScanlineSweep,
};
pub use layer_builder::{build_layer, build_layers, LayerGenerator};
pub use modulation::{radial_wave, twist_angle};
pub use printability::{
    check_shape, max_overhang, overhang_angle, validate_printability, OverhangExtreme,
    PrintabilityVerdict,
};
pub use profile::{
    layer_heights, normalized_height, radius_at, radius_at_height, sample_profile, ProfileSample,
};
pub use scanline::{
    contains, even_odd_segments, scan_tolerance, x_intersections, x_intersections_with_tolerance,
    Segment,
};
