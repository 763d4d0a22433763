//! # Lampshade Core
//!
//! Core data model and error types shared by every stage of the lampshade
//! pipeline: shape and printer configuration, planar/spatial points, closed
//! layer polygons and the spiral toolpath.

pub mod error;
pub mod geometry;
pub mod layer;
pub mod material;
pub mod printer;
pub mod shape;
pub mod toolpath;

pub use error::{
    ConfigurationError, GeometryDefect, LampshadeError, LampshadeResult, PrintabilityViolation,
};
pub use geometry::{Point2, Point3};
pub use layer::Layer;
pub use material::FilamentMaterial;
pub use printer::{ExtrusionMode, PrintSettings, PrinterSpecs};
pub use shape::{ProfileKind, ShapeParameters, TwistKind};
pub use toolpath::SpiralPath;
