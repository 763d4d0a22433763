//! Lampshade Settings Crate
//!
//! Loads, saves and validates run configuration.

pub mod config;
pub mod error;

pub use config::{
    Config, OutputSettings, MAX_LAYER_HEIGHT, MIN_POINTS_PER_LAYER, MIN_STABLE_RADIUS,
};
pub use error::{Result, SettingsError};
