//! Error types for the settings crate.

use lampshade_core::ConfigurationError;
use std::io;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A setting violates a configuration rule.
    #[error("Config error: {0}")]
    Config(#[from] ConfigurationError),

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// No platform configuration directory could be determined.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
