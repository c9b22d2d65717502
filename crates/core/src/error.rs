//! Error types for plexus.
//!
//! Simulation itself never fails: advancing, resizing and drawing a field are
//! infallible. Errors only arise while building configuration, styles and
//! scenes from user input, or while writing output.

use thiserror::Error;

/// Errors produced while configuring or rendering a particle field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero (or their product overflowed) where a
    /// concrete pixel buffer or scene is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A configuration value is outside its accepted range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No preset with this name exists.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// No theme with this name exists.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// No boundary policy with this name exists.
    #[error("unknown boundary policy: {0}")]
    UnknownBoundary(String),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(String),
}
