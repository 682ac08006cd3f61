//! Error types for gauge construction and updates.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving a gauge.
#[derive(Error, Debug)]
pub enum Error {
    /// The gauge configuration is invalid. Construction is aborted.
    #[error("invalid configuration for '{field}': {message}")]
    Configuration {
        /// Offending configuration field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// A value outside the gauge domain was rejected. Prior state is kept.
    #[error("value {value} outside range [{min}, {max}]")]
    Range {
        /// Rejected value.
        value: f64,
        /// Lower bound of the domain.
        min: f64,
        /// Upper bound of the domain.
        max: f64,
    },

    /// A value source was set from inside one of its own change notifications.
    #[error("value source updated while a change notification was in flight")]
    ReentrantUpdate,

    /// Invalid dimensions for a bitmap.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Font data could not be parsed.
    #[error("invalid font data: {0}")]
    Font(String),

    /// Configuration file could not be parsed.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where parsing failed (1-indexed, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] error.
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration { field, message: message.into() }
    }

    /// Whether the error leaves the gauge usable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Range { .. } | Self::ReentrantUpdate)
    }
}
