//! Error types for the ray-casting core.

use thiserror::Error;

/// Geometry that cannot be represented.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Boundary length is zero, negative or not finite.
    #[error("boundary length must be positive and finite, got {0}")]
    InvalidLength(f64),

    /// A coordinate or angle is NaN or infinite.
    #[error("non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Bounding rectangle has a non-positive side.
    #[error("bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
}

/// Observer configuration that was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Field of view outside the open interval (0, 360).
    #[error("field of view must be inside (0, 360) degrees, got {0}")]
    FieldOfView(f64),

    /// Ray count below one.
    #[error("ray count must be at least 1, got {0}")]
    RayCount(usize),

    /// Movement speed below one unit or turn speed not positive.
    #[error("{what} out of range: {value}")]
    Speed { what: &'static str, value: f64 },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for configuration changes.
pub type Result<T> = std::result::Result<T, ConfigError>;
