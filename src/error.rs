//! Error type shared by every generator in the crate.

use thiserror::Error;

/// Caller-contract violations detected before any geometry is produced.
///
/// Degenerate-but-valid geometric cases (normalizing a zero vector, a camera
/// looking straight up) are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("height field resolution must be at least 2, got {0}")]
    InvalidResolution(usize),
    #[error("fractal noise needs at least one octave")]
    InvalidOctaves,
    #[error("fractal noise supports at most {max} octaves, got {0}", max = crate::noise::MAX_OCTAVES)]
    TooManyOctaves(u32),
    #[error("invalid noise parameter: {0}")]
    InvalidNoiseParameter(String),
    #[error("invalid perspective projection: {0}")]
    InvalidProjection(String),
    #[error("invalid tessellation: {0}")]
    InvalidTessellation(String),
    #[error("invalid placement grid: {0}")]
    InvalidGrid(String),
    #[error("invalid size: {0}")]
    InvalidSize(String),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Rejects sizes that are zero, negative, NaN or infinite.
pub(crate) fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidSize(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("size", 1.0).is_ok());
        assert!(ensure_positive("size", 0.0).is_err());
        assert!(ensure_positive("size", -3.0).is_err());
        assert!(ensure_positive("size", f32::NAN).is_err());
        assert!(ensure_positive("size", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = GeometryError::IndexOutOfRange {
            index: 7,
            vertex_count: 4,
        };
        assert_eq!(err.to_string(), "index 7 out of range for 4 vertices");
        assert_eq!(
            GeometryError::InvalidResolution(1).to_string(),
            "height field resolution must be at least 2, got 1"
        );
        assert_eq!(
            GeometryError::TooManyOctaves(40).to_string(),
            "fractal noise supports at most 32 octaves, got 40"
        );
    }
}
