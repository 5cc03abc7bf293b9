//! Error types for buffer construction and configuration.

use thiserror::Error;

/// Errors reported by buffer constructors, ratio parsing, and configuration
/// validation. Decision making itself is infallible once an engine exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("unsupported pixel format: {bits_per_pixel} bits per pixel (expected 24 or 32)")]
    UnsupportedPixelFormat { bits_per_pixel: u8 },

    #[error("invalid dimensions: {width}x{height} (both sides must be positive)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid stride: {stride} bytes is below the packed row size of {minimum}")]
    InvalidStride { stride: usize, minimum: usize },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("invalid ratio: {input:?}")]
    InvalidRatio { input: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_values() {
        let err = EngineError::UnsupportedPixelFormat { bits_per_pixel: 16 };
        assert!(err.to_string().contains("16 bits"));

        let err = EngineError::InvalidStride {
            stride: 10,
            minimum: 30,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("30"));

        let err = EngineError::InvalidRatio {
            input: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));
    }
}
