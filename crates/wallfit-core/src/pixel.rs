//! Owned copy of raw BGR(A) pixel rows.
//!
//! Screenshots and decoded bitmaps arrive as byte rows in blue-green-red
//! channel order, optionally with an alpha byte and row padding. The buffer
//! takes ownership of the bytes and validates the layout once at
//! construction; reads then index directly and reverse the channel order.

use crate::domain::{Dimensions, EngineError, Rgb};

/// An owned pixel buffer in BGR (24-bit) or BGRA (32-bit) row layout.
///
/// `stride` is the byte distance between row starts and may exceed the packed
/// row width when rows are padded. Alpha bytes are ignored.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    data: Vec<u8>,
    size: Dimensions,
    stride: usize,
    bytes_per_pixel: usize,
}

impl PixelBuffer {
    /// Wraps `data` as `width x height` pixels of `bits_per_pixel` color
    /// depth with `stride` bytes per row.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnsupportedPixelFormat`] unless `bits_per_pixel` is
    ///   24 or 32.
    /// - [`EngineError::InvalidDimensions`] if either side is zero.
    /// - [`EngineError::InvalidStride`] if `stride` is below the packed row
    ///   size.
    /// - [`EngineError::BufferSizeMismatch`] unless `data` is exactly
    ///   `stride * height` bytes.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        bits_per_pixel: u8,
    ) -> Result<Self, EngineError> {
        let bytes_per_pixel = match bits_per_pixel {
            24 => 3,
            32 => 4,
            _ => return Err(EngineError::UnsupportedPixelFormat { bits_per_pixel }),
        };
        let size = Dimensions::new(width, height)?;

        let minimum = width as usize * bytes_per_pixel;
        if stride < minimum {
            return Err(EngineError::InvalidStride { stride, minimum });
        }

        let expected = stride * height as usize;
        if data.len() != expected {
            return Err(EngineError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            size,
            stride,
            bytes_per_pixel,
        })
    }

    #[must_use]
    pub const fn size(&self) -> Dimensions {
        self.size
    }

    /// Reads the pixel at `(x, y)`, reversing the stored BGR order.
    ///
    /// Coordinates must lie within [`size`](Self::size); out-of-range access
    /// is a programming error.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.size.width() && y < self.size.height());
        let i = x as usize * self.bytes_per_pixel + y as usize * self.stride;
        Rgb::new(self.data[i + 2], self.data[i + 1], self.data[i])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_reverse_bgr_order() {
        // One pixel: B=10, G=20, R=30.
        let buffer = PixelBuffer::new(vec![10, 20, 30], 1, 1, 3, 24).unwrap();
        assert_eq!(buffer.get(0, 0), Rgb::new(30, 20, 10));
    }

    #[test]
    fn test_reads_32_bit_pixels() {
        // Two BGRA pixels; alpha must be ignored.
        let data = vec![1, 2, 3, 255, 4, 5, 6, 0];
        let buffer = PixelBuffer::new(data, 2, 1, 8, 32).unwrap();
        assert_eq!(buffer.get(0, 0), Rgb::new(3, 2, 1));
        assert_eq!(buffer.get(1, 0), Rgb::new(6, 5, 4));
    }

    #[test]
    fn test_stride_padding_is_skipped() {
        // 1x2 pixels with 2 bytes of row padding (stride 5).
        let data = vec![
            10, 20, 30, 0, 0, // row 0 + padding
            40, 50, 60, 0, 0, // row 1 + padding
        ];
        let buffer = PixelBuffer::new(data, 1, 2, 5, 24).unwrap();
        assert_eq!(buffer.get(0, 0), Rgb::new(30, 20, 10));
        assert_eq!(buffer.get(0, 1), Rgb::new(60, 50, 40));
    }

    #[test]
    fn test_rejects_unsupported_depth() {
        for bits in [1, 8, 16, 48] {
            let err = PixelBuffer::new(vec![0; 16], 2, 2, 4, bits).unwrap_err();
            assert_eq!(
                err,
                EngineError::UnsupportedPixelFormat {
                    bits_per_pixel: bits
                }
            );
        }
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = PixelBuffer::new(Vec::new(), 0, 4, 0, 24).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_rejects_short_stride() {
        let err = PixelBuffer::new(vec![0; 8], 2, 1, 4, 32).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidStride {
                stride: 4,
                minimum: 8
            }
        );
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let err = PixelBuffer::new(vec![0; 10], 2, 2, 6, 24).unwrap_err();
        assert_eq!(
            err,
            EngineError::BufferSizeMismatch {
                expected: 12,
                actual: 10
            }
        );
    }

    #[test]
    fn test_size_reports_dimensions() {
        let buffer = PixelBuffer::new(vec![0; 2 * 3 * 3], 2, 3, 6, 24).unwrap();
        assert_eq!(buffer.size(), Dimensions::new(2, 3).unwrap());
    }
}
