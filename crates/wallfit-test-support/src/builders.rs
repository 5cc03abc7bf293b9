//! Synthetic pixel buffer builders for testing.

use wallfit_core::{CandidateImage, Dimensions, PixelBuffer, Rgb};

/// Builder for creating synthetic pixel buffers.
///
/// Provides convenience methods for generating buffers with specific edge
/// and interior colors in the BGR(A) layouts the engine consumes.
///
/// All builders panic when given a zero width or height; tests construct
/// valid geometry by definition.
pub struct SyntheticBufferBuilder;

impl SyntheticBufferBuilder {
    // === General Buffers ===

    /// Creates a packed 24-bit BGR buffer from a per-pixel color function.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Rgb) -> PixelBuffer {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let color = f(x, y);
                data.extend_from_slice(&[color.b, color.g, color.r]);
            }
        }
        build(data, width, height, width as usize * 3, 24)
    }

    /// Creates a packed 32-bit BGRA buffer (alpha 255) from a per-pixel
    /// color function.
    #[must_use]
    pub fn from_fn_bgra(width: u32, height: u32, f: impl Fn(u32, u32) -> Rgb) -> PixelBuffer {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let color = f(x, y);
                data.extend_from_slice(&[color.b, color.g, color.r, 255]);
            }
        }
        build(data, width, height, width as usize * 4, 32)
    }

    /// Creates a 24-bit BGR buffer with `padding` unused bytes after each
    /// row, exercising stride handling.
    #[must_use]
    pub fn with_row_padding(
        width: u32,
        height: u32,
        padding: usize,
        f: impl Fn(u32, u32) -> Rgb,
    ) -> PixelBuffer {
        let stride = width as usize * 3 + padding;
        let mut data = Vec::with_capacity(stride * height as usize);
        for y in 0..height {
            for x in 0..width {
                let color = f(x, y);
                data.extend_from_slice(&[color.b, color.g, color.r]);
            }
            data.resize(data.len() + padding, 0);
        }
        build(data, width, height, stride, 24)
    }

    // === Edge Color Scenarios ===

    /// Creates a buffer filled with a single color.
    #[must_use]
    pub fn solid(width: u32, height: u32, color: Rgb) -> PixelBuffer {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Creates a buffer whose left and right `depth` columns are `frame`
    /// and whose interior is `center`.
    #[must_use]
    pub fn side_framed(width: u32, height: u32, depth: u32, frame: Rgb, center: Rgb) -> PixelBuffer {
        Self::from_fn(width, height, |x, _| {
            if x < depth || x >= width - depth {
                frame
            } else {
                center
            }
        })
    }

    /// Creates a buffer whose top and bottom `depth` rows are `frame` and
    /// whose interior is `center`.
    #[must_use]
    pub fn band_framed(width: u32, height: u32, depth: u32, frame: Rgb, center: Rgb) -> PixelBuffer {
        Self::from_fn(width, height, |_, y| {
            if y < depth || y >= height - depth {
                frame
            } else {
                center
            }
        })
    }

    // === Candidates ===

    /// Wraps a sample buffer as a candidate claiming `width x height`
    /// original dimensions.
    #[must_use]
    pub fn candidate(
        path: impl Into<String>,
        width: u32,
        height: u32,
        sample: PixelBuffer,
    ) -> CandidateImage {
        let dimensions = dimensions(width, height);
        CandidateImage::new(path, dimensions, sample)
    }

    /// A solid-color candidate with a 16x16 sample.
    #[must_use]
    pub fn solid_candidate(
        path: impl Into<String>,
        width: u32,
        height: u32,
        color: Rgb,
    ) -> CandidateImage {
        Self::candidate(path, width, height, Self::solid(16, 16, color))
    }
}

#[allow(clippy::expect_used)]
fn build(data: Vec<u8>, width: u32, height: u32, stride: usize, bits: u8) -> PixelBuffer {
    PixelBuffer::new(data, width, height, stride, bits)
        .expect("synthetic buffer dimensions must be nonzero")
}

#[allow(clippy::expect_used)]
fn dimensions(width: u32, height: u32) -> Dimensions {
    Dimensions::new(width, height).expect("candidate dimensions must be nonzero")
}
