//! Candidate source port for supplying images from various origins.

use crate::domain::Dimensions;
use crate::pixel::PixelBuffer;

/// A decoded candidate ready for a decision.
///
/// `dimensions` are the original image's and drive placement classification;
/// `sample` is the buffer colors are read from and may be a downscaled
/// rendition of the image.
#[derive(Debug, Clone)]
pub struct CandidateImage {
    /// Path or label identifying the candidate.
    pub path: String,
    /// Original image dimensions.
    pub dimensions: Dimensions,
    /// Pixel data to sample colors from.
    pub sample: PixelBuffer,
}

impl CandidateImage {
    #[must_use]
    pub fn new(path: impl Into<String>, dimensions: Dimensions, sample: PixelBuffer) -> Self {
        Self {
            path: path.into(),
            dimensions,
            sample,
        }
    }
}

/// Port for supplying candidate images.
pub trait CandidateSource: Send + Sync {
    /// Returns an iterator over candidates from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a candidate fails to decode.
    fn candidates(&self) -> Box<dyn Iterator<Item = anyhow::Result<CandidateImage>> + Send + '_>;

    /// Returns the total number of candidates, if known.
    fn count_hint(&self) -> Option<usize>;
}
