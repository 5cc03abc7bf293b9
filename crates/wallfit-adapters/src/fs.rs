//! Filesystem discovery and decoding of wallpaper candidates.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use wallfit_core::{CandidateImage, CandidateSource, Dimensions, PixelBuffer};

/// Raster formats the decoder accepts.
const RASTER_EXTENSIONS: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "tif", "tiff", "webp"];

/// Candidate source that walks the filesystem.
///
/// Enumeration resolves paths up front; decoding happens lazily as the
/// iterator advances, so a corrupt file surfaces as a per-item error rather
/// than aborting the run.
pub struct FsCandidateSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    sample_size: u32,
}

impl FsCandidateSource {
    /// Creates a source over the given files and directories.
    ///
    /// `sample_size` bounds the longest side of each decoded sample buffer;
    /// zero keeps full resolution.
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool, sample_size: u32) -> Self {
        Self {
            paths,
            recursive,
            sample_size,
        }
    }
}

impl CandidateSource for FsCandidateSource {
    fn candidates(&self) -> Box<dyn Iterator<Item = Result<CandidateImage>> + Send + '_> {
        let files = collect_image_files(&self.paths, self.recursive);
        debug!("collected {} candidate files", files.len());
        let sample_size = self.sample_size;
        Box::new(
            files
                .into_iter()
                .map(move |path| decode_candidate(&path, sample_size)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(collect_image_files(&self.paths, self.recursive).len())
    }
}

/// Collects decodable image files from the given files and directories.
///
/// Unsupported files and unreadable paths are logged and skipped.
/// Directories are walked one level deep unless `recursive` is set. The
/// result is sorted so output order does not depend on directory iteration
/// order.
#[must_use]
pub fn collect_image_files(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                files.push(path.clone());
            } else {
                warn!("unsupported file type: {}", path.display());
            }
        } else if path.is_dir() {
            collect_from_dir(path, recursive, &mut files);
        } else {
            warn!("path does not exist: {}", path.display());
        }
    }
    files.sort();
    files
}

fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() && is_supported_image(&path) {
                    files.push(path);
                } else if path.is_dir() && recursive {
                    collect_from_dir(&path, recursive, files);
                }
            }
        }
        Err(e) => warn!("failed to read directory {}: {e}", dir.display()),
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RASTER_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Decodes a candidate image and prepares its sample buffer.
///
/// The recorded dimensions are always the full image's; the sample buffer
/// is downscaled (aspect preserved, never upscaled) so its longest side is
/// at most `sample_size`, with zero keeping full resolution. Animated
/// formats decode as their first frame.
///
/// # Errors
///
/// Fails if the file cannot be opened or decoded, or if the decoded image
/// has a zero dimension.
pub fn decode_candidate(path: &Path, sample_size: u32) -> Result<CandidateImage> {
    let image =
        image::open(path).with_context(|| format!("failed to open image: {}", path.display()))?;
    let (width, height) = image.dimensions();
    let dimensions = Dimensions::new(width, height)
        .with_context(|| format!("invalid image dimensions: {}", path.display()))?;

    let image = if sample_size > 0 && width.max(height) > sample_size {
        image.thumbnail(sample_size, sample_size)
    } else {
        image
    };
    let sample = bgr_buffer(&image)?;
    debug!(
        "decoded {} ({}, sampled at {})",
        path.display(),
        dimensions,
        sample.size()
    );

    Ok(CandidateImage::new(
        path.to_string_lossy(),
        dimensions,
        sample,
    ))
}

/// Repacks a decoded image into the packed BGR row layout the engine reads.
fn bgr_buffer(image: &DynamicImage) -> Result<PixelBuffer> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut data = Vec::with_capacity(rgb.as_raw().len());
    for pixel in rgb.as_raw().chunks_exact(3) {
        data.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
    }
    PixelBuffer::new(data, width, height, width as usize * 3, 24)
        .context("failed to wrap decoded pixels")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_case_insensitive() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("b.JPG")));
        assert!(is_supported_image(Path::new("c.WebP")));
        assert!(!is_supported_image(Path::new("d.txt")));
        assert!(!is_supported_image(Path::new("noext")));
    }
}
