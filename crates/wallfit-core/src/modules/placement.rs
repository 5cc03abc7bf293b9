//! Placement classification from image and screen geometry.
//!
//! Compares the per-axis scale factors a screen would impose on an image and
//! picks the placement mode that avoids heavy upscaling and excessive
//! cropping. All arithmetic is exact rational; thresholds fire only on strict
//! inequality.

use crate::domain::{Dimensions, EdgeMatchFlags, PlacementMode, Ratio};

/// Thresholds for the placement decision chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Largest acceptable upscale before the image is shown at native size
    /// (`Center`) instead of scaled.
    pub max_scale_factor: Ratio,
    /// Upscale beyond which the candidate is rejected outright (`Skip`).
    pub skip_scale_factor: Ratio,
    /// Largest acceptable fraction of the image pushed offscreen by `Fill`
    /// cropping before falling back to `Fit`.
    pub max_fraction_offscreen: Ratio,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_scale_factor: Ratio::new(6, 5),
            skip_scale_factor: Ratio::new(3, 1),
            max_fraction_offscreen: Ratio::new(1, 10),
        }
    }
}

/// Scale factors and the mode they lead to.
///
/// All intermediate factors are exposed so callers can trace how the mode was
/// reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementAnalysis {
    /// `screen_width / image_width`.
    pub width_scale: Ratio,
    /// `screen_height / image_height`.
    pub height_scale: Ratio,
    /// Scale applied by `Fit`: the smaller axis factor.
    pub fit_scale: Ratio,
    /// Scale applied by `Fill`: the larger axis factor.
    pub fill_scale: Ratio,
    /// Fraction of the image cropped away by `Fill` on its overflowing axis.
    pub fill_fraction_offscreen: Ratio,
    pub mode: PlacementMode,
    pub flags: EdgeMatchFlags,
}

impl PlacementAnalysis {
    /// Classifies `image` against `screen`.
    ///
    /// The decision chain, evaluated in order with strict comparisons:
    ///
    /// 1. `fit_scale > skip_scale_factor`: `Skip`
    /// 2. `fit_scale > max_scale_factor`: `Center`
    /// 3. `fill_scale > max_scale_factor` or
    ///    `fill_fraction_offscreen > max_fraction_offscreen`: `Fit`
    /// 4. otherwise `Fill`
    #[must_use]
    pub fn analyze(image: Dimensions, screen: Dimensions, config: &PlacementConfig) -> Self {
        let width_scale = axis_scale(screen.width(), image.width());
        let height_scale = axis_scale(screen.height(), image.height());
        let fit_scale = width_scale.min(height_scale);
        let fill_scale = width_scale.max(height_scale);
        let fill_fraction_offscreen = fill_fraction_offscreen(image, screen);

        let mode = if fit_scale > config.skip_scale_factor {
            PlacementMode::Skip
        } else if fit_scale > config.max_scale_factor {
            PlacementMode::Center
        } else if fill_scale > config.max_scale_factor
            || fill_fraction_offscreen > config.max_fraction_offscreen
        {
            PlacementMode::Fit
        } else {
            PlacementMode::Fill
        };

        let flags = match mode {
            PlacementMode::Center => EdgeMatchFlags::new(true, true),
            // Fit binds one axis exactly; the other leaves background bands.
            PlacementMode::Fit => {
                EdgeMatchFlags::new(width_scale > height_scale, height_scale > width_scale)
            }
            _ => EdgeMatchFlags::NONE,
        };

        Self {
            width_scale,
            height_scale,
            fit_scale,
            fill_scale,
            fill_fraction_offscreen,
            mode,
            flags,
        }
    }
}

fn axis_scale(screen: u32, image: u32) -> Ratio {
    // Dimensions are validated nonzero at construction.
    Ratio::new(u64::from(screen), u64::from(image))
}

/// `1 - min(ws / hs, hs / ws)` where `ws` and `hs` are the axis scales.
///
/// Computed from the raw dimensions so the cross products stay within `u64`:
/// `ws / hs = (screen_w * image_h) / (image_w * screen_h)`.
fn fill_fraction_offscreen(image: Dimensions, screen: Dimensions) -> Ratio {
    let num = u64::from(screen.width()) * u64::from(image.height());
    let den = u64::from(image.width()) * u64::from(screen.height());
    let across = Ratio::new(num, den);
    let inverse = Ratio::new(den, num);
    across.min(inverse).complement()
}
