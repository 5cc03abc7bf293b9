//! The decision engine: classification, strip selection, and color
//! extraction behind one call.

use tracing::debug;

use crate::domain::{Decision, Dimensions, EngineError, Ratio, Trace};
use crate::modules::{edge_strips, ColorAnalysis, ColorConfig, PlacementAnalysis, PlacementConfig};
use crate::pixel::PixelBuffer;

/// Trace lines spent on the tie set before eliding the remainder.
const TIED_TRACE_LIMIT: usize = 8;

/// Combined engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecisionConfig {
    pub placement: PlacementConfig,
    pub color: ColorConfig,
}

impl DecisionConfig {
    /// Checks every threshold range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        let placement = &self.placement;
        if placement.max_scale_factor < Ratio::ONE {
            return Err(invalid(format!(
                "max_scale_factor must be at least 1, got {}",
                placement.max_scale_factor
            )));
        }
        if placement.skip_scale_factor < placement.max_scale_factor {
            return Err(invalid(format!(
                "skip_scale_factor must be at least max_scale_factor, got {} < {}",
                placement.skip_scale_factor, placement.max_scale_factor
            )));
        }
        if placement.max_fraction_offscreen > Ratio::ONE {
            return Err(invalid(format!(
                "max_fraction_offscreen must lie within [0, 1], got {}",
                placement.max_fraction_offscreen
            )));
        }

        let color = &self.color;
        if color.edge_fraction == Ratio::ZERO || color.edge_fraction > Ratio::ONE {
            return Err(invalid(format!(
                "edge_fraction must lie within (0, 1], got {}",
                color.edge_fraction
            )));
        }
        if !(1..=7).contains(&color.bucket_bits) {
            return Err(invalid(format!(
                "bucket_bits must lie within 1..=7, got {}",
                color.bucket_bits
            )));
        }
        if color.tied_color_margin > Ratio::ONE {
            return Err(invalid(format!(
                "tied_color_margin must lie within [0, 1], got {}",
                color.tied_color_margin
            )));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidConfig { reason }
}

/// Decides placement mode and edge background color for candidate images.
///
/// Construction validates the configuration; decisions themselves are
/// infallible and pure apart from trace timestamps.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a threshold is out of
    /// range.
    pub fn new(config: DecisionConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Decides a full-resolution buffer against `screen`.
    #[must_use]
    pub fn decide(&self, buffer: &PixelBuffer, screen: Dimensions) -> Decision {
        self.decide_sampled(buffer.size(), buffer, screen)
    }

    /// Decides an image against `screen`, classifying by the original
    /// `image` dimensions while sampling colors from the (usually
    /// downscaled) `sample` buffer.
    #[must_use]
    pub fn decide_sampled(
        &self,
        image: Dimensions,
        sample: &PixelBuffer,
        screen: Dimensions,
    ) -> Decision {
        let mut trace = Trace::new();
        trace.line(format_args!("image {image} screen {screen}"));

        let placement = PlacementAnalysis::analyze(image, screen, &self.config.placement);
        trace.line(format_args!(
            "width_scale={:.2} height_scale={:.2}",
            placement.width_scale.to_f64(),
            placement.height_scale.to_f64()
        ));
        trace.line(format_args!(
            "fit_scale={:.2} fill_scale={:.2} fill_fraction_offscreen={:.2}",
            placement.fit_scale.to_f64(),
            placement.fill_scale.to_f64(),
            placement.fill_fraction_offscreen.to_f64()
        ));
        trace.line(format_args!(
            "mode={} match_left_right={} match_top_bottom={}",
            placement.mode, placement.flags.match_left_right, placement.flags.match_top_bottom
        ));

        if !placement.flags.any() {
            debug!(mode = %placement.mode, "no edges to match, skipping color sampling");
            return Decision {
                mode: placement.mode,
                background: None,
                trace: trace.into_lines(),
            };
        }

        let strips = edge_strips(sample.size(), placement.flags, self.config.color.edge_fraction);
        trace.line(format_args!("strips {} and {}", strips.0, strips.1));

        let background = match ColorAnalysis::analyze(sample, strips, &self.config.color) {
            None => {
                trace.line("no pixels sampled");
                None
            }
            Some(analysis) => {
                trace.line(format_args!(
                    "sampled {} pixels, max_frequency={} min_frequency_ok={}",
                    analysis.sample_count, analysis.max_frequency, analysis.min_frequency_ok
                ));
                trace.line(format_args!("tied buckets: {}", analysis.tied.len()));
                for bucket in analysis.tied.iter().take(TIED_TRACE_LIMIT) {
                    trace.line(format_args!(
                        "{} s={:.2} v={:.2} l={:.2} n={}",
                        bucket.color, bucket.saturation, bucket.lightness, bucket.l, bucket.count
                    ));
                }
                if analysis.tied.len() > TIED_TRACE_LIMIT {
                    trace.line(format_args!(
                        "... and {} more",
                        analysis.tied.len() - TIED_TRACE_LIMIT
                    ));
                }
                trace.line(format_args!(
                    "background {} (coarse {})",
                    analysis.color, analysis.coarse
                ));
                Some(analysis.color)
            }
        };

        debug!(mode = %placement.mode, background = ?background, "decision complete");
        Decision {
            mode: placement.mode,
            background,
            trace: trace.into_lines(),
        }
    }
}
