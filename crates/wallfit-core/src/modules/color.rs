//! Edge background color extraction.
//!
//! Finds the color to paint behind a letterboxed or centered wallpaper by
//! histogramming the image's edge strips in a quantized RGB space. Selection
//! runs in two stages: a coarse pass over `2^(3 * bucket_bits)` cells picks
//! the winning cell, then a refinement pass over the dropped low bits picks
//! the dominant exact shade inside it.
//!
//! Frequency alone does not decide the coarse winner. Every cell whose count
//! reaches `floor(max_frequency * tied_color_margin)` competes, and the
//! competition is ordered perceptually: darker, then less saturated. This
//! prefers a quiet dark border over a marginally more common bright one.
//! Cells whose perceptual keys tie exactly fall back to count, so among
//! equally vivid hues the dominant one wins.

use crate::domain::{Ratio, Region, Rgb};
use crate::pixel::PixelBuffer;

/// Configuration for edge sampling and color clustering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorConfig {
    /// Fraction of the sampled side devoted to the two edge strips combined.
    pub edge_fraction: Ratio,
    /// Quantization width per channel in bits, between 1 and 7. The coarse
    /// histogram has `2^(3 * bucket_bits)` cells.
    pub bucket_bits: u8,
    /// Fraction of the peak count a cell must reach to enter the tie set.
    pub tied_color_margin: Ratio,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            edge_fraction: Ratio::new(2, 5),
            bucket_bits: 4,
            tied_color_margin: Ratio::new(2, 25),
        }
    }
}

/// A color-cell frequency histogram.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Creates an empty histogram with `2^(3 * bits)` buckets.
    #[must_use]
    pub fn new(bits: u8) -> Self {
        Self {
            counts: vec![0; 1 << (3 * u32::from(bits))],
            total: 0,
        }
    }

    /// Counts one sample in `bucket`.
    ///
    /// # Panics
    ///
    /// Panics if `bucket` is out of range.
    pub fn record(&mut self, bucket: usize) {
        self.counts[bucket] += 1;
        self.total += 1;
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn buckets(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn count(&self, bucket: usize) -> u64 {
        self.counts[bucket]
    }

    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// The bucket holding the maximum count. Ties resolve to the lowest
    /// index.
    #[must_use]
    pub fn peak(&self) -> usize {
        let mut best = 0;
        for (bucket, &count) in self.counts.iter().enumerate() {
            if count > self.counts[best] {
                best = bucket;
            }
        }
        best
    }
}

/// One coarse cell in the tie set, with the perceptual keys it is ranked by.
#[derive(Debug, Clone, Copy)]
pub struct TiedBucket {
    /// Coarse histogram index.
    pub bucket: usize,
    /// The cell's base color (quantized channel values, low bits zero).
    pub color: Rgb,
    pub count: u64,
    pub saturation: f32,
    pub lightness: f32,
    /// Ranking measure `(2 - saturation) * lightness / 2`, which darkens
    /// saturated colors relative to plain lightness.
    pub l: f32,
}

impl TiedBucket {
    fn new(bucket: usize, count: u64, bits: u8) -> Self {
        let color = bucket_base(bucket, bits);
        let saturation = color.saturation();
        let lightness = color.lightness();
        Self {
            bucket,
            color,
            count,
            saturation,
            lightness,
            l: (2.0 - saturation) * lightness / 2.0,
        }
    }
}

/// The full result of clustering the edge strips of one buffer.
///
/// Intermediate quantities are exposed so callers can trace the selection.
#[derive(Debug, Clone)]
pub struct ColorAnalysis {
    /// Pixels sampled across both strips.
    pub sample_count: u64,
    /// Count in the most frequent coarse cell.
    pub max_frequency: u64,
    /// Cutoff a cell must reach to enter the tie set:
    /// `floor(max_frequency * tied_color_margin)`.
    pub min_frequency_ok: u64,
    /// The tie set ordered by rank, winner first.
    pub tied: Vec<TiedBucket>,
    /// Winning cell's base color before refinement.
    pub coarse: Rgb,
    /// Final color after low-bit refinement.
    pub color: Rgb,
}

impl ColorAnalysis {
    /// Clusters the pixels of `strips` and picks the background color.
    ///
    /// Returns `None` when the strips contain no pixels. A zero cutoff (from
    /// a small peak count times the margin) deliberately admits every cell
    /// into the tie set, including unsampled ones; the rank order may then
    /// pick a cell no pixel fell into, and refinement returns its base color
    /// unchanged.
    ///
    /// `strips` must lie within the buffer.
    #[must_use]
    pub fn analyze(
        buffer: &PixelBuffer,
        strips: (Region, Region),
        config: &ColorConfig,
    ) -> Option<Self> {
        let bits = config.bucket_bits;

        let mut histogram = Histogram::new(bits);
        for_each_pixel(buffer, strips, |color| {
            histogram.record(coarse_index(color, bits));
        });

        let sample_count = histogram.total();
        if sample_count == 0 {
            return None;
        }

        let max_frequency = histogram.max_count();
        let min_frequency_ok = config.tied_color_margin.scale_floor(max_frequency);

        let mut tied: Vec<TiedBucket> = (0..histogram.buckets())
            .filter(|&bucket| histogram.count(bucket) >= min_frequency_ok)
            .map(|bucket| TiedBucket::new(bucket, histogram.count(bucket), bits))
            .collect();
        tied.sort_by(|a, b| {
            rounded_eighths(a.l)
                .cmp(&rounded_eighths(b.l))
                .then_with(|| rounded_eighths(a.saturation).cmp(&rounded_eighths(b.saturation)))
                .then_with(|| a.l.total_cmp(&b.l))
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.bucket.cmp(&b.bucket))
        });

        // Non-empty for any margin at most one; the peak cell always reaches
        // its own scaled-down count.
        let winner = *tied.first()?;

        let mut refine = Histogram::new(8 - bits);
        for_each_pixel(buffer, strips, |color| {
            if coarse_index(color, bits) == winner.bucket {
                refine.record(fine_index(color, bits));
            }
        });
        let color = offset_color(winner.color, refine.peak(), bits);

        Some(Self {
            sample_count,
            max_frequency,
            min_frequency_ok,
            tied,
            coarse: winner.color,
            color,
        })
    }
}

fn for_each_pixel(buffer: &PixelBuffer, strips: (Region, Region), mut f: impl FnMut(Rgb)) {
    for region in [strips.0, strips.1] {
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                f(buffer.get(x, y));
            }
        }
    }
}

/// Multiplies by eight and rounds half-to-even, the coarse grid the rank
/// keys are compared on.
#[allow(clippy::cast_possible_truncation)] // rank inputs lie in [0, 1]
fn rounded_eighths(value: f32) -> i32 {
    (value * 8.0).round_ties_even() as i32
}

/// Packs the high `bits` of each channel into a coarse cell index.
fn coarse_index(color: Rgb, bits: u8) -> usize {
    let dropped = 8 - bits;
    (usize::from(color.r >> dropped) << (2 * bits))
        | (usize::from(color.g >> dropped) << bits)
        | usize::from(color.b >> dropped)
}

/// The base color of a coarse cell: quantized channels with low bits zero.
#[allow(clippy::cast_possible_truncation)] // masked to one channel
fn bucket_base(bucket: usize, bits: u8) -> Rgb {
    let dropped = 8 - bits;
    let mask = (1usize << bits) - 1;
    let channel = |shift: u8| (((bucket >> shift) & mask) << dropped) as u8;
    Rgb::new(channel(2 * bits), channel(bits), channel(0))
}

/// Packs the dropped low bits of each channel into a refinement cell index.
fn fine_index(color: Rgb, bits: u8) -> usize {
    let dropped = 8 - bits;
    let mask = (1u8 << dropped) - 1;
    (usize::from(color.r & mask) << (2 * dropped))
        | (usize::from(color.g & mask) << dropped)
        | usize::from(color.b & mask)
}

/// Merges a refinement cell back into its coarse base color.
#[allow(clippy::cast_possible_truncation)] // masked to one channel
fn offset_color(base: Rgb, sub_bucket: usize, bits: u8) -> Rgb {
    let dropped = 8 - bits;
    let mask = (1usize << dropped) - 1;
    let channel = |shift: u8| ((sub_bucket >> shift) & mask) as u8;
    Rgb::new(
        base.r | channel(2 * dropped),
        base.g | channel(dropped),
        base.b | channel(0),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Builds a packed 24-bit BGR buffer from a per-pixel color function.
    fn buffer_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Rgb) -> PixelBuffer {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let color = f(x, y);
                data.extend_from_slice(&[color.b, color.g, color.r]);
            }
        }
        PixelBuffer::new(data, width, height, width as usize * 3, 24).unwrap()
    }

    fn full_cover(width: u32, height: u32) -> (Region, Region) {
        let half = width / 2;
        (
            Region::new(0, 0, half, height),
            Region::new(half, 0, width - half, height),
        )
    }

    fn analyze_full(buffer: &PixelBuffer, config: &ColorConfig) -> ColorAnalysis {
        let size = buffer.size();
        ColorAnalysis::analyze(buffer, full_cover(size.width(), size.height()), config).unwrap()
    }

    // === Histogram ===

    #[test]
    fn test_histogram_counts() {
        let mut histogram = Histogram::new(1);
        assert_eq!(histogram.buckets(), 8);
        histogram.record(3);
        histogram.record(3);
        histogram.record(5);
        assert_eq!(histogram.total(), 3);
        assert_eq!(histogram.count(3), 2);
        assert_eq!(histogram.max_count(), 2);
        assert_eq!(histogram.peak(), 3);
    }

    #[test]
    fn test_histogram_peak_ties_resolve_low() {
        let mut histogram = Histogram::new(1);
        histogram.record(6);
        histogram.record(2);
        assert_eq!(histogram.peak(), 2);
    }

    #[test]
    fn test_histogram_empty_peak() {
        let histogram = Histogram::new(1);
        assert_eq!(histogram.max_count(), 0);
        assert_eq!(histogram.peak(), 0);
    }

    // === Bucket arithmetic ===

    #[test]
    fn test_coarse_index_packs_high_bits() {
        // r=0x6, g=0x8, b=0xb nibbles -> 0x68b.
        assert_eq!(coarse_index(Rgb::new(0x6a, 0x8f, 0xb3), 4), 0x68b);
        assert_eq!(coarse_index(Rgb::new(0, 0, 0), 4), 0);
        assert_eq!(coarse_index(Rgb::new(255, 255, 255), 4), 0xfff);
    }

    #[test]
    fn test_bucket_base_restores_quantized_channels() {
        assert_eq!(bucket_base(0x68b, 4), Rgb::new(0x60, 0x80, 0xb0));
        assert_eq!(bucket_base(0, 4), Rgb::new(0, 0, 0));
        assert_eq!(bucket_base(0xfff, 4), Rgb::new(0xf0, 0xf0, 0xf0));
    }

    #[test]
    fn test_rank_rounding_is_half_to_even() {
        // 1/16 and 3/16 both land exactly on a half step of the eighths grid.
        assert_eq!(rounded_eighths(0.0625), 0);
        assert_eq!(rounded_eighths(0.1875), 2);
        assert_eq!(rounded_eighths(0.3125), 2);
        assert_eq!(rounded_eighths(0.4375), 4);
        assert_eq!(rounded_eighths(1.0), 8);
    }

    #[test]
    fn test_base_plus_fine_offset_is_identity() {
        for bits in [1, 2, 4, 7] {
            for value in [0u8, 1, 17, 0x6a, 0x80, 0xfe, 0xff] {
                let color = Rgb::new(value, value.wrapping_mul(3), value ^ 0x5a);
                let base = bucket_base(coarse_index(color, bits), bits);
                let restored = offset_color(base, fine_index(color, bits), bits);
                assert_eq!(restored, color, "bits={bits} color={color}");
            }
        }
    }

    // === Selection ===

    #[test]
    fn test_solid_color_recovered_exactly() {
        let color = Rgb::new(0x6a, 0x8f, 0xb3);
        let buffer = buffer_from_fn(10, 6, |_, _| color);
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.sample_count, 60);
        assert_eq!(analysis.coarse, Rgb::new(0x60, 0x80, 0xb0));
        assert_eq!(analysis.color, color);
    }

    #[test]
    fn test_majority_wins_when_minority_misses_margin() {
        // 115 blue pixels against 5 red: cutoff floor(115 * 0.08) = 9 keeps
        // red out of the tie set entirely.
        let buffer = buffer_from_fn(12, 10, |x, y| {
            if x == 0 && y < 5 {
                Rgb::new(0xff, 0, 0)
            } else {
                Rgb::new(0, 0, 0xff)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.max_frequency, 115);
        assert_eq!(analysis.min_frequency_ok, 9);
        assert_eq!(analysis.tied.len(), 1);
        assert_eq!(analysis.color, Rgb::new(0, 0, 0xff));
    }

    #[test]
    fn test_margin_admits_rarer_darker_color() {
        // 100 white pixels against 20 near-black: the cutoff floor(100 * 0.08)
        // = 8 admits both, and the darker cell outranks the more frequent one.
        let buffer = buffer_from_fn(12, 10, |x, y| {
            if x < 2 && y < 10 {
                Rgb::new(0x08, 0x08, 0x08)
            } else {
                Rgb::new(0xff, 0xff, 0xff)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.max_frequency, 100);
        assert_eq!(analysis.min_frequency_ok, 8);
        assert_eq!(analysis.tied.len(), 2);
        assert_eq!(analysis.tied[0].color, Rgb::new(0, 0, 0));
        assert_eq!(analysis.color, Rgb::new(0x08, 0x08, 0x08));
    }

    #[test]
    fn test_equal_counts_prefer_darker() {
        let buffer = buffer_from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgb::new(0xff, 0xff, 0xff)
            } else {
                Rgb::new(0, 0, 0)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.color, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_equal_perceptual_keys_prefer_higher_count() {
        // Red and blue at full vividness share saturation and lightness (both
        // depend only on the max and min channels), so every perceptual key
        // ties exactly and the count must decide. 60 red against 40 blue.
        let buffer = buffer_from_fn(10, 10, |x, _| {
            if x < 6 {
                Rgb::new(0xf0, 0, 0)
            } else {
                Rgb::new(0, 0, 0xf0)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.max_frequency, 60);
        assert_eq!(analysis.tied.len(), 2);
        assert_eq!(analysis.color, Rgb::new(0xf0, 0, 0));

        // Flipped majority: blue must win the same tie.
        let buffer = buffer_from_fn(10, 10, |x, _| {
            if x < 4 {
                Rgb::new(0xf0, 0, 0)
            } else {
                Rgb::new(0, 0, 0xf0)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.color, Rgb::new(0, 0, 0xf0));
    }

    #[test]
    fn test_refinement_picks_dominant_shade_in_winner() {
        // All pixels share the coarse cell (1, 1, 1); the refinement pass must
        // pick the more common exact shade.
        let buffer = buffer_from_fn(10, 10, |x, _| {
            if x < 6 {
                Rgb::new(0x10, 0x10, 0x10)
            } else {
                Rgb::new(0x1f, 0x1f, 0x1f)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.coarse, Rgb::new(0x10, 0x10, 0x10));
        assert_eq!(analysis.color, Rgb::new(0x10, 0x10, 0x10));

        let buffer = buffer_from_fn(10, 10, |x, _| {
            if x < 4 {
                Rgb::new(0x10, 0x10, 0x10)
            } else {
                Rgb::new(0x1f, 0x1f, 0x1f)
            }
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.color, Rgb::new(0x1f, 0x1f, 0x1f));
    }

    #[test]
    fn test_refined_color_stays_inside_winning_cell() {
        let buffer = buffer_from_fn(16, 16, |x, y| {
            Rgb::new((x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8)
        });
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.color.r >> 4, analysis.coarse.r >> 4);
        assert_eq!(analysis.color.g >> 4, analysis.coarse.g >> 4);
        assert_eq!(analysis.color.b >> 4, analysis.coarse.b >> 4);
    }

    #[test]
    fn test_empty_strips_return_none() {
        let buffer = buffer_from_fn(10, 10, |_, _| Rgb::new(1, 2, 3));
        let strips = (Region::EMPTY, Region::EMPTY);
        assert!(ColorAnalysis::analyze(&buffer, strips, &ColorConfig::default()).is_none());
    }

    #[test]
    fn test_zero_cutoff_admits_unsampled_cells() {
        // Twelve white pixels: floor(12 * 0.08) = 0, so all 4096 cells tie and
        // the unsampled black cell outranks white. Refinement then has nothing
        // to count and returns the base color unchanged.
        let buffer = buffer_from_fn(4, 3, |_, _| Rgb::new(0xff, 0xff, 0xff));
        let analysis = analyze_full(&buffer, &ColorConfig::default());
        assert_eq!(analysis.max_frequency, 12);
        assert_eq!(analysis.min_frequency_ok, 0);
        assert_eq!(analysis.tied.len(), 4096);
        assert_eq!(analysis.tied[0].count, 0);
        assert_eq!(analysis.color, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let buffer = buffer_from_fn(20, 12, |x, y| {
            Rgb::new((x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x * y) % 256) as u8)
        });
        let config = ColorConfig::default();
        let a = analyze_full(&buffer, &config);
        let b = analyze_full(&buffer, &config);
        assert_eq!(a.color, b.color);
        assert_eq!(a.coarse, b.coarse);
        assert_eq!(a.tied.len(), b.tied.len());
        for (x, y) in a.tied.iter().zip(&b.tied) {
            assert_eq!(x.bucket, y.bucket);
        }
    }

    #[test]
    fn test_narrow_quantization() {
        // Two bits per channel: 64 cells, base colors step by 64.
        let config = ColorConfig {
            bucket_bits: 2,
            ..ColorConfig::default()
        };
        let color = Rgb::new(0x6a, 0x8f, 0xb3);
        let buffer = buffer_from_fn(8, 8, |_, _| color);
        let analysis = analyze_full(&buffer, &config);
        assert_eq!(analysis.coarse, Rgb::new(0x40, 0x80, 0x80));
        assert_eq!(analysis.color, color);
    }
}
