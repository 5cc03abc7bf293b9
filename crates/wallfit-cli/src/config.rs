//! Configuration file support for wallfit.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/wallfit/config.toml` (lowest priority)
//! - Project-local: `.wallfit.toml` (searched up the directory tree)
//! - CLI flags (highest priority, applied separately)
//!
//! An explicit `--config` path replaces discovery entirely. Files that exist
//! but fail to parse or validate abort the run; only missing files are
//! ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use wallfit_core::Ratio;

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Placement classification thresholds.
    pub placement: PlacementConfig,
    /// Edge color extraction settings.
    pub color: ColorConfig,
    /// Decode sampling settings.
    pub sampling: SamplingConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Placement classification configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    /// Largest acceptable upscale before centering (at least 1).
    pub max_scale_factor: Option<Ratio>,
    /// Upscale beyond which candidates are rejected (at least max).
    pub skip_scale_factor: Option<Ratio>,
    /// Largest acceptable cropped-away fraction for fill (0-1).
    pub max_fraction_offscreen: Option<Ratio>,
}

/// Edge color extraction configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Fraction of the sampled side covered by both edge strips (0-1].
    pub edge_fraction: Option<Ratio>,
    /// Histogram quantization bits per channel (1-7).
    pub bucket_bits: Option<u8>,
    /// Fraction of the peak count that still ties (0-1).
    pub tied_color_margin: Option<Ratio>,
}

/// Decode sampling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Longest side of the decoded sample in pixels; 0 keeps full resolution.
    pub sample_size: Option<u32>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "text", "jsonl", or "json".
    pub format: Option<String>,
    /// Include decision traces in records.
    pub trace: Option<bool>,
    /// Show the progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration, either from an explicit path or by discovery.
    ///
    /// Discovery priority (lowest to highest):
    /// 1. XDG config: `~/.config/wallfit/config.toml`
    /// 2. Project-local: `.wallfit.toml` (searched up from cwd)
    ///
    /// # Errors
    ///
    /// Fails if an explicit path is missing, or if any file that exists
    /// cannot be parsed or holds an out-of-range value.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => {
                info!("loading config: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::discover()?,
        };

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
        Ok(config)
    }

    fn discover() -> Result<Self> {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("loading XDG config: {}", xdg_path.display());
                config = Self::from_file(&xdg_path)?;
            } else {
                debug!("no XDG config at {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("loading project config: {}", project_path.display());
            config.merge(Self::from_file(&project_path)?);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(factor) = self.placement.max_scale_factor {
            if factor < Ratio::ONE {
                return Err(format!(
                    "placement.max_scale_factor must be at least 1, got {factor}"
                ));
            }
        }
        if let (Some(skip), Some(max)) = (
            self.placement.skip_scale_factor,
            self.placement.max_scale_factor,
        ) {
            if skip < max {
                return Err(format!(
                    "placement.skip_scale_factor must be at least max_scale_factor, got {skip} < {max}"
                ));
            }
        }
        if let Some(fraction) = self.placement.max_fraction_offscreen {
            if fraction > Ratio::ONE {
                return Err(format!(
                    "placement.max_fraction_offscreen must be 0-1, got {fraction}"
                ));
            }
        }

        if let Some(fraction) = self.color.edge_fraction {
            if fraction == Ratio::ZERO || fraction > Ratio::ONE {
                return Err(format!(
                    "color.edge_fraction must be above 0 and at most 1, got {fraction}"
                ));
            }
        }
        if let Some(bits) = self.color.bucket_bits {
            if !(1..=7).contains(&bits) {
                return Err(format!("color.bucket_bits must be 1-7, got {bits}"));
            }
        }
        if let Some(margin) = self.color.tied_color_margin {
            if margin > Ratio::ONE {
                return Err(format!(
                    "color.tied_color_margin must be 0-1, got {margin}"
                ));
            }
        }

        if let Some(ref format) = self.output.format {
            if format != "text" && format != "jsonl" && format != "json" {
                return Err(format!(
                    "output.format must be 'text', 'jsonl', or 'json', got '{format}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.placement.max_scale_factor = other
            .placement
            .max_scale_factor
            .or(self.placement.max_scale_factor);
        self.placement.skip_scale_factor = other
            .placement
            .skip_scale_factor
            .or(self.placement.skip_scale_factor);
        self.placement.max_fraction_offscreen = other
            .placement
            .max_fraction_offscreen
            .or(self.placement.max_fraction_offscreen);

        self.color.edge_fraction = other.color.edge_fraction.or(self.color.edge_fraction);
        self.color.bucket_bits = other.color.bucket_bits.or(self.color.bucket_bits);
        self.color.tied_color_margin = other
            .color
            .tied_color_margin
            .or(self.color.tied_color_margin);

        self.sampling.sample_size = other.sampling.sample_size.or(self.sampling.sample_size);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.trace = other.output.trace.or(self.output.trace);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wallfit").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.wallfit.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".wallfit.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}
