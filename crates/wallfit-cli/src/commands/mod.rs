//! CLI command definitions and handlers.

pub mod decide;
pub mod pick;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use wallfit_core::modules::{ColorConfig, PlacementConfig};
use wallfit_core::{
    CandidateSource, DecisionConfig, DecisionEngine, DecisionOutput, DecisionRecord, Dimensions,
    PlacementMode, ProgressEvent, ProgressSink, Ratio,
};

use crate::config::AppConfig;
use crate::output::OutputFormat;

/// Wallfit - wallpaper placement decisions
#[derive(Parser)]
#[command(name = "wallfit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and skip notices
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Decide placement for every listed image
    Decide(decide::DecideArgs),
    /// Pick one acceptable wallpaper at random
    Pick(pick::PickArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image received a placement, or a pick was accepted.
    Success,
    /// A candidate was rejected or undecodable, or the pick ran dry.
    Rejected,
    /// Argument, configuration, or I/O failure.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::Rejected => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}

/// Hardcoded default values for options.
mod defaults {
    /// Longest side of the decoded sample in pixels.
    pub const SAMPLE_SIZE: u32 = 120;
}

/// Parse a `WIDTHxHEIGHT` screen size.
fn parse_screen(s: &str) -> Result<Dimensions, String> {
    let (width, height) = s
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| format!("'{s}' is not of the form WIDTHxHEIGHT"))?;
    let width: u32 = width
        .parse()
        .map_err(|_| format!("'{width}' is not a valid width"))?;
    let height: u32 = height
        .parse()
        .map_err(|_| format!("'{height}' is not a valid height"))?;
    Dimensions::new(width, height).map_err(|e| e.to_string())
}

/// Parse a non-negative ratio such as `1.2`.
fn parse_ratio(s: &str) -> Result<Ratio, String> {
    Ratio::parse(s).map_err(|e| e.to_string())
}

/// Parse and validate a histogram bit width (1-7).
fn parse_bucket_bits(s: &str) -> Result<u8, String> {
    let bits: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid bit width"))?;
    if (1..=7).contains(&bits) {
        Ok(bits)
    } else {
        Err(format!("{bits} is not in 1..=7"))
    }
}

/// Arguments shared by the decide and pick commands.
#[derive(Args, Clone)]
pub struct SharedArgs {
    /// Screen size as WIDTHxHEIGHT, e.g. 1920x1080
    #[arg(long, value_parser = parse_screen, value_name = "WxH")]
    pub screen: Dimensions,

    /// Largest upscale before centering instead of scaling (at least 1)
    #[arg(long, value_parser = parse_ratio)]
    pub max_scale_factor: Option<Ratio>,

    /// Upscale beyond which candidates are rejected (at least max-scale-factor)
    #[arg(long, value_parser = parse_ratio)]
    pub skip_scale_factor: Option<Ratio>,

    /// Largest cropped-away fraction before fill falls back to fit (0-1)
    #[arg(long, value_parser = parse_ratio)]
    pub max_fraction_offscreen: Option<Ratio>,

    /// Fraction of the sampled side covered by both edge strips together (0-1)
    #[arg(long, value_parser = parse_ratio)]
    pub edge_fraction: Option<Ratio>,

    /// Histogram quantization bits per channel (1-7)
    #[arg(long, value_parser = parse_bucket_bits)]
    pub bucket_bits: Option<u8>,

    /// Fraction of the peak count that still counts as tied (0-1)
    #[arg(long, value_parser = parse_ratio)]
    pub tied_color_margin: Option<Ratio>,

    /// Longest side of the decoded sample in pixels (0 = full resolution)
    #[arg(long)]
    pub sample_size: Option<u32>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include the decision trace in records
    #[arg(long)]
    pub trace: bool,

    /// Write records to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Use this config file instead of discovery
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl SharedArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Thresholds: CLI > config (accessors provide hardcoded fallbacks)
        args.max_scale_factor = args.max_scale_factor.or(config.placement.max_scale_factor);
        args.skip_scale_factor = args.skip_scale_factor.or(config.placement.skip_scale_factor);
        args.max_fraction_offscreen = args
            .max_fraction_offscreen
            .or(config.placement.max_fraction_offscreen);
        args.edge_fraction = args.edge_fraction.or(config.color.edge_fraction);
        args.bucket_bits = args.bucket_bits.or(config.color.bucket_bits);
        args.tied_color_margin = args.tied_color_margin.or(config.color.tied_color_margin);
        args.sample_size = args.sample_size.or(config.sampling.sample_size);

        // Output format: CLI > config
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "text" => Some(OutputFormat::Text),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    "json" => Some(OutputFormat::Json),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.trace {
            args.trace = config.output.trace.unwrap_or(false);
        }
        if !args.no_progress {
            args.no_progress = !config.output.progress.unwrap_or(true);
        }

        args
    }

    /// Get sample size with fallback to the hardcoded default.
    pub fn sample_size(&self) -> u32 {
        self.sample_size.unwrap_or(defaults::SAMPLE_SIZE)
    }

    /// Get output format with fallback to text.
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Build the engine configuration from merged values.
    pub fn decision_config(&self) -> DecisionConfig {
        let placement = PlacementConfig::default();
        let color = ColorConfig::default();
        DecisionConfig {
            placement: PlacementConfig {
                max_scale_factor: self.max_scale_factor.unwrap_or(placement.max_scale_factor),
                skip_scale_factor: self.skip_scale_factor.unwrap_or(placement.skip_scale_factor),
                max_fraction_offscreen: self
                    .max_fraction_offscreen
                    .unwrap_or(placement.max_fraction_offscreen),
            },
            color: ColorConfig {
                edge_fraction: self.edge_fraction.unwrap_or(color.edge_fraction),
                bucket_bits: self.bucket_bits.unwrap_or(color.bucket_bits),
                tied_color_margin: self.tied_color_margin.unwrap_or(color.tied_color_margin),
            },
        }
    }

    /// Whether to draw the progress bar for `total` candidates.
    pub fn show_progress(&self, quiet: bool, total: Option<usize>) -> bool {
        !quiet
            && !self.no_progress
            && total.map_or(true, |t| t > 1)
            && std::io::stderr().is_terminal()
    }
}

/// Result of running a command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct RunSummary {
    /// Records written.
    pub decided: usize,
    /// Decisions that came back as skip.
    pub rejected: usize,
    /// Candidates that failed to decode.
    pub skipped: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Decide every candidate from `source`, writing one record each.
///
/// Undecodable candidates are reported and passed over; a decision always
/// produces a record, including skip decisions.
pub fn process_candidates(
    engine: &DecisionEngine,
    source: &dyn CandidateSource,
    screen: Dimensions,
    keep_trace: bool,
    output: &dyn DecisionOutput,
    progress: &dyn ProgressSink,
) -> Result<RunSummary> {
    let total = source.count_hint();
    let mut decided = 0usize;
    let mut rejected = 0usize;
    let mut skipped = 0usize;

    for (index, item) in source.candidates().enumerate() {
        let candidate = match item {
            Ok(candidate) => candidate,
            Err(e) => {
                // The error context names the path.
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("candidate {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: candidate.path.clone(),
            index,
            total,
        });

        let decision = engine.decide_sampled(candidate.dimensions, &candidate.sample, screen);
        if decision.mode == PlacementMode::Skip {
            rejected += 1;
        }

        let record = DecisionRecord::new(
            candidate.path,
            candidate.dimensions,
            screen,
            decision,
            keep_trace,
        );
        output.write(&record)?;
        progress.on_event(ProgressEvent::Decided { record });
        decided += 1;
    }

    output.flush()?;
    progress.on_event(ProgressEvent::Finished { decided, skipped });

    let exit_code = if rejected == 0 && skipped == 0 {
        ExitCode::Success
    } else {
        ExitCode::Rejected
    };

    Ok(RunSummary {
        decided,
        rejected,
        skipped,
        exit_code,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wallfit_core::Rgb;
    use wallfit_test_support::{
        MockCandidateSource, MockDecisionOutput, MockProgressSink, SyntheticBufferBuilder,
    };

    fn engine() -> DecisionEngine {
        DecisionEngine::new(DecisionConfig::default()).unwrap()
    }

    fn screen() -> Dimensions {
        Dimensions::new(1920, 1080).unwrap()
    }

    #[test]
    fn test_all_placed_is_success() {
        let source = MockCandidateSource::new(vec![
            SyntheticBufferBuilder::solid_candidate("fill.png", 1920, 1080, Rgb::new(1, 2, 3)),
            SyntheticBufferBuilder::solid_candidate("fit.png", 1000, 1000, Rgb::new(4, 5, 6)),
        ]);
        let output = MockDecisionOutput::new();
        let progress = MockProgressSink::new();

        let summary =
            process_candidates(&engine(), &source, screen(), false, &output, &progress).unwrap();

        assert_eq!(summary.decided, 2);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.exit_code, ExitCode::Success);

        let records = output.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mode, PlacementMode::Fill);
        assert_eq!(records[1].mode, PlacementMode::Fit);
        assert_eq!(output.flush_count(), 1);
        assert_eq!(progress.decided_count(), 2);
        assert_eq!(progress.finished_counts(), Some((2, 0)));
    }

    #[test]
    fn test_skip_decision_is_recorded_and_rejects() {
        let source = MockCandidateSource::new(vec![SyntheticBufferBuilder::solid_candidate(
            "tiny.png",
            400,
            300,
            Rgb::new(9, 9, 9),
        )]);
        let output = MockDecisionOutput::new();
        let progress = MockProgressSink::new();

        let summary =
            process_candidates(&engine(), &source, screen(), false, &output, &progress).unwrap();

        assert_eq!(summary.decided, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.exit_code, ExitCode::Rejected);
        assert_eq!(output.records()[0].mode, PlacementMode::Skip);
    }

    #[test]
    fn test_decode_failure_is_skipped_and_rejects() {
        let source = MockCandidateSource::with_failures(
            vec![SyntheticBufferBuilder::solid_candidate(
                "ok.png",
                1920,
                1080,
                Rgb::new(1, 2, 3),
            )],
            vec!["corrupt header".to_string()],
        );
        let output = MockDecisionOutput::new();
        let progress = MockProgressSink::new();

        let summary =
            process_candidates(&engine(), &source, screen(), false, &output, &progress).unwrap();

        assert_eq!(summary.decided, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.exit_code, ExitCode::Rejected);
        assert_eq!(progress.skipped_count(), 1);
        assert_eq!(progress.finished_counts(), Some((1, 1)));
    }

    #[test]
    fn test_trace_kept_only_on_request() {
        let candidate = || {
            SyntheticBufferBuilder::solid_candidate("wall.png", 1000, 1000, Rgb::new(7, 7, 7))
        };

        let output = MockDecisionOutput::new();
        let source = MockCandidateSource::new(vec![candidate()]);
        process_candidates(
            &engine(),
            &source,
            screen(),
            false,
            &output,
            &MockProgressSink::new(),
        )
        .unwrap();
        assert!(output.records()[0].trace.is_empty());

        let output = MockDecisionOutput::new();
        let source = MockCandidateSource::new(vec![candidate()]);
        process_candidates(
            &engine(),
            &source,
            screen(),
            true,
            &output,
            &MockProgressSink::new(),
        )
        .unwrap();
        assert!(!output.records()[0].trace.is_empty());
    }

    #[test]
    fn test_empty_source_is_success() {
        let source = MockCandidateSource::empty();
        let output = MockDecisionOutput::new();
        let progress = MockProgressSink::new();

        let summary =
            process_candidates(&engine(), &source, screen(), false, &output, &progress).unwrap();

        assert_eq!(summary.decided, 0);
        assert_eq!(summary.exit_code, ExitCode::Success);
        assert_eq!(progress.finished_counts(), Some((0, 0)));
    }

    // === Argument parsing helpers ===

    #[test]
    fn test_parse_screen() {
        let dims = parse_screen("1920x1080").unwrap();
        assert_eq!(dims.width(), 1920);
        assert_eq!(dims.height(), 1080);
        assert!(parse_screen("1920X1080").is_ok());
        assert!(parse_screen("1920").is_err());
        assert!(parse_screen("ax b").is_err());
        assert!(parse_screen("0x1080").is_err());
    }

    #[test]
    fn test_parse_bucket_bits() {
        assert_eq!(parse_bucket_bits("4").unwrap(), 4);
        assert_eq!(parse_bucket_bits("1").unwrap(), 1);
        assert_eq!(parse_bucket_bits("7").unwrap(), 7);
        assert!(parse_bucket_bits("0").is_err());
        assert!(parse_bucket_bits("8").is_err());
        assert!(parse_bucket_bits("four").is_err());
    }

    #[test]
    fn test_decision_config_uses_defaults_when_unset() {
        let args = SharedArgs {
            screen: screen(),
            max_scale_factor: None,
            skip_scale_factor: None,
            max_fraction_offscreen: None,
            edge_fraction: None,
            bucket_bits: None,
            tied_color_margin: None,
            sample_size: None,
            format: None,
            trace: false,
            output: None,
            config: None,
            recursive: false,
            no_progress: false,
        };
        assert_eq!(args.decision_config(), DecisionConfig::default());
        assert_eq!(args.sample_size(), 120);
        assert_eq!(args.format(), OutputFormat::Text);
    }

    #[test]
    fn test_with_config_layers_cli_over_file() {
        let config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[placement]
max_scale_factor = 1.5

[color]
bucket_bits = 5

[output]
format = 'json'
progress = false
",
        )
        .unwrap();

        let args = SharedArgs {
            screen: screen(),
            max_scale_factor: Some(Ratio::new(11, 10)),
            skip_scale_factor: None,
            max_fraction_offscreen: None,
            edge_fraction: None,
            bucket_bits: None,
            tied_color_margin: None,
            sample_size: None,
            format: None,
            trace: false,
            output: None,
            config: None,
            recursive: false,
            no_progress: false,
        };
        let merged = SharedArgs::with_config(args, &config);

        // CLI value wins over the file.
        assert_eq!(merged.max_scale_factor, Some(Ratio::new(11, 10)));
        // File values fill the gaps.
        assert!(merged.recursive);
        assert_eq!(merged.bucket_bits, Some(5));
        assert_eq!(merged.format(), OutputFormat::Json);
        assert!(merged.no_progress);
    }
}
