//! Decide command - classify placement for every listed image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use wallfit_adapters::FsCandidateSource;
use wallfit_core::{CandidateSource, DecisionEngine};

use super::{process_candidates, RunSummary, SharedArgs};
use crate::config::AppConfig;
use crate::output::{create_output, ProgressBar};

/// Arguments for the decide command.
#[derive(Args, Clone)]
pub struct DecideArgs {
    /// Files or directories to classify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub shared: SharedArgs,
}

/// Run the decide command.
pub fn run(args: &DecideArgs, quiet: bool) -> Result<RunSummary> {
    info!("Running decide command on {} paths", args.paths.len());

    let config = AppConfig::load(args.shared.config.as_deref())?;
    let shared = SharedArgs::with_config(args.shared.clone(), &config);

    let engine =
        DecisionEngine::new(shared.decision_config()).context("invalid configuration")?;

    let source = FsCandidateSource::new(args.paths.clone(), shared.recursive, shared.sample_size());
    let total = source.count_hint();

    let progress_bar = ProgressBar::new(
        total.map(|t| t as u64),
        quiet,
        shared.show_progress(quiet, total),
    );

    let output = create_output(shared.format(), shared.output.as_deref(), shared.screen)?;

    process_candidates(
        &engine,
        &source,
        shared.screen,
        shared.trace,
        output.as_ref(),
        &progress_bar,
    )
}
