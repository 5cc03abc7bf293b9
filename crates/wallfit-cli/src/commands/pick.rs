//! Pick command - choose one acceptable wallpaper at random.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use wallfit_adapters::{collect_image_files, decode_candidate, CandidateQueue};
use wallfit_core::{
    DecisionEngine, DecisionOutput, DecisionRecord, PlacementMode, ProgressEvent, ProgressSink,
};

use super::{ExitCode, RunSummary, SharedArgs};
use crate::config::AppConfig;
use crate::output::{create_output, ProgressBar};

/// Arguments for the pick command.
#[derive(Args, Clone)]
pub struct PickArgs {
    /// Files or directories to draw candidates from
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Seed for the random draw (omit for a fresh one each run)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub shared: SharedArgs,
}

/// Run the pick command.
///
/// Draws candidates in random order without replacement until one decides
/// to a placement other than skip. The accepted candidate is written as a
/// single record; exhausting the pool exits with a rejection.
pub fn run(args: &PickArgs, quiet: bool) -> Result<RunSummary> {
    info!("Running pick command on {} paths", args.paths.len());

    let config = AppConfig::load(args.shared.config.as_deref())?;
    let shared = SharedArgs::with_config(args.shared.clone(), &config);

    let engine =
        DecisionEngine::new(shared.decision_config()).context("invalid configuration")?;

    let files = collect_image_files(&args.paths, shared.recursive);
    let mut queue = CandidateQueue::new(files);
    debug!("pick pool holds {} candidates", queue.len());

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let progress = ProgressBar::new(None, quiet, false);
    let output = create_output(shared.format(), shared.output.as_deref(), shared.screen)?;

    let mut rejected = 0usize;
    let mut skipped = 0usize;

    while let Some(path) = queue.pick(&mut rng) {
        let candidate = match decode_candidate(&path, shared.sample_size()) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!("failed to decode {}: {e:#}", path.display());
                progress.on_event(ProgressEvent::Skipped {
                    path: path.display().to_string(),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                queue.remove(&path);
                continue;
            }
        };

        let decision =
            engine.decide_sampled(candidate.dimensions, &candidate.sample, shared.screen);
        if decision.mode == PlacementMode::Skip {
            debug!("rejected {} ({})", candidate.path, candidate.dimensions);
            progress.on_event(ProgressEvent::Skipped {
                path: candidate.path,
                reason: "no acceptable placement".to_string(),
            });
            rejected += 1;
            queue.remove(&path);
            continue;
        }

        let record = DecisionRecord::new(
            candidate.path,
            candidate.dimensions,
            shared.screen,
            decision,
            shared.trace,
        );
        output.write(&record)?;
        output.flush()?;
        progress.on_event(ProgressEvent::Decided { record });
        progress.on_event(ProgressEvent::Finished {
            decided: 1,
            skipped,
        });

        return Ok(RunSummary {
            decided: 1,
            rejected,
            skipped,
            exit_code: ExitCode::Success,
        });
    }

    output.flush()?;
    progress.on_event(ProgressEvent::Finished {
        decided: 0,
        skipped,
    });
    warn!("no candidate produced an acceptable placement");

    Ok(RunSummary {
        decided: 0,
        rejected,
        skipped,
        exit_code: ExitCode::Rejected,
    })
}
