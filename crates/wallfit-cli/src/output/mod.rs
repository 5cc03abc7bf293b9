//! Output handling for decision records.

mod json;
mod progress;
mod text;

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use wallfit_core::{DecisionOutput, Dimensions};

pub use json::{JsonOutput, JsonlOutput};
pub use progress::ProgressBar;
pub use text::TextOutput;

/// Record serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns, one record per line.
    #[default]
    Text,
    /// One JSON object per line.
    Jsonl,
    /// A single JSON report written at the end.
    Json,
}

/// Create the output sink for `format`, writing to `target` or stdout.
pub fn create_output(
    format: OutputFormat,
    target: Option<&Path>,
    screen: Dimensions,
) -> Result<Box<dyn DecisionOutput>> {
    let writer: Box<dyn io::Write + Send> = match target {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextOutput::new(writer)),
        OutputFormat::Jsonl => Box::new(JsonlOutput::new(writer)),
        OutputFormat::Json => Box::new(JsonOutput::new(writer, screen)),
    })
}
