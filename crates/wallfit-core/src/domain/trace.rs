//! Timestamped decision trace.

use std::fmt::Display;
use std::time::Instant;

/// Collects human-readable trace lines, each prefixed with the milliseconds
/// elapsed since the trace began.
#[derive(Debug)]
pub struct Trace {
    started: Instant,
    lines: Vec<String>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            lines: Vec::new(),
        }
    }

    /// Appends a line as `"{elapsed_ms}: {message}"`.
    pub fn line(&mut self, message: impl Display) {
        let elapsed = self.started.elapsed().as_millis();
        self.lines.push(format!("{elapsed}: {message}"));
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}
