//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use wallfit_core::domain::DecisionRecord;
use wallfit_core::ports::{
    CandidateImage, CandidateSource, DecisionOutput, ProgressEvent, ProgressSink,
};

/// Mock implementation of `CandidateSource` for testing.
///
/// Yields pre-built candidates and tracks iteration for assertions.
pub struct MockCandidateSource {
    candidates: Vec<CandidateImage>,
    failures: Vec<String>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockCandidateSource {
    /// Creates a new mock source with the given candidates.
    #[must_use]
    pub fn new(candidates: Vec<CandidateImage>) -> Self {
        Self {
            candidates,
            failures: Vec::new(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a mock source that yields the given decode failures before
    /// the candidates.
    #[must_use]
    pub fn with_failures(candidates: Vec<CandidateImage>, failures: Vec<String>) -> Self {
        Self {
            candidates,
            failures,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl CandidateSource for MockCandidateSource {
    fn candidates(&self) -> Box<dyn Iterator<Item = anyhow::Result<CandidateImage>> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        let failures = self
            .failures
            .iter()
            .cloned()
            .map(|reason| Err(anyhow::anyhow!(reason)));
        Box::new(failures.chain(self.candidates.iter().cloned().map(Ok)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.failures.len() + self.candidates.len())
    }
}

/// Mock implementation of `DecisionOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockDecisionOutput {
    records: Arc<Mutex<Vec<DecisionRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockDecisionOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<DecisionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockDecisionOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionOutput for MockDecisionOutput {
    fn write(&self, record: &DecisionRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Decided` events.
    #[must_use]
    pub fn decided_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Decided { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns whether a `Finished` event was received.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Finished { .. }))
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { decided, skipped } => Some((*decided, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
