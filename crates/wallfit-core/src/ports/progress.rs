//! Progress reporting port for UI integration.

use crate::domain::DecisionRecord;

/// Events emitted while working through candidates.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A candidate is about to be decided.
    Started {
        /// Path to the candidate.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total candidates in the batch, if known.
        total: Option<usize>,
    },
    /// A candidate was decided.
    Decided {
        /// The decision record.
        record: DecisionRecord,
    },
    /// A candidate was passed over, either undecodable or rejected.
    Skipped {
        /// Path to the candidate.
        path: String,
        /// Reason for passing it over.
        reason: String,
    },
    /// The run is complete.
    Finished {
        /// Candidates decided successfully.
        decided: usize,
        /// Candidates passed over.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
