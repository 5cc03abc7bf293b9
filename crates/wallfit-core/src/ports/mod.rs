//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the decision core and external
//! adapters.

mod candidate_source;
mod decision_output;
mod progress;

pub use candidate_source::{CandidateImage, CandidateSource};
pub use decision_output::DecisionOutput;
pub use progress::{ProgressEvent, ProgressSink};
