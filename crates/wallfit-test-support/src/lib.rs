//! Test support utilities for wallfit.
//!
//! Provides mock implementations of the core ports and synthetic pixel
//! buffer builders, shared by tests across the workspace.
//!
//! # Example
//!
//! ```
//! use wallfit_core::Rgb;
//! use wallfit_test_support::{MockCandidateSource, SyntheticBufferBuilder};
//!
//! let candidate =
//!     SyntheticBufferBuilder::solid_candidate("night.png", 1920, 1080, Rgb::new(16, 16, 16));
//! let source = MockCandidateSource::new(vec![candidate]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticBufferBuilder;
pub use mocks::{MockCandidateSource, MockDecisionOutput, MockProgressSink};
