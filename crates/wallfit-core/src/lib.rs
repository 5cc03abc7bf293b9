//! Wallfit Core - Placement decisions and edge color extraction
//!
//! This crate contains the core domain types, the placement classifier, edge
//! region selection, the two-stage color clusterer, and the decision engine
//! that composes them.

pub mod domain;
pub mod engine;
pub mod modules;
pub mod pixel;
pub mod ports;

pub use domain::{
    Decision, DecisionRecord, Dimensions, EdgeMatchFlags, EngineError, PlacementMode, Ratio,
    Region, Rgb, Trace,
};
pub use engine::{DecisionConfig, DecisionEngine};
pub use pixel::PixelBuffer;
pub use ports::{CandidateImage, CandidateSource, DecisionOutput, ProgressEvent, ProgressSink};
