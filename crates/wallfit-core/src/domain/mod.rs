//! Core domain types shared across the decision pipeline.

mod color;
mod decision;
mod error;
mod geometry;
mod placement;
mod ratio;
mod trace;

pub use color::Rgb;
pub use decision::{Decision, DecisionRecord};
pub use error::EngineError;
pub use geometry::{Dimensions, Region};
pub use placement::{EdgeMatchFlags, PlacementMode};
pub use ratio::Ratio;
pub use trace::Trace;
