//! Analysis passes composed by the decision engine.

mod color;
mod placement;
mod regions;

pub use color::{ColorAnalysis, ColorConfig, Histogram, TiedBucket};
pub use placement::{PlacementAnalysis, PlacementConfig};
pub use regions::edge_strips;
