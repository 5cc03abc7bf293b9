//! Wallfit Adapters - filesystem and decoding implementations of the core ports.
//!
//! Bridges the pure decision engine to the outside world: walking directories
//! for wallpaper candidates, decoding and downscaling raster images into the
//! BGR sample buffers the engine consumes, and the random pick queue used to
//! draw candidates until one is accepted.

pub mod fs;
pub mod queue;

pub use fs::{collect_image_files, decode_candidate, FsCandidateSource};
pub use queue::CandidateQueue;
