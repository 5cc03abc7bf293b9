//! Random-draw queue over the remaining wallpaper candidates.

use std::path::{Path, PathBuf};

use rand::Rng;

/// Candidates still in the running for a pick.
///
/// A pick leaves the queue unchanged; callers remove a candidate once it
/// fails to decode or is rejected, so repeated picks terminate once every
/// candidate has been tried.
#[derive(Debug, Clone, Default)]
pub struct CandidateQueue {
    paths: Vec<PathBuf>,
}

impl CandidateQueue {
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Draws a uniformly random candidate, or `None` when the queue is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        if self.paths.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.paths.len());
        Some(self.paths[index].clone())
    }

    /// Drops a candidate from the queue. Returns whether it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        match self.paths.iter().position(|p| p == path) {
            Some(index) => {
                self.paths.remove(index);
                true
            }
            None => false,
        }
    }
}
