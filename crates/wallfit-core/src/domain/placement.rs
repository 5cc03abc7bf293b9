//! Placement modes and edge-matching flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a candidate image should be placed on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PlacementMode {
    /// Reject the candidate; placement would upscale past the skip threshold.
    Skip,
    /// Show at native size, centered, surrounded by background color.
    Center,
    /// Scale to fit entirely on screen, letterboxed with background color.
    Fit,
    /// Scale to cover the screen, cropping the overflowing axis.
    Fill,
}

impl PlacementMode {
    /// Whether this mode leaves screen area uncovered and therefore needs a
    /// background color.
    #[must_use]
    pub const fn needs_background(self) -> bool {
        matches!(self, Self::Center | Self::Fit)
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Skip => "skip",
            Self::Center => "center",
            Self::Fit => "fit",
            Self::Fill => "fill",
        };
        f.write_str(name)
    }
}

/// Which pairs of image edges will border visible background.
///
/// `Center` exposes all four edges; `Fit` exposes exactly one pair, on the
/// axis that did not bind. `Fill` and `Skip` expose none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeMatchFlags {
    pub match_left_right: bool,
    pub match_top_bottom: bool,
}

impl EdgeMatchFlags {
    pub const NONE: Self = Self {
        match_left_right: false,
        match_top_bottom: false,
    };

    #[must_use]
    pub const fn new(match_left_right: bool, match_top_bottom: bool) -> Self {
        Self {
            match_left_right,
            match_top_bottom,
        }
    }

    /// True when at least one edge pair borders background.
    #[must_use]
    pub const fn any(self) -> bool {
        self.match_left_right || self.match_top_bottom
    }
}
