//! Decision outcomes.

use serde::Serialize;

use super::color::Rgb;
use super::geometry::Dimensions;
use super::placement::PlacementMode;

/// The outcome of deciding one candidate against one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub mode: PlacementMode,
    /// Edge background color; present only for modes that expose background
    /// and only when edge pixels were sampled.
    pub background: Option<Rgb>,
    /// Timestamped trace of how the decision was reached.
    pub trace: Vec<String>,
}

/// A [`Decision`] tagged with its source path and the geometry it was decided
/// against, ready for structured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub path: String,
    pub image: Dimensions,
    pub screen: Dimensions,
    pub mode: PlacementMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<String>,
}

impl DecisionRecord {
    /// Tags a decision with its source. With `keep_trace` false the trace is
    /// dropped and omitted from serialized output.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        image: Dimensions,
        screen: Dimensions,
        decision: Decision,
        keep_trace: bool,
    ) -> Self {
        Self {
            path: path.into(),
            image,
            screen,
            mode: decision.mode,
            background: decision.background,
            trace: if keep_trace { decision.trace } else { Vec::new() },
        }
    }
}
