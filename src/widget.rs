//! Widget data model.
//!
//! DESIGN
//! ======
//! A page carries two kinds of interactive widgets: vote controls and
//! answer-mark controls. Each one owns an explicit `Phase` instead of a
//! "loading" flag hidden in presentation attributes. `Submitting` is the
//! only non-terminal phase and is entered from `Idle` only.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Page-unique widget identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Per-widget submission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

impl Phase {
    #[must_use]
    pub fn is_busy(self) -> bool {
        self == Self::Submitting
    }
}

// =============================================================================
// VOTE WIDGET
// =============================================================================

/// A vote control attached to a question or an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWidget {
    pub id: WidgetId,
    /// Primary key of the voted entity, sent as `target_id`.
    pub target_id: i64,
    pub endpoint_url: String,
    /// Rating currently displayed next to the buttons.
    pub rating: Option<i64>,
    #[serde(default)]
    pub phase: Phase,
}

impl VoteWidget {
    #[must_use]
    pub fn new(id: WidgetId, target_id: i64, endpoint_url: impl Into<String>) -> Self {
        Self { id, target_id, endpoint_url: endpoint_url.into(), rating: None, phase: Phase::Idle }
    }

    #[must_use]
    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }
}

// =============================================================================
// ANSWER MARK
// =============================================================================

/// The accept marker attached to one answer block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMarkWidget {
    pub id: WidgetId,
    pub endpoint_url: String,
    /// Whether this answer is the accepted one. Drives both the marker and
    /// the primary highlight of the enclosing block.
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub phase: Phase,
}

impl AnswerMarkWidget {
    #[must_use]
    pub fn new(id: WidgetId, endpoint_url: impl Into<String>) -> Self {
        Self { id, endpoint_url: endpoint_url.into(), accepted: false, phase: Phase::Idle }
    }

    #[must_use]
    pub fn with_accepted(mut self, accepted: bool) -> Self {
        self.accepted = accepted;
        self
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }
}
