//! Page manifest: the widgets the page rendered at load time.
//!
//! The rendering layer describes each widget once (what the markup would
//! carry as `data-target` / `data-url` attributes) and the controller
//! attaches to exactly that set.

use serde::{Deserialize, Serialize};

use crate::widget::{AnswerMarkWidget, VoteWidget, WidgetId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageManifest {
    #[serde(default)]
    pub votes: Vec<VoteWidget>,
    #[serde(default)]
    pub answer_marks: Vec<AnswerMarkWidget>,
}

impl PageManifest {
    /// Parse a manifest from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document does not match.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// One past the highest widget id in the manifest, or `None` when the
    /// highest id is already `u64::MAX`.
    #[must_use]
    pub fn next_id(&self) -> Option<WidgetId> {
        let max = self.votes.iter().map(|w| w.id.0).chain(self.answer_marks.iter().map(|w| w.id.0)).max();
        match max {
            Some(max) => max.checked_add(1).map(WidgetId),
            None => Some(WidgetId(1)),
        }
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
