//! Controller-owned registry of every widget on the page.
//!
//! DESIGN
//! ======
//! The registry is the single source of truth for widget phase, displayed
//! rating and accepted answer. Entering `Submitting` and applying a
//! result are each one `&mut self` call, so the controller performs them
//! inside a single lock scope and no observer ever sees a half-applied
//! transition.
//!
//! Answer acceptance is exclusive: accepting one answer clears every
//! other answer-mark in the same call.

use std::collections::BTreeMap;

use crate::error::SubmitError;
use crate::widget::{AnswerMarkWidget, Phase, VoteWidget, WidgetId};

#[derive(Debug, Default)]
pub struct WidgetRegistry {
    votes: BTreeMap<WidgetId, VoteWidget>,
    answer_marks: BTreeMap<WidgetId, AnswerMarkWidget>,
}

impl WidgetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Register a vote widget in the `Idle` phase, replacing any widget with
    /// the same id.
    pub fn insert_vote(&mut self, mut widget: VoteWidget) {
        widget.phase = Phase::Idle;
        self.votes.insert(widget.id, widget);
    }

    /// Register an answer-mark widget in the `Idle` phase, replacing any
    /// widget with the same id.
    pub fn insert_answer_mark(&mut self, mut widget: AnswerMarkWidget) {
        widget.phase = Phase::Idle;
        self.answer_marks.insert(widget.id, widget);
    }

    #[must_use]
    pub fn vote(&self, id: WidgetId) -> Option<&VoteWidget> {
        self.votes.get(&id)
    }

    #[must_use]
    pub fn answer_mark(&self, id: WidgetId) -> Option<&AnswerMarkWidget> {
        self.answer_marks.get(&id)
    }

    pub fn votes(&self) -> impl Iterator<Item = &VoteWidget> {
        self.votes.values()
    }

    pub fn answer_marks(&self) -> impl Iterator<Item = &AnswerMarkWidget> {
        self.answer_marks.values()
    }

    /// The currently accepted answer, if any.
    #[must_use]
    pub fn accepted_answer(&self) -> Option<WidgetId> {
        self.answer_marks.values().find(|w| w.accepted).map(|w| w.id)
    }

    // =========================================================================
    // VOTE TRANSITIONS
    // =========================================================================

    /// Move a vote widget from `Idle` to `Submitting`.
    ///
    /// Returns `Ok(None)` when the widget is already submitting, otherwise a
    /// snapshot taken after the transition.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::UnknownWidget`] if `id` is not registered.
    pub fn begin_vote(&mut self, id: WidgetId) -> Result<Option<VoteWidget>, SubmitError> {
        let widget = self.votes.get_mut(&id).ok_or(SubmitError::UnknownWidget(id))?;
        if widget.is_busy() {
            return Ok(None);
        }
        widget.phase = Phase::Submitting;
        Ok(Some(widget.clone()))
    }

    /// Return a vote widget to `Idle`, replacing its rating when the
    /// submission produced one.
    pub fn finish_vote(&mut self, id: WidgetId, rating: Option<i64>) -> Option<VoteWidget> {
        let widget = self.votes.get_mut(&id)?;
        if let Some(rating) = rating {
            widget.rating = Some(rating);
        }
        widget.phase = Phase::Idle;
        Some(widget.clone())
    }

    // =========================================================================
    // ANSWER-MARK TRANSITIONS
    // =========================================================================

    /// Move an answer-mark widget from `Idle` to `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::UnknownWidget`] if `id` is not registered.
    pub fn begin_answer_mark(&mut self, id: WidgetId) -> Result<Option<AnswerMarkWidget>, SubmitError> {
        let widget = self.answer_marks.get_mut(&id).ok_or(SubmitError::UnknownWidget(id))?;
        if widget.is_busy() {
            return Ok(None);
        }
        widget.phase = Phase::Submitting;
        Ok(Some(widget.clone()))
    }

    /// Return an answer-mark widget to `Idle`, applying the server's verdict
    /// when there is one.
    ///
    /// Returns a snapshot of every widget that changed, the finished widget
    /// last. `Some(true)` clears every other accepted answer first;
    /// `Some(false)` touches only this widget.
    pub fn finish_answer_mark(&mut self, id: WidgetId, accepted: Option<bool>) -> Vec<AnswerMarkWidget> {
        if !self.answer_marks.contains_key(&id) {
            return Vec::new();
        }

        let mut changed = Vec::new();
        if accepted == Some(true) {
            for other in self.answer_marks.values_mut().filter(|w| w.id != id && w.accepted) {
                other.accepted = false;
                changed.push(other.clone());
            }
        }

        if let Some(widget) = self.answer_marks.get_mut(&id) {
            if let Some(accepted) = accepted {
                widget.accepted = accepted;
            }
            widget.phase = Phase::Idle;
            changed.push(widget.clone());
        }
        changed
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
