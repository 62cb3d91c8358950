//! Rendering layer: widget state to presentation, errors to modal text.
//!
//! DESIGN
//! ======
//! The controller never touches presentation. This module derives the
//! classes and opacity the page markup expects from a widget snapshot, and
//! keeps a `PageView` current by applying `WidgetEvent`s as they arrive.

use std::collections::BTreeMap;

use crate::error::{ErrorKind, SubmitError};
use crate::events::WidgetEvent;
use crate::widget::{AnswerMarkWidget, VoteWidget, WidgetId};

pub const PERMISSION_DENIED_MESSAGE: &str = "You don't have appropriate permissions!";
pub const GENERIC_FAILURE_MESSAGE: &str = "Sorry, something went wrong!";

/// Opacity of an answer block while its mark is being submitted.
pub const PENDING_BLOCK_OPACITY: f32 = 0.2;

/// Text for the shared modal dialog.
#[must_use]
pub fn modal_message(err: &SubmitError) -> &'static str {
    match err.kind() {
        ErrorKind::PermissionDenied => PERMISSION_DENIED_MESSAGE,
        ErrorKind::TransportOrServer => GENERIC_FAILURE_MESSAGE,
    }
}

// =============================================================================
// VOTE VIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteView {
    pub buttons_inactive: bool,
    pub value_hidden: bool,
    pub loader_visible: bool,
    pub value: Option<i64>,
}

impl From<&VoteWidget> for VoteView {
    fn from(widget: &VoteWidget) -> Self {
        let busy = widget.is_busy();
        Self { buttons_inactive: busy, value_hidden: busy, loader_visible: busy, value: widget.rating }
    }
}

impl VoteView {
    #[must_use]
    pub fn button_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["votes__vote"];
        if self.buttons_inactive {
            classes.push("votes__vote--inactive");
        }
        classes
    }

    #[must_use]
    pub fn value_classes(&self) -> Vec<&'static str> {
        if self.value_hidden { vec!["hidden"] } else { Vec::new() }
    }

    #[must_use]
    pub fn loader_classes(&self) -> Vec<&'static str> {
        if self.loader_visible { vec!["loader"] } else { vec!["loader", "hidden"] }
    }
}

// =============================================================================
// ANSWER-MARK VIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerMarkView {
    pub inactive: bool,
    pub marked: bool,
    pub block_primary: bool,
    pub block_opacity: f32,
}

impl From<&AnswerMarkWidget> for AnswerMarkView {
    fn from(widget: &AnswerMarkWidget) -> Self {
        let busy = widget.is_busy();
        Self {
            inactive: busy,
            marked: widget.accepted,
            block_primary: widget.accepted,
            block_opacity: if busy { PENDING_BLOCK_OPACITY } else { 1.0 },
        }
    }
}

impl AnswerMarkView {
    #[must_use]
    pub fn mark_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["answer-mark"];
        if self.inactive {
            classes.push("answer-mark--inactive");
        }
        if self.marked {
            classes.push("answer-mark--marked");
        }
        classes
    }

    #[must_use]
    pub fn block_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["uk-comment"];
        if self.block_primary {
            classes.push("uk-comment-primary");
        }
        classes
    }
}

// =============================================================================
// PAGE VIEW
// =============================================================================

/// Rendered state of every widget the view has heard about.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    votes: BTreeMap<WidgetId, VoteView>,
    answer_marks: BTreeMap<WidgetId, AnswerMarkView>,
}

impl PageView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the view from current widget state.
    pub fn seed<'a>(
        &mut self,
        votes: impl IntoIterator<Item = &'a VoteWidget>,
        answer_marks: impl IntoIterator<Item = &'a AnswerMarkWidget>,
    ) {
        for widget in votes {
            self.votes.insert(widget.id, VoteView::from(widget));
        }
        for widget in answer_marks {
            self.answer_marks.insert(widget.id, AnswerMarkView::from(widget));
        }
    }

    pub fn apply(&mut self, event: &WidgetEvent) {
        match event {
            WidgetEvent::Vote(widget) => {
                self.votes.insert(widget.id, VoteView::from(widget));
            }
            WidgetEvent::AnswerMark(widget) => {
                self.answer_marks.insert(widget.id, AnswerMarkView::from(widget));
            }
        }
    }

    #[must_use]
    pub fn vote(&self, id: WidgetId) -> Option<&VoteView> {
        self.votes.get(&id)
    }

    #[must_use]
    pub fn answer_mark(&self, id: WidgetId) -> Option<&AnswerMarkView> {
        self.answer_marks.get(&id)
    }

    /// One line per widget, e.g. `w1 vote 7 [votes__vote]`.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let votes = self.votes.iter().map(|(id, view)| {
            let value = view.value.map_or_else(|| "-".to_string(), |v| v.to_string());
            format!("{id} vote {value} [{}]", view.button_classes().join(" "))
        });
        let marks = self.answer_marks.iter().map(|(id, view)| {
            format!(
                "{id} answer-mark [{}] block [{}] opacity {}",
                view.mark_classes().join(" "),
                view.block_classes().join(" "),
                view.block_opacity
            )
        });
        votes.chain(marks).collect()
    }
}

#[cfg(test)]
#[path = "presenter_test.rs"]
mod tests;
