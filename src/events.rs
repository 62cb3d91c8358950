//! State-change notifications for the rendering layer.
//!
//! Every phase or display change is published as a full widget snapshot.
//! Subscribers that fall behind lose the oldest snapshots, which is safe
//! because each snapshot supersedes the previous one for its widget.

use tokio::sync::broadcast;

use crate::widget::{AnswerMarkWidget, VoteWidget};

pub const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    Vote(VoteWidget),
    AnswerMark(AnswerMarkWidget),
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Publish a snapshot. Having no subscribers is not an error.
    pub fn publish(&self, event: WidgetEvent) {
        let _ = self.tx.send(event);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
