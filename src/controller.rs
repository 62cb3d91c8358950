//! Interactive widget controller.
//!
//! DESIGN
//! ======
//! One submission per click, guarded per widget. A click first takes the
//! registry lock and moves the widget `Idle -> Submitting`; a click on a
//! widget that is already submitting is dropped (`Submission::Skipped`)
//! without touching the network. The lock is released before the request
//! is sent and taken again once to apply the result and return to `Idle`.
//! Snapshots are published while the lock is held, so subscribers receive
//! them in the order the registry changed.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as `SubmitError` and are never retried. The return to
//! `Idle` is owned by an `InFlight` guard, so it also happens when the
//! submission future is dropped before the response arrives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::config::CsrfNames;
use crate::cookie::CookieSource;
use crate::error::SubmitError;
use crate::events::{EventBus, WidgetEvent};
use crate::page::PageManifest;
use crate::registry::WidgetRegistry;
use crate::transport::{PostRequest, Transport};
use crate::widget::{AnswerMarkWidget, VoteWidget, WidgetId};

/// Outcome of a click that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission<T> {
    /// The widget already had a request in flight; nothing was sent.
    Skipped,
    /// The request completed with this value.
    Completed(T),
}

#[derive(serde::Deserialize)]
struct VoteResponse {
    rating: i64,
}

#[derive(serde::Deserialize)]
struct MarkResponse {
    accepted: bool,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct WidgetController<T, C> {
    inner: Arc<Inner<T, C>>,
}

impl<T, C> Clone for WidgetController<T, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct Inner<T, C> {
    registry: Mutex<WidgetRegistry>,
    transport: T,
    cookies: C,
    csrf: CsrfNames,
    events: EventBus,
}

impl<T, C> Inner<T, C> {
    fn registry(&self) -> MutexGuard<'_, WidgetRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Transport, C: CookieSource> WidgetController<T, C> {
    #[must_use]
    pub fn new(transport: T, cookies: C, csrf: CsrfNames) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(WidgetRegistry::new()),
                transport,
                cookies,
                csrf,
                events: EventBus::new(),
            }),
        }
    }

    /// Build a controller attached to every widget the page rendered.
    #[must_use]
    pub fn for_page(page: PageManifest, transport: T, cookies: C, csrf: CsrfNames) -> Self {
        let controller = Self::new(transport, cookies, csrf);
        {
            let mut registry = controller.inner.registry();
            for widget in page.votes {
                registry.insert_vote(widget);
            }
            for widget in page.answer_marks {
                registry.insert_answer_mark(widget);
            }
        }
        controller
    }

    pub fn register_vote(&self, widget: VoteWidget) {
        self.inner.registry().insert_vote(widget);
    }

    pub fn register_answer_mark(&self, widget: AnswerMarkWidget) {
        self.inner.registry().insert_answer_mark(widget);
    }

    #[must_use]
    pub fn vote(&self, id: WidgetId) -> Option<VoteWidget> {
        self.inner.registry().vote(id).cloned()
    }

    #[must_use]
    pub fn answer_mark(&self, id: WidgetId) -> Option<AnswerMarkWidget> {
        self.inner.registry().answer_mark(id).cloned()
    }

    #[must_use]
    pub fn answer_marks(&self) -> Vec<AnswerMarkWidget> {
        self.inner.registry().answer_marks().cloned().collect()
    }

    /// Subscribe to widget snapshots published on every state change.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.inner.events.subscribe()
    }

    /// Cast `value` (typically `1` or `-1`) on a vote widget.
    ///
    /// Returns the new rating, or `Skipped` if the widget was busy.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::UnknownWidget`] if `id` is not a registered vote widget
    /// - [`SubmitError::PermissionDenied`] on HTTP 403
    /// - any other transport, status or decode failure
    pub async fn submit_vote(&self, id: WidgetId, value: i32) -> Result<Submission<i64>, SubmitError> {
        let widget = {
            let mut registry = self.inner.registry();
            let Some(widget) = registry.begin_vote(id)? else {
                debug!(widget = %id, "vote ignored; request in flight");
                return Ok(Submission::Skipped);
            };
            self.inner.events.publish(WidgetEvent::Vote(widget.clone()));
            widget
        };
        let mut flight = InFlight { inner: &self.inner, id, outcome: Outcome::Vote(None) };

        debug!(widget = %id, target_id = widget.target_id, value, "submitting vote");
        let request = PostRequest {
            url: widget.endpoint_url,
            headers: self.csrf_headers(),
            form: vec![("target_id".into(), widget.target_id.to_string()), ("value".into(), value.to_string())],
        };
        let result = match self.inner.transport.post_form(request).await {
            Ok(response) => response.json::<VoteResponse>().map(|body| body.rating),
            Err(e) => Err(e),
        };

        match result {
            Ok(rating) => {
                flight.outcome = Outcome::Vote(Some(rating));
                Ok(Submission::Completed(rating))
            }
            Err(e) => {
                warn!(widget = %id, error = %e, "vote failed");
                Err(e)
            }
        }
    }

    /// Toggle acceptance of the answer an answer-mark widget belongs to.
    ///
    /// Returns the server's `accepted` verdict, or `Skipped` if the widget
    /// was busy. Accepting clears every other answer-mark on the page.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::UnknownWidget`] if `id` is not a registered answer-mark
    /// - [`SubmitError::PermissionDenied`] on HTTP 403
    /// - any other transport, status or decode failure
    pub async fn submit_answer_mark(&self, id: WidgetId) -> Result<Submission<bool>, SubmitError> {
        let widget = {
            let mut registry = self.inner.registry();
            let Some(widget) = registry.begin_answer_mark(id)? else {
                debug!(widget = %id, "answer mark ignored; request in flight");
                return Ok(Submission::Skipped);
            };
            self.inner.events.publish(WidgetEvent::AnswerMark(widget.clone()));
            widget
        };
        let mut flight = InFlight { inner: &self.inner, id, outcome: Outcome::AnswerMark(None) };

        debug!(widget = %id, "submitting answer mark");
        let request = PostRequest { url: widget.endpoint_url, headers: self.csrf_headers(), form: Vec::new() };
        let result = match self.inner.transport.post_form(request).await {
            Ok(response) => response.json::<MarkResponse>().map(|body| body.accepted),
            Err(e) => Err(e),
        };

        match result {
            Ok(accepted) => {
                flight.outcome = Outcome::AnswerMark(Some(accepted));
                Ok(Submission::Completed(accepted))
            }
            Err(e) => {
                warn!(widget = %id, error = %e, "answer mark failed");
                Err(e)
            }
        }
    }

    /// CSRF header for one request, read from the cookie store each time.
    fn csrf_headers(&self) -> Vec<(String, String)> {
        match self.inner.cookies.cookie(&self.inner.csrf.cookie) {
            Some(token) => vec![(self.inner.csrf.header.clone(), token)],
            None => {
                debug!(cookie = %self.inner.csrf.cookie, "csrf cookie missing; sending without token");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// IN-FLIGHT GUARD
// =============================================================================

enum Outcome {
    Vote(Option<i64>),
    AnswerMark(Option<bool>),
}

/// Returns its widget to `Idle` on drop, applying `outcome` in the same
/// lock scope.
struct InFlight<'a, T, C> {
    inner: &'a Inner<T, C>,
    id: WidgetId,
    outcome: Outcome,
}

impl<T, C> Drop for InFlight<'_, T, C> {
    fn drop(&mut self) {
        let mut registry = self.inner.registry();
        let events: Vec<WidgetEvent> = match self.outcome {
            Outcome::Vote(rating) => registry.finish_vote(self.id, rating).map(WidgetEvent::Vote).into_iter().collect(),
            Outcome::AnswerMark(accepted) => registry
                .finish_answer_mark(self.id, accepted)
                .into_iter()
                .map(WidgetEvent::AnswerMark)
                .collect(),
        };
        // Published under the lock so subscribers see registry order.
        for event in events {
            self.inner.events.publish(event);
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
