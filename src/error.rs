//! Error types.
//!
//! Every submission failure collapses into one of two user-facing kinds:
//! permission denied (HTTP 403) or a generic transport/server failure.
//! Nothing here is retryable.

use crate::widget::WidgetId;

// =============================================================================
// SUBMIT ERROR
// =============================================================================

/// Errors produced by a vote or answer-mark submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The endpoint answered 403.
    #[error("permission denied")]
    PermissionDenied,

    /// The endpoint answered with a non-success status other than 403.
    #[error("endpoint returned status {status}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No widget with this id is registered on the page.
    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),
}

/// User-facing classification of a [`SubmitError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    TransportOrServer,
}

impl SubmitError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied => ErrorKind::PermissionDenied,
            Self::Status { .. } | Self::Transport(_) | Self::MalformedResponse(_) | Self::UnknownWidget(_) => {
                ErrorKind::TransportOrServer
            }
        }
    }

    /// Map a non-success HTTP status to its error.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 403 { Self::PermissionDenied } else { Self::Status { status, body } }
    }
}

// =============================================================================
// CONFIG ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
