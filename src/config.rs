//! Widget client configuration parsed from environment variables.

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Optional HTTP timeouts. `None` leaves the client default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

/// Names of the cookie the token is read from and the header it is sent in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfNames {
    pub cookie: String,
    pub header: String,
}

impl Default for CsrfNames {
    fn default() -> Self {
        Self { cookie: DEFAULT_CSRF_COOKIE.to_string(), header: DEFAULT_CSRF_HEADER.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub base_url: String,
    pub csrf: CsrfNames,
    pub timeouts: Timeouts,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), csrf: CsrfNames::default(), timeouts: Timeouts::default() }
    }
}

impl WidgetConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `QA_BASE_URL`: site root, default `http://127.0.0.1:8000`
    /// - `QA_CSRF_COOKIE`: default `csrftoken`
    /// - `QA_CSRF_HEADER`: default `X-CSRFToken`
    /// - `QA_REQUEST_TIMEOUT_SECS`, `QA_CONNECT_TIMEOUT_SECS`: unset by default
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is set but is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("QA_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let csrf = CsrfNames {
            cookie: std::env::var("QA_CSRF_COOKIE").unwrap_or_else(|_| DEFAULT_CSRF_COOKIE.to_string()),
            header: std::env::var("QA_CSRF_HEADER").unwrap_or_else(|_| DEFAULT_CSRF_HEADER.to_string()),
        };
        let timeouts = Timeouts {
            request_secs: env_parse_secs("QA_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_secs("QA_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self { base_url, csrf, timeouts })
    }

    #[must_use]
    pub fn endpoints(&self) -> Endpoints<'_> {
        Endpoints { base_url: &self.base_url }
    }
}

fn env_parse_secs(key: &str) -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::Parse(format!("{key} must be a positive integer, got '{raw}'"))),
        Ok(secs) => Ok(Some(secs)),
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

/// What a vote widget is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTarget {
    Question,
    Answer,
}

/// URL layout of the backend's AJAX endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    base_url: &'a str,
}

impl Endpoints<'_> {
    #[must_use]
    pub fn vote(&self, target: VoteTarget) -> String {
        match target {
            VoteTarget::Question => format!("{}/vote/question", self.base_url),
            VoteTarget::Answer => format!("{}/vote/answer", self.base_url),
        }
    }

    #[must_use]
    pub fn answer_mark(&self, answer_id: i64) -> String {
        format!("{}/answer/mark/{answer_id}", self.base_url)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
