//! Cookie store access for the CSRF token.
//!
//! The token is looked up on every request and never cached, so a cookie
//! rotated between two clicks is picked up by the second one.

use std::sync::RwLock;

/// Read-only view of the page's cookies.
pub trait CookieSource: Send + Sync {
    /// Return the URL-decoded value of the cookie `name`, if present.
    fn cookie(&self, name: &str) -> Option<String>;
}

impl<C: CookieSource + ?Sized> CookieSource for std::sync::Arc<C> {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}

/// Find `name` in a `document.cookie`-style string (`a=1; b=2`) and
/// URL-decode its value.
///
/// The first matching pair wins. A value that does not decode to UTF-8 is
/// treated as absent.
#[must_use]
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')))
        .and_then(|raw| urlencoding::decode(raw).ok())
        .map(std::borrow::Cow::into_owned)
}

// =============================================================================
// COOKIE JAR
// =============================================================================

/// In-memory cookie string that can be replaced while the controller runs.
#[derive(Debug, Default)]
pub struct CookieJar {
    raw: RwLock<String>,
}

impl CookieJar {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: RwLock::new(raw.into()) }
    }

    /// Replace the whole cookie string.
    pub fn replace(&self, raw: impl Into<String>) {
        let mut guard = self.raw.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = raw.into();
    }
}

impl CookieSource for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        let guard = self.raw.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        find_cookie(&guard, name)
    }
}

#[cfg(test)]
#[path = "cookie_test.rs"]
mod tests;
