//! HTTP transport for widget submissions.
//!
//! `Transport` is the seam between the controller and the network. The
//! `reqwest` implementation is a thin wrapper; status and body decoding
//! live on [`PostResponse`] so they stay testable without a server.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::Timeouts;
use crate::error::{ConfigError, SubmitError};

// =============================================================================
// WIRE TYPES
// =============================================================================

/// A form-encoded POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResponse {
    pub status: u16,
    pub body: String,
}

impl PostResponse {
    /// Decode a 2xx body as JSON.
    ///
    /// # Errors
    ///
    /// Non-2xx statuses map through [`SubmitError::from_status`]; a body that
    /// does not match `T` is [`SubmitError::MalformedResponse`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SubmitError> {
        if !(200..300).contains(&self.status) {
            return Err(SubmitError::from_status(self.status, self.body.clone()));
        }
        serde_json::from_str(&self.body).map_err(|e| SubmitError::MalformedResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one POST and return whatever status came back.
    ///
    /// Only failures that produce no response at all are errors here.
    async fn post_form(&self, request: PostRequest) -> Result<PostResponse, SubmitError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn post_form(&self, request: PostRequest) -> Result<PostResponse, SubmitError> {
        (**self).post_form(request).await
    }
}

// =============================================================================
// REQWEST
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client, applying only the timeouts that are configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(timeouts: Timeouts) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(&self, request: PostRequest) -> Result<PostResponse, SubmitError> {
        let mut builder = self
            .http
            .post(&request.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&request.form);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Ok(PostResponse { status, body })
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
