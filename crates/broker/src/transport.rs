//! HTTP transport used to talk to the platform API
//!
//! The transport is a trait so the credential fetcher and the platform
//! lookup can run against in-memory doubles in tests.

use async_trait::async_trait;
use cf_vault_core::{Error, Result};
use reqwest::header::AUTHORIZATION;
use url::Url;

/// A fully read HTTP response
///
/// The body is drained inside the transport call, so the connection is
/// released before the caller looks at the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code
    pub status: u16,
    /// Status line as shown to users, e.g. `403 Forbidden`
    pub status_text: String,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response with the canonical reason phrase for `status`
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .map(|code| code.to_string())
            .unwrap_or_else(|_| status.to_string());
        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// Whether the status is exactly 200 OK
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for issuing authenticated GET requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` with the `Authorization` header set to `authorization` verbatim
    async fn get(&self, url: &Url, authorization: &str) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url, authorization: &str) -> Result<HttpResponse> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(url.as_str(), format!("failed to read body: {e}")))?;

        tracing::debug!(url = %url, status = %status, bytes = body.len(), "Response received");

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.to_string(),
            body: body.to_vec(),
        })
    }
}
