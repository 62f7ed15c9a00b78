//! Shared HTTP client construction and the fetched-response wrapper
//!
//! All network access in the engine goes through [`fetch`]: a GET that
//! completes once response headers arrive and can be cancelled mid-flight.
//! The body stays unconsumed inside [`FetchedResponse`] until a handler asks
//! for it — a raw audio response (an infinite live stream) must never be
//! drained just to inspect its headers.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "tuneresolve/0.1.0";

/// Build the engine's default `reqwest::Client`.
///
/// Callers that want connection-pool sharing or proxy settings can pass
/// their own client to the builder instead.
pub fn default_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Issue a GET for `uri`, racing the request against the cancellation token.
///
/// Returns once headers have arrived; the body remains a stream inside the
/// returned [`FetchedResponse`].
pub async fn fetch(
    client: &Client,
    uri: &Url,
    token: &CancellationToken,
) -> Result<FetchedResponse> {
    if token.is_cancelled() {
        return Err(Error::Cancelled);
    }

    debug!(%uri, "GET");

    match token.run_until_cancelled(client.get(uri.clone()).send()).await {
        None => Err(Error::Cancelled),
        Some(Err(err)) => Err(Error::Http(err)),
        Some(Ok(response)) => Ok(FetchedResponse::new(uri.clone(), response)),
    }
}

/// An HTTP response whose body has not been consumed yet.
///
/// Status, headers and content type are snapshotted eagerly; the body text is
/// read at most once and memoized, so several handlers can inspect the same
/// response and only the one that actually needs the body pays for it.
pub struct FetchedResponse {
    requested_uri: Url,
    status: StatusCode,
    headers: HeaderMap,
    content_type: Option<String>,
    body: OnceCell<String>,
    response: Mutex<Option<reqwest::Response>>,
}

impl FetchedResponse {
    pub(crate) fn new(requested_uri: Url, response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .split(';')
                    .next()
                    .unwrap_or(value)
                    .trim()
                    .to_ascii_lowercase()
            });

        Self {
            requested_uri,
            status,
            headers,
            content_type,
            body: OnceCell::new(),
            response: Mutex::new(Some(response)),
        }
    }

    /// The URI this response was requested with (before any redirect).
    pub fn requested_uri(&self) -> &Url {
        &self.requested_uri
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The declared media type, lowercased and stripped of parameters
    /// (`audio/x-mpegurl; charset=utf-8` becomes `audio/x-mpegurl`).
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// First value of `name` that parses as a header string.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Read the response body as text, memoized.
    ///
    /// The first call consumes the body stream; later calls return the same
    /// string. Cancellation mid-read surfaces as [`Error::Cancelled`].
    pub async fn text(&self, token: &CancellationToken) -> Result<&str> {
        let body = self
            .body
            .get_or_try_init(|| async {
                let response = self
                    .response
                    .lock()
                    .await
                    .take()
                    .ok_or(Error::BodyConsumed)?;

                match token.run_until_cancelled(response.text()).await {
                    None => Err(Error::Cancelled),
                    Some(result) => result.map_err(Error::Http),
                }
            })
            .await?;

        Ok(body.as_str())
    }
}

impl std::fmt::Debug for FetchedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedResponse")
            .field("requested_uri", &self.requested_uri.as_str())
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
