//! Thin HTTP GET client shared by the extractor and the analyzers.
//!
//! One `reqwest::Client` is built at startup and cloned into every
//! component; each call carries its own timeout. Non-success statuses are
//! returned as responses, not errors: a 404 page still has HTML worth
//! inspecting.

use reqwest::header::HeaderMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default user agent sent with every fetch.
pub const DEFAULT_USER_AGENT: &str = concat!("seo-lens/", env!("CARGO_PKG_VERSION"));

/// Errors raised while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("timed out fetching {0}")]
    Timeout(String),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A fetched page.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// URL after redirects.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body decoded as text.
    pub body: String,
}

/// Cloneable HTTP client. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client with the given user agent.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// GET `url`, bounding the whole exchange (headers and body) by `timeout`.
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<PageResponse, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        debug!(url, timeout_ms = timeout.as_millis() as u64, "fetching page");

        match tokio::time::timeout(timeout, self.fetch(parsed)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(url.to_string())),
        }
    }

    async fn fetch(&self, url: url::Url) -> Result<PageResponse, FetchError> {
        let url_str = url.to_string();
        let resp = self.client.get(url).send().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout(url_str.clone())
            } else {
                FetchError::Request {
                    url: url_str.clone(),
                    source,
                }
            }
        })?;

        let final_url = resp.url().to_string();
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|source| FetchError::Body {
            url: url_str.clone(),
            source,
        })?;

        debug!(url = %final_url, status, bytes = body.len(), "fetched page");

        Ok(PageResponse {
            url: final_url,
            status,
            headers,
            body,
        })
    }
}
