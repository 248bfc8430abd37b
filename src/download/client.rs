//! HTTP client wrapper: the run's single network session.
//!
//! This module provides the `HttpClient` struct which carries the cookie jar,
//! the mimicked browser User-Agent and the timeout policy, and implements
//! [`Transport`] for both metadata and photo requests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::transport::{BytesResponse, DocumentResponse, Transport};
use crate::user_agent::Browser;

/// Construction options for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// Browser whose User-Agent is sent.
    pub browser: Browser,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            browser: Browser::default(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

/// HTTP session reused for every request of a run.
///
/// Requests are issued one at a time; the session exists for connection reuse
/// and to attach cookies, never for parallelism.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn new(options: &HttpClientOptions) -> Result<Self, DownloadError> {
        build_client(None, options)
    }

    /// Creates a client that attaches cookies from `cookie_jar` to matching requests.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend cannot be initialized.
    #[instrument(level = "debug", skip(cookie_jar))]
    pub fn with_cookie_jar(
        cookie_jar: Arc<Jar>,
        options: &HttpClientOptions,
    ) -> Result<Self, DownloadError> {
        build_client(Some(cookie_jar), options)
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(level = "debug", skip(self))]
    async fn get_document(&self, url: &str) -> Result<DocumentResponse, DownloadError> {
        let url = validate_url(url)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::network(url.as_str(), e))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::network(url.as_str(), e))?;

        debug!(status, content_type = ?content_type, bytes = body.len(), "document received");
        Ok(DocumentResponse {
            content_type,
            body: body.to_vec(),
        })
    }

    #[instrument(level = "debug", skip(self, headers))]
    async fn get_bytes(&self, url: &str, headers: HeaderMap) -> Result<BytesResponse, DownloadError> {
        let url = validate_url(url)?;
        let response = self
            .client
            .get(url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| DownloadError::network(url.as_str(), e))?;

        let status = response.status().as_u16();
        if status != 200 {
            debug!(status, "transfer refused");
            return Ok(BytesResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::network(url.as_str(), e))?;
        debug!(status, bytes = body.len(), "transfer received");
        Ok(BytesResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn validate_url(url: &str) -> Result<Url, DownloadError> {
    let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(DownloadError::invalid_url(url)),
    }
}

fn build_client(
    cookie_jar: Option<Arc<Jar>>,
    options: &HttpClientOptions,
) -> Result<HttpClient, DownloadError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
        .timeout(Duration::from_secs(options.read_timeout_secs))
        .gzip(true)
        .user_agent(options.browser.user_agent());
    if let Some(jar) = cookie_jar {
        builder = builder.cookie_provider(jar);
    }
    let client = builder
        .build()
        .map_err(|source| DownloadError::ClientBuild { source })?;
    Ok(HttpClient { client })
}
