//! The network capability shared by the gallery client and the downloader.
//!
//! Metadata requests only care about the content type and body of a reply;
//! photo transfers only care about the status code and body. Both go through
//! one [`Transport`] so a run holds exactly one session, and tests can swap in
//! an in-memory implementation.

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::download::DownloadError;

/// Reply to a metadata request.
#[derive(Debug, Clone, Default)]
pub struct DocumentResponse {
    /// Raw `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl DocumentResponse {
    /// Media type without parameters (`application/json; charset=utf-8` → `application/json`).
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(|value| value.split(';').next().unwrap_or("").trim())
    }
}

/// Reply to a byte transfer.
#[derive(Debug, Clone, Default)]
pub struct BytesResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body. Only meaningful when `status == 200`.
    pub body: Vec<u8>,
}

/// Single-shot GET capability with the run's credentials attached.
///
/// Implementations must not retry; callers decide what a failure means.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches a metadata document.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] when no response could be obtained.
    async fn get_document(&self, url: &str) -> Result<DocumentResponse, DownloadError>;

    /// Fetches raw bytes with extra request headers.
    ///
    /// Non-success statuses are returned as data, not as errors.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] when no response could be obtained.
    async fn get_bytes(&self, url: &str, headers: HeaderMap) -> Result<BytesResponse, DownloadError>;
}
