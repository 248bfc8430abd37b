//! Errors raised before a gallery reply can be classified.

use thiserror::Error;

use crate::download::DownloadError;

/// A gallery request that produced no classifiable reply.
///
/// Classified failures (no access, server error, no data) are not errors at
/// this layer; they are [`GalleryResult`](super::GalleryResult) variants.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] DownloadError),

    /// The server labelled the reply as JSON but the body does not parse.
    #[error("invalid JSON from {url}: {source}")]
    InvalidJson {
        /// Requested URL.
        url: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}

impl GalleryError {
    /// Creates an invalid-JSON error.
    pub fn invalid_json(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            url: url.into(),
            source,
        }
    }
}
