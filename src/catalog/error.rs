//! Why a catalog could not be assembled.

use thiserror::Error;

use crate::gallery::{GalleryError, GalleryResult};

/// Message prefix the server uses when the group itself does not exist.
const GROUP_NOT_FOUND_PREFIX: &str = "ResourceNotFoundException{resourceType=GROUP";

/// A catalog fetch that was abandoned. Nothing fetched before the failure is kept.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The gallery did not answer with JSON: not logged in, or not a member.
    #[error("no access to the group (are the cookies from a logged-in session?)")]
    NoAccess,

    /// The gallery reported a structured error.
    #[error("server returned error code {http_status} and error message '{message}'")]
    Server {
        /// Reported status.
        http_status: u16,
        /// Reported message, verbatim.
        message: String,
    },

    /// The gallery answered without data.
    #[error("the server returned no data")]
    NoData,

    /// A page carried data in an unexpected shape.
    #[error("unexpected page layout from {url}: {source}")]
    MalformedPage {
        /// Requested URL.
        url: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The request itself failed.
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

impl CatalogError {
    /// Converts a non-success classification into an error.
    ///
    /// Returns `None` for [`GalleryResult::Success`].
    #[must_use]
    pub fn from_result(result: GalleryResult) -> Option<Self> {
        match result {
            GalleryResult::Success(_) => None,
            GalleryResult::NoAccess => Some(Self::NoAccess),
            GalleryResult::ServerError {
                http_status,
                message,
            } => Some(Self::Server {
                http_status,
                message,
            }),
            GalleryResult::NoData => Some(Self::NoData),
        }
    }

    /// Creates a malformed-page error.
    pub fn malformed(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedPage {
            url: url.into(),
            source,
        }
    }

    /// True for the server's "group does not exist" error.
    #[must_use]
    pub fn is_group_not_found(&self) -> bool {
        matches!(
            self,
            Self::Server { http_status: 404, message } if message.starts_with(GROUP_NOT_FOUND_PREFIX)
        )
    }
}
