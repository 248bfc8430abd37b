//! Gallery client: one request in, one classified reply out.
//!
//! Every metadata call (access probe, album pages, photo pages) goes through
//! [`GalleryClient::fetch_page`], which never retries and never interprets
//! the payload beyond finding its envelope.
//!
//! # Classification
//!
//! | reply | result |
//! |-------|--------|
//! | content type other than `application/json` | [`GalleryResult::NoAccess`] |
//! | JSON with a `ygError` envelope | [`GalleryResult::ServerError`] |
//! | JSON without a `ygData` envelope | [`GalleryResult::NoData`] |
//! | JSON with `ygData` | [`GalleryResult::Success`] |

mod error;
pub(crate) mod payload;
mod site;

pub use error::GalleryError;
pub use site::{DEFAULT_API_BASE, DEFAULT_WEB_BASE, Endpoint, GroupSite};

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::transport::{DocumentResponse, Transport};

const JSON_MEDIA_TYPE: &str = "application/json";
const ERROR_ENVELOPE: &str = "ygError";
const DATA_ENVELOPE: &str = "ygData";

/// Classified outcome of one gallery request.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryResult {
    /// The data envelope's contents.
    Success(Value),
    /// The reply was not JSON; the session is not logged in or not a member.
    NoAccess,
    /// The server answered with a structured error.
    ServerError {
        /// Status reported inside the error envelope.
        http_status: u16,
        /// Message reported inside the error envelope, verbatim.
        message: String,
    },
    /// Well-formed JSON without any data.
    NoData,
}

/// Issues gallery requests for one group over a shared transport.
#[derive(Clone)]
pub struct GalleryClient {
    transport: Arc<dyn Transport>,
    site: GroupSite,
}

impl std::fmt::Debug for GalleryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryClient")
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

impl GalleryClient {
    /// Creates a client for `site`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, site: GroupSite) -> Self {
        Self { transport, site }
    }

    /// The gallery this client talks to.
    #[must_use]
    pub fn site(&self) -> &GroupSite {
        &self.site
    }

    /// Fetches one page of `endpoint` and classifies the reply.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError`] when the request fails outright or a JSON
    /// reply does not parse.
    #[instrument(level = "debug", skip(self), fields(group = %self.site.group()))]
    pub async fn fetch_page(
        &self,
        endpoint: Endpoint,
        offset: u64,
        count: u64,
    ) -> Result<GalleryResult, GalleryError> {
        let url = self.site.page_url(endpoint, offset, count);
        let response = self.transport.get_document(&url).await?;
        let result = classify(&response).map_err(|e| GalleryError::invalid_json(&url, e))?;
        debug!(outcome = outcome_label(&result), "page classified");
        Ok(result)
    }
}

/// Classifies a raw metadata reply.
///
/// # Errors
///
/// Returns the parser error when a JSON-labelled body is not valid JSON.
pub fn classify(response: &DocumentResponse) -> Result<GalleryResult, serde_json::Error> {
    if response.media_type() != Some(JSON_MEDIA_TYPE) {
        return Ok(GalleryResult::NoAccess);
    }

    let mut document: Value = serde_json::from_slice(&response.body)?;

    if let Some(error) = document.get(ERROR_ENVELOPE) {
        return Ok(GalleryResult::ServerError {
            http_status: error.get("httpStatus").map_or(0, status_code),
            message: error
                .get("errorMessage")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    match document.get_mut(DATA_ENVELOPE) {
        Some(data) => Ok(GalleryResult::Success(data.take())),
        None => Ok(GalleryResult::NoData),
    }
}

/// Reads a status that may be encoded as a number or a numeric string.
fn status_code(value: &Value) -> u16 {
    let raw = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    raw.and_then(|n| u16::try_from(n).ok()).unwrap_or(0)
}

fn outcome_label(result: &GalleryResult) -> &'static str {
    match result {
        GalleryResult::Success(_) => "success",
        GalleryResult::NoAccess => "no-access",
        GalleryResult::ServerError { .. } => "server-error",
        GalleryResult::NoData => "no-data",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_reply(body: &Value) -> DocumentResponse {
        DocumentResponse {
            content_type: Some("application/json;charset=utf-8".to_string()),
            body: serde_json::to_vec(body).unwrap(),
        }
    }

    #[test]
    fn test_classify_html_reply_is_no_access() {
        let response = DocumentResponse {
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: b"<html>login</html>".to_vec(),
        };
        assert_eq!(classify(&response).unwrap(), GalleryResult::NoAccess);
    }

    #[test]
    fn test_classify_missing_content_type_is_no_access() {
        let response = DocumentResponse {
            content_type: None,
            body: b"{}".to_vec(),
        };
        assert_eq!(classify(&response).unwrap(), GalleryResult::NoAccess);
    }

    #[test]
    fn test_classify_error_envelope_with_numeric_string_status() {
        let reply = json_reply(&json!({
            "ygError": {"httpStatus": "404", "errorMessage": "ResourceNotFoundException{resourceType=GROUP Group..."}
        }));
        assert_eq!(
            classify(&reply).unwrap(),
            GalleryResult::ServerError {
                http_status: 404,
                message: "ResourceNotFoundException{resourceType=GROUP Group...".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_error_envelope_wins_over_data() {
        let reply = json_reply(&json!({
            "ygError": {"httpStatus": 500, "errorMessage": "boom"},
            "ygData": {"total": 1}
        }));
        assert!(matches!(
            classify(&reply).unwrap(),
            GalleryResult::ServerError { http_status: 500, .. }
        ));
    }

    #[test]
    fn test_classify_missing_data_is_no_data() {
        let reply = json_reply(&json!({"something": "else"}));
        assert_eq!(classify(&reply).unwrap(), GalleryResult::NoData);
    }

    #[test]
    fn test_classify_success_returns_data_envelope() {
        let reply = json_reply(&json!({"ygData": {"total": 3, "albums": []}}));
        assert_eq!(
            classify(&reply).unwrap(),
            GalleryResult::Success(json!({"total": 3, "albums": []}))
        );
    }

    #[test]
    fn test_classify_invalid_json_is_error() {
        let response = DocumentResponse {
            content_type: Some("application/json".to_string()),
            body: b"{not json".to_vec(),
        };
        assert!(classify(&response).is_err());
    }

    #[test]
    fn test_status_code_out_of_range_is_zero() {
        assert_eq!(status_code(&json!(70000)), 0);
        assert_eq!(status_code(&json!(null)), 0);
        assert_eq!(status_code(&json!(" 503 ")), 503);
    }
}
