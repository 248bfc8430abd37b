//! Constants for the download module (timeouts, request markers).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large originals).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Query string appended to a variant URL to request the file as a download.
pub const DOWNLOAD_INTENT_QUERY: &str = "download=1";
