//! Photo transfers: the HTTP session, filename policy and the resumable
//! download orchestrator.
//!
//! # Features
//!
//! - One reusable session carrying the browser cookies and User-Agent
//! - Deterministic, sanitized destination names per album directory
//! - Resume by existence check: saved photos are never fetched or overwritten again
//! - Refused transfers isolated to their photo and recorded in the audit log
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use group_photos_core::download::{Downloader, DownloadScope, HttpClient, HttpClientOptions};
//! use group_photos_core::gallery::GroupSite;
//!
//! # async fn example(photos: Vec<group_photos_core::catalog::Photo>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpClient::new(&HttpClientOptions::default())?);
//! let downloader = Downloader::new(client, GroupSite::new("my-group"), "./photos");
//! let summary = downloader.download_all(&photos, DownloadScope::Group(&[]), None).await?;
//! println!("saved {} photos", summary.succeeded);
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
pub mod filename;
mod orchestrator;

pub use client::{HttpClient, HttpClientOptions};
pub use constants::{CONNECT_TIMEOUT_SECS, DOWNLOAD_INTENT_QUERY, READ_TIMEOUT_SECS};
pub use error::DownloadError;
pub use orchestrator::{BatchSummary, DownloadOutcome, DownloadReport, DownloadScope, Downloader};
