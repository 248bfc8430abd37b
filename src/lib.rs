//! Group Photos Core Library
//!
//! Catalogs and bulk-downloads the photo gallery of a members-only group.
//!
//! # Architecture
//!
//! - [`gallery`] - One request against the group's JSON API, classified into a [`GalleryResult`]
//! - [`catalog`] - Paginated aggregation of albums and photos, lookups by name or ID
//! - [`download`] - HTTP session, filename policy and the resumable download loop
//! - [`audit`] - CSV log of attempted downloads
//! - [`export`] - CSV exports of album and photo catalogs
//! - [`auth`] - Netscape cookie file loading
//! - [`transport`] - The fetch capability everything above is written against

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod auth;
pub mod catalog;
pub mod download;
pub mod export;
pub mod gallery;
pub mod transport;
pub mod user_agent;

// Re-export commonly used types
pub use audit::{AuditError, AuditLog, DownloadRecord};
pub use auth::{CookieError, load_cookie_file};
pub use catalog::{Album, CatalogError, Lookup, Photo, PhotoVariant, select_best};
pub use download::{
    BatchSummary, DownloadError, DownloadOutcome, DownloadScope, Downloader, HttpClient,
    HttpClientOptions,
};
pub use export::{ExportError, write_albums_csv, write_photos_csv};
pub use gallery::{GalleryClient, GalleryResult, GroupSite};
pub use transport::Transport;
pub use user_agent::Browser;
