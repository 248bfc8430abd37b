//! Resumable photo downloads.
//!
//! For every photo the orchestrator:
//!
//! 1. resolves `<output>/<albumId> - <album name>/<filename>`, creating the
//!    album directory when missing;
//! 2. skips the photo when that file already exists (the resume contract);
//! 3. otherwise fetches the selected variant as a download, with a referer
//!    pointing at the album page, and writes the body in one go.
//!
//! A refused transfer only affects its own photo. Rerunning the batch is the
//! retry mechanism; already saved photos are skipped by step 2.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use super::constants::DOWNLOAD_INTENT_QUERY;
use super::error::DownloadError;
use super::filename::{album_dir_name, build_filename};
use crate::audit::{AuditLog, DownloadRecord};
use crate::catalog::{Album, Photo};
use crate::gallery::GroupSite;
use crate::transport::Transport;

/// What happened to one photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The destination already existed; nothing was fetched.
    Skipped,
    /// The photo was fetched and written.
    Success,
    /// The fetch did not return HTTP 200. `None` when no response arrived at all.
    TransferError {
        /// Status returned by the server.
        status: Option<u16>,
    },
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("skipped"),
            Self::Success => f.write_str("success"),
            Self::TransferError { .. } => f.write_str("transfer-error"),
        }
    }
}

/// Outcome and destination of one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub outcome: DownloadOutcome,
    pub path: PathBuf,
}

/// Which album a batch belongs to.
#[derive(Debug, Clone, Copy)]
pub enum DownloadScope<'a> {
    /// Every photo comes from this album.
    Album(&'a Album),
    /// Photos from the whole group; their albums are looked up in this catalog.
    Group(&'a [Album]),
}

impl DownloadScope<'_> {
    /// Album ID and (when known) album name for `photo`.
    #[must_use]
    pub fn album_for(&self, photo: &Photo) -> (u64, Option<&str>) {
        match self {
            Self::Album(album) => (album.id, Some(album.name.as_str())),
            Self::Group(albums) => {
                let name = albums
                    .iter()
                    .find(|album| album.id == photo.album_id)
                    .map(|album| album.name.as_str());
                (photo.album_id, name)
            }
        }
    }
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn count(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Skipped => self.skipped += 1,
            DownloadOutcome::Success => self.succeeded += 1,
            DownloadOutcome::TransferError { .. } => self.failed += 1,
        }
    }

    /// Photos processed, whatever their outcome.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

/// Downloads photos of one group into an output directory.
#[derive(Clone)]
pub struct Downloader {
    transport: Arc<dyn Transport>,
    site: GroupSite,
    output_dir: PathBuf,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("site", &self.site)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, site: GroupSite, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            site,
            output_dir: output_dir.into(),
        }
    }

    /// Creates (if needed) and returns the directory for an album.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] if the directory cannot be created.
    pub async fn album_dir(
        &self,
        album_id: u64,
        album_name: Option<&str>,
    ) -> Result<PathBuf, DownloadError> {
        let dir = self.output_dir.join(album_dir_name(album_id, album_name));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DownloadError::io(dir.clone(), e))?;
        Ok(dir)
    }

    /// Downloads one photo into its album directory.
    ///
    /// With `filename_override` the photo is saved under that path (relative
    /// paths resolve against the output directory) instead; its missing parent
    /// directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] when the directory or file cannot be
    /// written. Refused transfers are reported through the outcome.
    pub async fn download_one(
        &self,
        photo: &Photo,
        scope: DownloadScope<'_>,
        filename_override: Option<&Path>,
    ) -> Result<DownloadReport, DownloadError> {
        let (album_id, album_name) = scope.album_for(photo);
        let destination = match filename_override {
            Some(path) => {
                let destination = self.output_dir.join(path);
                if let Some(parent) = destination.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| DownloadError::io(parent, e))?;
                }
                destination
            }
            None => self.album_dir(album_id, album_name).await?.join(build_filename(photo)),
        };
        self.fetch_to(photo, album_id, destination).await
    }

    /// Downloads every photo in order, continuing past refused transfers.
    ///
    /// When `audit` is given, every attempted (non-skipped) download is logged.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] on local I/O failures or when the audit log
    /// cannot be written; those stop the batch.
    #[instrument(skip_all, fields(photos = photos.len()))]
    pub async fn download_all(
        &self,
        photos: &[Photo],
        scope: DownloadScope<'_>,
        mut audit: Option<&mut AuditLog>,
    ) -> Result<BatchSummary, DownloadError> {
        let mut summary = BatchSummary::default();

        for photo in photos {
            let (album_id, album_name) = scope.album_for(photo);
            let dir = self.album_dir(album_id, album_name).await?;
            let report = self
                .fetch_to(photo, album_id, dir.join(build_filename(photo)))
                .await?;

            if report.outcome != DownloadOutcome::Skipped
                && let Some(log) = audit.as_deref_mut()
            {
                log.record(&DownloadRecord::new(photo, &report.outcome, &report.path))?;
            }
            summary.count(report.outcome);
        }

        info!(
            succeeded = summary.succeeded,
            skipped = summary.skipped,
            failed = summary.failed,
            "batch finished"
        );
        Ok(summary)
    }

    #[instrument(skip(self, photo, destination), fields(photo_id = photo.id, path = %destination.display()))]
    async fn fetch_to(
        &self,
        photo: &Photo,
        referer_album_id: u64,
        destination: PathBuf,
    ) -> Result<DownloadReport, DownloadError> {
        if is_existing_file(&destination).await? {
            info!("file already exists, skipping download");
            return Ok(DownloadReport {
                outcome: DownloadOutcome::Skipped,
                path: destination,
            });
        }

        let url = download_url(&photo.selected().url);
        let headers = self.referer_headers(referer_album_id);
        let response = match self.transport.get_bytes(&url, headers).await {
            Ok(response) => response,
            Err(error) if error.is_transfer_failure() => {
                warn!(%error, "transfer failed");
                return Ok(DownloadReport {
                    outcome: DownloadOutcome::TransferError { status: None },
                    path: destination,
                });
            }
            Err(error) => return Err(error),
        };

        if response.status != 200 {
            warn!(status = response.status, "server refused transfer");
            return Ok(DownloadReport {
                outcome: DownloadOutcome::TransferError {
                    status: Some(response.status),
                },
                path: destination,
            });
        }

        write_new_file(&destination, &response.body).await?;
        info!(bytes = response.body.len(), "downloaded");
        Ok(DownloadReport {
            outcome: DownloadOutcome::Success,
            path: destination,
        })
    }

    fn referer_headers(&self, album_id: u64) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&self.site.album_referer(album_id)) {
            Ok(value) => {
                headers.insert(REFERER, value);
            }
            Err(_) => debug!(album_id, "referer is not a valid header value; omitting"),
        }
        headers
    }
}

/// Variant URL with the download-intent marker appended.
fn download_url(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{DOWNLOAD_INTENT_QUERY}")
}

/// True when `path` is a regular file. A directory at `path` never counts as
/// an already saved photo.
async fn is_existing_file(path: &Path) -> Result<bool, DownloadError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(DownloadError::io(path, e)),
    }
}

/// Writes `body` to a file that must not exist yet.
///
/// A failed write removes the partial file so the resume check never mistakes
/// it for a finished download.
async fn write_new_file(path: &Path, body: &[u8]) -> Result<(), DownloadError> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                debug!(path = %path.display(), "destination appeared after the existence check");
            }
            DownloadError::io(path, e)
        })?;

    let written = async {
        file.write_all(body).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        let _ = tokio::fs::remove_file(path).await;
        return Err(DownloadError::io(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: u64, name: &str) -> Album {
        Album {
            id,
            name: name.to_string(),
            description: String::new(),
            creator: String::new(),
            photo_count: 0,
        }
    }

    fn photo(album_id: u64) -> Photo {
        Photo::new(
            1,
            album_id,
            "p".to_string(),
            "p.jpg".to_string(),
            "image/jpeg".to_string(),
            String::new(),
            String::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_download_url_appends_marker() {
        assert_eq!(download_url("https://img/x.jpg"), "https://img/x.jpg?download=1");
        assert_eq!(download_url("https://img/x.jpg?s=1"), "https://img/x.jpg?s=1&download=1");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(DownloadOutcome::Skipped.to_string(), "skipped");
        assert_eq!(DownloadOutcome::Success.to_string(), "success");
        assert_eq!(
            DownloadOutcome::TransferError { status: Some(404) }.to_string(),
            "transfer-error"
        );
        assert_eq!(
            DownloadOutcome::TransferError { status: None }.to_string(),
            "transfer-error"
        );
    }

    #[test]
    fn test_scope_album_uses_selected_album() {
        let selected = album(3, "Trip");
        let scope = DownloadScope::Album(&selected);
        assert_eq!(scope.album_for(&photo(3)), (3, Some("Trip")));
    }

    #[test]
    fn test_scope_group_looks_up_album_per_photo() {
        let albums = vec![album(3, "Trip"), album(4, "Party")];
        let scope = DownloadScope::Group(&albums);
        assert_eq!(scope.album_for(&photo(4)), (4, Some("Party")));
        assert_eq!(scope.album_for(&photo(99)), (99, None));
    }

    #[test]
    fn test_batch_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.count(DownloadOutcome::Success);
        summary.count(DownloadOutcome::Skipped);
        summary.count(DownloadOutcome::TransferError { status: Some(500) });
        summary.count(DownloadOutcome::Success);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[tokio::test]
    async fn test_directory_is_not_an_existing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!is_existing_file(temp.path()).await.unwrap());
        assert!(!is_existing_file(&temp.path().join("missing.jpg")).await.unwrap());
        let file = temp.path().join("a.jpg");
        std::fs::write(&file, b"x").unwrap();
        assert!(is_existing_file(&file).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_new_file_never_overwrites() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("a.jpg");
        std::fs::write(&path, b"original").unwrap();

        let result = write_new_file(&path, b"replacement").await;
        assert!(matches!(result, Err(DownloadError::Io { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), b"original");
    }
}
