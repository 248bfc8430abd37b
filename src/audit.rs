//! CSV audit trail of bulk download attempts.
//!
//! One row per photo whose fetch was actually attempted. Photos skipped
//! because their file already exists leave no trace, so a rerun over a fully
//! downloaded catalog adds nothing to the log.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::catalog::Photo;
use crate::download::DownloadOutcome;

/// Errors writing the audit log.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log file could not be opened.
    #[error("cannot open audit log {path}: {source}")]
    Open {
        /// Log path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A row could not be written.
    #[error("cannot write audit log {path}: {source}")]
    Write {
        /// Log path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
}

/// One audit row: the photo's catalog fields, the outcome and where it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "albumID")]
    pub album_id: u64,
    pub name: String,
    /// Original filename as reported by the server.
    pub yahoo_filename: String,
    pub filetype: String,
    pub description: String,
    pub creator: String,
    pub height: u64,
    pub width: u64,
    pub filesize: u64,
    pub result: String,
    pub saved_filename: String,
}

impl DownloadRecord {
    /// Builds the row for an attempted download of `photo`.
    #[must_use]
    pub fn new(photo: &Photo, outcome: &DownloadOutcome, saved_path: &Path) -> Self {
        let best = photo.selected();
        Self {
            id: photo.id,
            album_id: photo.album_id,
            name: photo.name.clone(),
            yahoo_filename: photo.filename.clone(),
            filetype: photo.content_type.clone(),
            description: photo.description.clone(),
            creator: photo.creator.clone(),
            height: best.height,
            width: best.width,
            filesize: best.size,
            result: outcome.to_string(),
            saved_filename: saved_path.display().to_string(),
        }
    }
}

/// Append-only CSV audit log.
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl AuditLog {
    /// Opens `path` for appending; the header row is written only to a new or empty file.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Open`] if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::Open {
                path: path.clone(),
                source,
            })?;
        let is_empty = file
            .metadata()
            .map_err(|source| AuditError::Open {
                path: path.clone(),
                source,
            })?
            .len()
            == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);
        debug!(path = %path.display(), new_file = is_empty, "audit log opened");
        Ok(Self {
            path,
            writer,
            rows_written: 0,
        })
    }

    /// Appends one row and flushes it to disk.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Write`] if serialization or the write fails.
    pub fn record(&mut self, record: &DownloadRecord) -> Result<(), AuditError> {
        self.writer
            .serialize(record)
            .map_err(|source| self.write_error(source))?;
        self.writer
            .flush()
            .map_err(|source| self.write_error(csv::Error::from(source)))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Rows appended through this handle.
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Log path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: csv::Error) -> AuditError {
        AuditError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PhotoVariant;
    use tempfile::TempDir;

    fn photo() -> Photo {
        Photo::new(
            5,
            9,
            "Sunset, beach".to_string(),
            "sunset.jpg".to_string(),
            "image/jpeg".to_string(),
            "ann".to_string(),
            "golden hour".to_string(),
            vec![PhotoVariant::new(480, 640, 1234, "https://img/5".to_string())],
        )
    }

    #[test]
    fn test_record_row_has_fixed_columns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.csv");
        let mut log = AuditLog::open(&path).unwrap();
        let saved = PathBuf::from("9 - Album/sunset.jpg");
        log.record(&DownloadRecord::new(&photo(), &DownloadOutcome::Success, &saved))
            .unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,albumID,name,yahoo_filename,filetype,description,creator,height,width,filesize,result,saved_filename"
        );
        assert_eq!(
            lines.next().unwrap(),
            "5,9,\"Sunset, beach\",sunset.jpg,image/jpeg,golden hour,ann,480,640,1234,success,9 - Album/sunset.jpg"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_reopen_appends_without_second_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.csv");
        let saved = PathBuf::from("a.jpg");

        let mut first = AuditLog::open(&path).unwrap();
        first
            .record(&DownloadRecord::new(&photo(), &DownloadOutcome::Success, &saved))
            .unwrap();
        drop(first);

        let mut second = AuditLog::open(&path).unwrap();
        second
            .record(&DownloadRecord::new(
                &photo(),
                &DownloadOutcome::TransferError { status: Some(500) },
                &saved,
            ))
            .unwrap();
        assert_eq!(second.rows_written(), 1);
        drop(second);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3, "header plus two rows: {content}");
        assert_eq!(content.matches("ID,albumID").count(), 1);
        assert!(content.lines().nth(2).unwrap().contains(",transfer-error,"));
    }

    #[test]
    fn test_open_without_records_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.csv");
        let log = AuditLog::open(&path).unwrap();
        assert_eq!(log.rows_written(), 0);
        assert_eq!(log.path(), path.as_path());
        drop(log);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
