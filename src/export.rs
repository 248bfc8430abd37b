//! CSV exports of album and photo catalogs.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::catalog::{Album, Photo, PhotoRow};

/// Errors writing a catalog export.
#[derive(Debug, Error)]
#[error("cannot write catalog export {path}: {source}")]
pub struct ExportError {
    /// Export path.
    pub path: PathBuf,
    /// Underlying error.
    #[source]
    pub source: csv::Error,
}

/// Writes the album catalog with columns `ID,name,description,creator,photos`.
///
/// An existing file is replaced.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_albums_csv(path: &Path, albums: &[Album]) -> Result<(), ExportError> {
    write_rows(path, albums.iter())?;
    info!(path = %path.display(), rows = albums.len(), "album list exported");
    Ok(())
}

/// Writes the photo catalog with columns
/// `ID,albumID,name,filename,filetype,description,creator,height,width,filesize,url`.
///
/// Dimensions, size and URL are those of each photo's selected variant.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_photos_csv(path: &Path, photos: &[Photo]) -> Result<(), ExportError> {
    write_rows(path, photos.iter().map(PhotoRow::from))?;
    info!(path = %path.display(), rows = photos.len(), "photo list exported");
    Ok(())
}

fn write_rows<T: serde::Serialize>(
    path: &Path,
    rows: impl Iterator<Item = T>,
) -> Result<(), ExportError> {
    let wrap = |source: csv::Error| ExportError {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    for row in rows {
        writer.serialize(row).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(csv::Error::from(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PhotoVariant;
    use tempfile::TempDir;

    #[test]
    fn test_albums_csv_columns_and_quoting() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("albums.csv");
        let albums = vec![Album {
            id: 12,
            name: "Cars, trucks".to_string(),
            description: "Everything \"motor\"".to_string(),
            creator: "bob".to_string(),
            photo_count: 40,
        }];
        write_albums_csv(&path, &albums).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "ID,name,description,creator,photos");
        assert_eq!(lines[1], r#"12,"Cars, trucks","Everything ""motor""",bob,40"#);
    }

    #[test]
    fn test_photos_csv_uses_selected_variant() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("photos.csv");
        let photos = vec![Photo::new(
            7,
            12,
            "Red car".to_string(),
            "n/a".to_string(),
            "image/png".to_string(),
            "bob".to_string(),
            String::new(),
            vec![
                PhotoVariant::new(100, 150, 10, "https://img/7/small".to_string()),
                PhotoVariant::new(900, 1350, 900, "https://img/7/large".to_string()),
            ],
        )];
        write_photos_csv(&path, &photos).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "ID,albumID,name,filename,filetype,description,creator,height,width,filesize,url"
        );
        assert_eq!(lines[1], "7,12,Red car,n/a,image/png,,bob,900,1350,900,https://img/7/large");
    }

    #[test]
    fn test_export_into_missing_directory_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("albums.csv");
        let error = write_albums_csv(&path, &[]).unwrap_err();
        assert!(error.to_string().contains("albums.csv"));
    }
}
