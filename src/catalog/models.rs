//! Catalog entries: albums, photos and their resolution variants.

use serde::Serialize;

use crate::gallery::payload::{AlbumEntry, PhotoEntry, VariantEntry};

/// An album as listed by the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    pub description: String,
    pub creator: String,
    /// Photo count reported by the server. Approximate.
    #[serde(rename = "photos")]
    pub photo_count: u64,
}

impl From<AlbumEntry> for Album {
    fn from(entry: AlbumEntry) -> Self {
        Self {
            id: entry.album_id,
            name: entry.album_name,
            description: entry.description,
            creator: entry.creator_nickname,
            photo_count: entry.total,
        }
    }
}

/// One rendition of a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoVariant {
    pub height: u64,
    pub width: u64,
    /// Size in bytes.
    pub size: u64,
    pub url: String,
}

impl PhotoVariant {
    #[must_use]
    pub fn new(height: u64, width: u64, size: u64, url: String) -> Self {
        Self {
            height,
            width,
            size,
            url,
        }
    }
}

impl From<VariantEntry> for PhotoVariant {
    fn from(entry: VariantEntry) -> Self {
        Self::new(entry.height, entry.width, entry.size, entry.display_url)
    }
}

/// Picks the tallest variant.
///
/// Scans in listed order and replaces the candidate only on a strictly
/// greater height, so the first of several equally tall variants wins. With
/// no variant taller than zero the result is an empty zero-height variant.
#[must_use]
pub fn select_best(variants: &[PhotoVariant]) -> PhotoVariant {
    let mut best: Option<&PhotoVariant> = None;
    for variant in variants {
        if variant.height > best.map_or(0, |b| b.height) {
            best = Some(variant);
        }
    }
    best.cloned().unwrap_or_default()
}

/// A photo and the variant that will be downloaded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: u64,
    pub album_id: u64,
    /// Display name.
    pub name: String,
    /// Original filename, or `"n/a"` when the server has none.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    pub creator: String,
    pub description: String,
    pub variants: Vec<PhotoVariant>,
    selected: PhotoVariant,
}

impl Photo {
    /// Builds a photo and selects its best variant.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        album_id: u64,
        name: String,
        filename: String,
        content_type: String,
        creator: String,
        description: String,
        variants: Vec<PhotoVariant>,
    ) -> Self {
        let selected = select_best(&variants);
        Self {
            id,
            album_id,
            name,
            filename,
            content_type,
            creator,
            description,
            variants,
            selected,
        }
    }

    /// The variant chosen by [`select_best`].
    #[must_use]
    pub fn selected(&self) -> &PhotoVariant {
        &self.selected
    }
}

impl From<PhotoEntry> for Photo {
    fn from(entry: PhotoEntry) -> Self {
        Self::new(
            entry.photo_id,
            entry.album_id,
            entry.photo_name,
            entry.photo_filename,
            entry.file_type,
            entry.creator_nickname,
            entry.description,
            entry.photo_info.into_iter().map(PhotoVariant::from).collect(),
        )
    }
}

/// Photo row of the catalog export.
#[derive(Debug, Serialize)]
pub struct PhotoRow<'a> {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "albumID")]
    pub album_id: u64,
    pub name: &'a str,
    pub filename: &'a str,
    pub filetype: &'a str,
    pub description: &'a str,
    pub creator: &'a str,
    pub height: u64,
    pub width: u64,
    pub filesize: u64,
    pub url: &'a str,
}

impl<'a> From<&'a Photo> for PhotoRow<'a> {
    fn from(photo: &'a Photo) -> Self {
        let best = photo.selected();
        Self {
            id: photo.id,
            album_id: photo.album_id,
            name: &photo.name,
            filename: &photo.filename,
            filetype: &photo.content_type,
            description: &photo.description,
            creator: &photo.creator,
            height: best.height,
            width: best.width,
            filesize: best.size,
            url: &best.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(height: u64, url: &str) -> PhotoVariant {
        PhotoVariant::new(height, height * 2, height * 10, url.to_string())
    }

    #[test]
    fn test_select_best_first_tallest_wins_ties() {
        let variants = vec![variant(100, "first"), variant(50, "small"), variant(100, "second")];
        assert_eq!(select_best(&variants).url, "first");
    }

    #[test]
    fn test_select_best_picks_strictly_tallest() {
        let variants = vec![variant(50, "a"), variant(800, "b"), variant(200, "c")];
        assert_eq!(select_best(&variants).url, "b");
    }

    #[test]
    fn test_select_best_empty_list_is_zero_candidate() {
        let best = select_best(&[]);
        assert_eq!(best, PhotoVariant::default());
    }

    #[test]
    fn test_select_best_all_zero_height_is_zero_candidate() {
        let best = select_best(&[variant(0, "flat")]);
        assert_eq!(best.height, 0);
        assert!(best.url.is_empty());
    }

    #[test]
    fn test_photo_new_precomputes_selection() {
        let photo = Photo::new(
            1,
            2,
            "n".to_string(),
            "f.jpg".to_string(),
            "image/jpeg".to_string(),
            "c".to_string(),
            String::new(),
            vec![variant(10, "thumb"), variant(1200, "full")],
        );
        assert_eq!(photo.selected().url, "full");
        let row = PhotoRow::from(&photo);
        assert_eq!(row.height, 1200);
        assert_eq!(row.url, "full");
    }
}
