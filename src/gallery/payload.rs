//! Wire shapes of the `ygData` payloads.
//!
//! Numeric fields show up both as JSON numbers and as numeric strings, and
//! optional text fields may be missing or `null`; the deserializers below
//! accept all of those.

use serde::{Deserialize, Deserializer};

/// One page of the album listing.
#[derive(Debug, Deserialize)]
pub struct AlbumsPage {
    #[serde(deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(default)]
    pub albums: Vec<AlbumEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumEntry {
    #[serde(deserialize_with = "lenient_u64")]
    pub album_id: u64,
    #[serde(default, deserialize_with = "string_or_null")]
    pub album_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub creator_nickname: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: u64,
}

/// One page of the group-wide photo listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPhotosPage {
    #[serde(deserialize_with = "lenient_u64")]
    pub total_photos: u64,
    #[serde(default)]
    pub photos: Vec<PhotoEntry>,
}

/// One page of an album's photo listing; photos arrive in groups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPhotosPage {
    #[serde(deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(default)]
    pub photo_group_by_details: Vec<PhotoGroup>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoGroup {
    #[serde(default)]
    pub photos: Vec<PhotoEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEntry {
    #[serde(deserialize_with = "lenient_u64")]
    pub photo_id: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub album_id: u64,
    #[serde(default, deserialize_with = "string_or_null")]
    pub photo_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub photo_filename: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub file_type: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub creator_nickname: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(default)]
    pub photo_info: Vec<VariantEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VariantEntry {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub height: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub width: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    #[serde(rename = "displayURL", default, deserialize_with = "string_or_null")]
    pub display_url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

/// Accepts `42` or `"42"`.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{s}'"))),
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_albums_page_accepts_string_numbers() {
        let page: AlbumsPage = serde_json::from_value(json!({
            "total": "2",
            "albums": [
                {"albumId": 1, "albumName": "A", "creatorNickname": "x", "description": "d", "total": "5"},
                {"albumId": "2", "albumName": "B", "creatorNickname": "y", "description": null, "total": 0}
            ]
        }))
        .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.albums[0].total, 5);
        assert_eq!(page.albums[1].album_id, 2);
        assert_eq!(page.albums[1].description, "");
    }

    #[test]
    fn test_photo_entry_missing_description_defaults_to_empty() {
        let entry: PhotoEntry = serde_json::from_value(json!({
            "photoId": 9,
            "albumId": 3,
            "photoName": "p",
            "photoFilename": "n/a",
            "fileType": "image/jpeg",
            "creatorNickname": "c",
            "photoInfo": [{"height": 10, "width": 20, "size": 300, "displayURL": "https://img/x"}]
        }))
        .unwrap();
        assert_eq!(entry.description, "");
        assert_eq!(entry.photo_info.len(), 1);
        assert_eq!(entry.photo_info[0].display_url, "https://img/x");
    }

    #[test]
    fn test_lenient_u64_rejects_non_numeric_text() {
        let result: Result<AlbumsPage, _> =
            serde_json::from_value(json!({"total": "many", "albums": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_album_photos_page_keeps_photo_groups() {
        let page: AlbumPhotosPage = serde_json::from_value(json!({
            "total": 3,
            "photoGroupByDetails": [{"photos": []}, {"photos": []}]
        }))
        .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.photo_group_by_details.len(), 2);
    }
}
