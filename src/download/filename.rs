//! Filename sanitization and destination naming for downloaded photos.
//!
//! Every server-sourced string that ends up in a path goes through
//! [`sanitize`], so saved names only ever contain the allow-listed characters.

use crate::catalog::Photo;

/// Placeholder the server reports when it has no original filename.
pub const MISSING_FILENAME_PLACEHOLDER: &str = "n/a";

/// Punctuation allowed in saved names besides ASCII letters, digits and space.
const ALLOWED_PUNCTUATION: &str = " !()-_=+,.~";

/// Replaces every character outside the allow-list with `_`.
///
/// The allow-list is ASCII letters, ASCII digits, space and `!()-_=+,.~`.
/// Each rejected character becomes exactly one underscore, so the output has
/// the same number of characters as the input.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Maps a declared content type to a file extension (leading dot included).
///
/// Unknown types fall back to the sanitized content type itself so the file
/// can still be written with some extension.
#[must_use]
pub fn extension_for(content_type: &str) -> String {
    match content_type {
        "image/jpeg" | "image/pjpeg" => ".jpg".to_string(),
        "image/png" => ".png".to_string(),
        "image/gif" => ".gif".to_string(),
        "image/bmp" => ".bmp".to_string(),
        other => format!(".{}", sanitize(other)),
    }
}

/// Derives the on-disk filename for a photo.
///
/// Photos without a usable original filename get a synthesized
/// `ID_<id> - <name><ext>`; everything else keeps its sanitized original name.
/// A name that is empty or only dots would resolve to a directory, so it
/// counts as missing.
#[must_use]
pub fn build_filename(photo: &Photo) -> String {
    let original = sanitize(&photo.filename);
    if photo.filename == MISSING_FILENAME_PLACEHOLDER || original.chars().all(|c| c == '.') {
        format!(
            "ID_{} - {}{}",
            photo.id,
            sanitize(&photo.name),
            extension_for(&photo.content_type)
        )
    } else {
        original
    }
}

/// Directory name for an album: `<albumId> - <sanitized name>`.
///
/// When the album name is unknown the directory is just the album ID.
#[must_use]
pub fn album_dir_name(album_id: u64, album_name: Option<&str>) -> String {
    match album_name {
        Some(name) => format!("{album_id} - {}", sanitize(name)),
        None => album_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PhotoVariant;

    fn photo(filename: &str, name: &str, content_type: &str) -> Photo {
        Photo::new(
            42,
            7,
            name.to_string(),
            filename.to_string(),
            content_type.to_string(),
            "someone".to_string(),
            String::new(),
            vec![PhotoVariant::new(10, 10, 100, "https://img.example/42".to_string())],
        )
    }

    #[test]
    fn test_sanitize_replaces_disallowed_characters() {
        assert_eq!(sanitize("My Photo?.jpg"), "My Photo_.jpg");
    }

    #[test]
    fn test_sanitize_keeps_allowed_punctuation() {
        let allowed = "Aa9 !()-_=+,.~";
        assert_eq!(sanitize(allowed), allowed);
    }

    #[test]
    fn test_sanitize_path_separators_and_unicode() {
        assert_eq!(sanitize("a/b\\c:d"), "a_b_c_d");
        // One underscore per character, not per byte.
        assert_eq!(sanitize("café"), "caf_");
        assert_eq!(sanitize("日本"), "__");
    }

    #[test]
    fn test_sanitize_empty_string() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_extension_for_known_types() {
        assert_eq!(extension_for("image/jpeg"), ".jpg");
        assert_eq!(extension_for("image/pjpeg"), ".jpg");
        assert_eq!(extension_for("image/png"), ".png");
        assert_eq!(extension_for("image/gif"), ".gif");
        assert_eq!(extension_for("image/bmp"), ".bmp");
    }

    #[test]
    fn test_extension_for_unknown_type_falls_back_to_sanitized_type() {
        assert_eq!(extension_for("image/webp"), ".image_webp");
        assert_eq!(extension_for(""), ".");
    }

    #[test]
    fn test_build_filename_synthesizes_name_for_placeholder() {
        let p = photo("n/a", "Beach day?", "image/png");
        assert_eq!(build_filename(&p), "ID_42 - Beach day_.png");
    }

    #[test]
    fn test_build_filename_synthesizes_name_for_empty_or_dot_names() {
        for filename in ["", ".", ".."] {
            let p = photo(filename, "Beach", "image/jpeg");
            assert_eq!(build_filename(&p), "ID_42 - Beach.jpg", "filename {filename:?}");
        }
        let p = photo("...jpg", "Beach", "image/jpeg");
        assert_eq!(build_filename(&p), "...jpg");
    }

    #[test]
    fn test_build_filename_uses_sanitized_original_name() {
        let p = photo("holiday:2004.JPG", "ignored", "image/jpeg");
        assert_eq!(build_filename(&p), "holiday_2004.JPG");
    }

    #[test]
    fn test_album_dir_name_with_and_without_name() {
        assert_eq!(album_dir_name(12, Some("Trips/2004")), "12 - Trips_2004");
        assert_eq!(album_dir_name(12, None), "12");
    }
}
