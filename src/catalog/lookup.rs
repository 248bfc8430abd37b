//! Operator lookups of albums and photos by name or ID.
//!
//! Lookups never pick a winner among several matches; an ambiguous result is
//! handed back so the operator can choose by ID.

use super::models::{Album, Photo};

/// Result of looking something up in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a, T> {
    /// Exactly one match.
    Found(&'a T),
    /// No match.
    NotFound,
    /// More than one match, in catalog order.
    Ambiguous(Vec<&'a T>),
}

impl<'a, T> Lookup<'a, T> {
    fn from_matches(mut matches: Vec<&'a T>) -> Self {
        match matches.len() {
            0 => Self::NotFound,
            1 => Self::Found(matches.remove(0)),
            _ => Self::Ambiguous(matches),
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// Albums whose name equals `name`, ignoring case.
#[must_use]
pub fn find_album_by_name<'a>(albums: &'a [Album], name: &str) -> Lookup<'a, Album> {
    Lookup::from_matches(albums.iter().filter(|a| same_name(&a.name, name)).collect())
}

/// Albums with the given ID.
#[must_use]
pub fn find_album_by_id(albums: &[Album], id: u64) -> Lookup<'_, Album> {
    Lookup::from_matches(albums.iter().filter(|a| a.id == id).collect())
}

/// Photos whose display name equals `name`, ignoring case.
#[must_use]
pub fn find_photo_by_name<'a>(photos: &'a [Photo], name: &str) -> Lookup<'a, Photo> {
    Lookup::from_matches(photos.iter().filter(|p| same_name(&p.name, name)).collect())
}

/// Photos with the given ID.
#[must_use]
pub fn find_photo_by_id(photos: &[Photo], id: u64) -> Lookup<'_, Photo> {
    Lookup::from_matches(photos.iter().filter(|p| p.id == id).collect())
}

/// Minimum similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Up to `limit` album names resembling `name`, best first.
#[must_use]
pub fn closest_album_names<'a>(albums: &'a [Album], name: &str, limit: usize) -> Vec<&'a str> {
    closest(albums.iter().map(|a| a.name.as_str()), name, limit)
}

/// Up to `limit` photo names resembling `name`, best first.
#[must_use]
pub fn closest_photo_names<'a>(photos: &'a [Photo], name: &str, limit: usize) -> Vec<&'a str> {
    closest(photos.iter().map(|p| p.name.as_str()), name, limit)
}

fn closest<'a>(candidates: impl Iterator<Item = &'a str>, name: &str, limit: usize) -> Vec<&'a str> {
    let wanted = name.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .map(|candidate| {
            let score = strsim::jaro_winkler(&candidate.to_lowercase(), &wanted);
            (score, candidate)
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let mut names: Vec<&str> = Vec::new();
    for (_, candidate) in scored {
        if !names.contains(&candidate) {
            names.push(candidate);
        }
        if names.len() == limit {
            break;
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: u64, name: &str) -> Album {
        Album {
            id,
            name: name.to_string(),
            description: String::new(),
            creator: "c".to_string(),
            photo_count: 0,
        }
    }

    #[test]
    fn test_find_album_by_name_ignores_case() {
        let albums = vec![album(1, "Summer Trip"), album(2, "Winter")];
        assert_eq!(find_album_by_name(&albums, "summer TRIP"), Lookup::Found(&albums[0]));
    }

    #[test]
    fn test_find_album_by_name_not_found() {
        let albums = vec![album(1, "Summer Trip")];
        assert_eq!(find_album_by_name(&albums, "Autumn"), Lookup::NotFound);
    }

    #[test]
    fn test_find_album_by_name_ambiguous_keeps_catalog_order() {
        let albums = vec![album(1, "Misc"), album(2, "Other"), album(3, "MISC")];
        match find_album_by_name(&albums, "misc") {
            Lookup::Ambiguous(found) => {
                let ids: Vec<u64> = found.iter().map(|a| a.id).collect();
                assert_eq!(ids, vec![1, 3]);
            }
            other => panic!("expected ambiguous lookup, got {other:?}"),
        }
    }

    #[test]
    fn test_find_album_by_id() {
        let albums = vec![album(1, "A"), album(2, "B")];
        assert_eq!(find_album_by_id(&albums, 2), Lookup::Found(&albums[1]));
        assert_eq!(find_album_by_id(&albums, 9), Lookup::NotFound);
    }

    #[test]
    fn test_closest_album_names_suggests_near_misses() {
        let albums = vec![album(1, "Summer Trip"), album(2, "Winter"), album(3, "Summer Trips")];
        let names = closest_album_names(&albums, "Sumer Trip", 3);
        assert!(names.contains(&"Summer Trip"), "got {names:?}");
        assert!(!names.contains(&"Winter"), "got {names:?}");
    }

    #[test]
    fn test_closest_names_respects_limit_and_dedupes() {
        let albums = vec![album(1, "Party"), album(2, "Party"), album(3, "Parties")];
        let names = closest_album_names(&albums, "party", 1);
        assert_eq!(names, vec!["Party"]);
    }
}
