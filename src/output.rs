//! Console reports: catalog listings and operator guidance.

use group_photos_core::catalog::GroupStats;
use group_photos_core::{Album, CatalogError, Photo};

/// Lines of the long album listing.
pub fn album_details_lines(albums: &[Album]) -> Vec<String> {
    let mut lines = Vec::with_capacity(albums.len() * 6);
    for album in albums {
        lines.push(String::new());
        lines.push(format!("Album ID:      {}", album.id));
        lines.push(format!("Album name:    {}", album.name));
        lines.push(format!("Description:   {}", album.description));
        lines.push(format!("Created by:    {}", album.creator));
        lines.push(format!("No. of photos: {}", album.photo_count));
    }
    lines
}

/// Lines of the album ID table.
pub fn album_id_lines(albums: &[Album]) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "ID          Photos  Name".to_string(),
        "==          ======  ====".to_string(),
    ];
    lines.extend(
        albums
            .iter()
            .map(|album| format!("{:<10}  {:>6}  {}", album.id, album.photo_count, album.name)),
    );
    lines
}

/// Lines of the long photo listing, optionally naming each photo's album.
pub fn photo_details_lines(photos: &[Photo], show_album_id: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for photo in photos {
        let best = photo.selected();
        lines.push(String::new());
        lines.push(format!("Photo ID:    {}", photo.id));
        if show_album_id {
            lines.push(format!("Album ID:    {}", photo.album_id));
        }
        lines.push(format!("Photo name:  {}", photo.name));
        lines.push(format!("Description: {}", photo.description));
        lines.push(format!("Created by:  {}", photo.creator));
        lines.push(format!("Height:      {}", best.height));
        lines.push(format!("Width:       {}", best.width));
        lines.push(format!("Filename:    {}", photo.filename));
        lines.push(format!("Filetype:    {}", photo.content_type));
        lines.push(format!("File size:   {}", best.size));
    }
    lines
}

/// Lines of the photo ID table.
pub fn photo_id_lines(photos: &[Photo]) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "ID          Name".to_string(),
        "==          ====".to_string(),
    ];
    lines.extend(
        photos
            .iter()
            .map(|photo| format!("{:<10}  {}", photo.id, photo.name)),
    );
    lines
}

/// Report printed once the access probe succeeds.
pub fn group_stats_lines(stats: GroupStats) -> Vec<String> {
    vec![
        String::new(),
        "Successfully connected to the group. The server reports:".to_string(),
        format!("Number of albums: {}", stats.albums),
        format!("Number of photos: {}", stats.photos),
        "These numbers may be inaccurate.".to_string(),
    ]
}

/// Operator guidance for a failed access probe.
pub fn access_failure_lines(error: &CatalogError) -> Vec<String> {
    match error {
        CatalogError::NoAccess => vec!["No access to group - have you logged in?".to_string()],
        CatalogError::Server { .. } if error.is_group_not_found() => vec![
            error.to_string(),
            "The group could not be found - please double-check the name you specified."
                .to_string(),
        ],
        CatalogError::Server { .. } | CatalogError::NoData => vec![
            error.to_string(),
            "This may indicate a problem on the gallery's servers.".to_string(),
        ],
        other => vec![other.to_string()],
    }
}

/// "Did you mean" line for a name that matched nothing.
pub fn suggestion_line(candidates: &[&str]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let quoted: Vec<String> = candidates.iter().map(|name| format!("'{name}'")).collect();
    Some(format!("Did you mean: {}?", quoted.join(", ")))
}

/// Prints report lines to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
