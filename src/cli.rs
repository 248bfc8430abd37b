//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use group_photos_core::Browser;

/// List and bulk-download the photo gallery of a group.
///
/// Albums and photos can be listed to the console or exported as CSV; single
/// photos or the whole gallery are saved into one directory per album.
/// Rerunning a bulk download skips every photo already on disk.
#[derive(Parser, Debug)]
#[command(name = "group-photos-dl")]
#[command(author, version, about)]
#[command(group(ArgGroup::new("album_selector").args(["album", "album_id"])))]
#[command(group(
    ArgGroup::new("download").args(["download_photo", "download_photo_id", "download_all"])
))]
pub struct Args {
    /// Group name as it appears in the gallery URL
    pub group: String,

    /// Netscape-format cookie file exported from a logged-in browser session
    #[arg(long, value_name = "FILE")]
    pub cookies: Option<PathBuf>,

    /// Browser whose User-Agent is sent with every request
    #[arg(long, value_enum)]
    pub browser: Option<BrowserArg>,

    /// Print every album with its details
    #[arg(short = 'l', long)]
    pub list_albums: bool,

    /// Export the album list to a CSV file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub list_albums_csv: Option<PathBuf>,

    /// Print an ID/photo-count/name table of albums
    #[arg(short = 'L', long)]
    pub list_album_ids: bool,

    /// Select an album by name (case-insensitive)
    #[arg(short = 'a', long, value_name = "NAME")]
    pub album: Option<String>,

    /// Select an album by ID
    #[arg(short = 'A', long, value_name = "ID")]
    pub album_id: Option<u64>,

    /// Print every photo of the selected album (or the whole group)
    #[arg(short = 'p', long)]
    pub list_photos: bool,

    /// Export the photo list to a CSV file
    #[arg(short = 'C', long, value_name = "FILE")]
    pub list_photos_csv: Option<PathBuf>,

    /// Print an ID/name table of photos
    #[arg(short = 'P', long)]
    pub list_photo_ids: bool,

    /// Download one photo by name (case-insensitive)
    #[arg(short = 'd', long, value_name = "NAME")]
    pub download_photo: Option<String>,

    /// Download one photo by ID
    #[arg(short = 'D', long, value_name = "ID")]
    pub download_photo_id: Option<u64>,

    /// Download every photo of the selected album (or the whole group)
    #[arg(short = 'g', long)]
    pub download_all: bool,

    /// Save a single downloaded photo under this name instead
    #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "download_all")]
    pub filename: Option<PathBuf>,

    /// Append one CSV row per attempted download to this file
    #[arg(short = 'G', long, value_name = "FILE", requires = "download_all")]
    pub log_csv: Option<PathBuf>,

    /// Directory album folders are created in (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Base URL of the gallery JSON API
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Base URL of the gallery web pages, used for Referer headers
    #[arg(long, value_name = "URL")]
    pub web_base: Option<String>,

    /// Items requested per catalog page (1-500)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=500))]
    pub page_size: Option<u64>,
}

impl Args {
    /// True when any action needs the album catalog.
    #[must_use]
    pub fn wants_albums(&self) -> bool {
        self.list_albums
            || self.list_album_ids
            || self.list_albums_csv.is_some()
            || self.album.is_some()
            || self.album_id.is_some()
            || self.download_all
            || self.wants_single_download()
    }

    /// True when any action needs the photo catalog.
    #[must_use]
    pub fn wants_photos(&self) -> bool {
        self.list_photos
            || self.list_photo_ids
            || self.list_photos_csv.is_some()
            || self.download_all
            || self.wants_single_download()
    }

    /// True when one photo is to be downloaded.
    #[must_use]
    pub fn wants_single_download(&self) -> bool {
        self.download_photo.is_some() || self.download_photo_id.is_some()
    }
}

/// Browser choices for `--browser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BrowserArg {
    Chrome,
    Firefox,
}

impl From<BrowserArg> for Browser {
    fn from(value: BrowserArg) -> Self {
        match value {
            BrowserArg::Chrome => Browser::Chrome,
            BrowserArg::Firefox => Browser::Firefox,
        }
    }
}
