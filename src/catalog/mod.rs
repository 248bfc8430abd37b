//! Catalog aggregation: drive the gallery across pages into one ordered list.
//!
//! # Pagination contract
//!
//! - The first request is always made (the total starts at a sentinel of 1).
//! - Every page overwrites the known total; the server's count may grow or
//!   shrink between pages.
//! - The offset advances by the page size after every page, regardless of how
//!   many items the page held, so the loop always terminates.
//! - Any non-success reply aborts the whole fetch and discards what was
//!   already gathered. Callers never see a partial catalog.

mod error;
mod lookup;
mod models;

pub use error::CatalogError;
pub use lookup::{
    Lookup, closest_album_names, closest_photo_names, find_album_by_id, find_album_by_name,
    find_photo_by_id, find_photo_by_name,
};
pub use models::{Album, Photo, PhotoRow, PhotoVariant, select_best};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::gallery::payload::{AlbumPhotosPage, AlbumsPage, GroupPhotosPage};
use crate::gallery::{Endpoint, GalleryClient, GalleryResult};

/// Items requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Transient state of a running catalog fetch.
#[derive(Debug)]
pub struct Pagination<T> {
    items: Vec<T>,
    offset: u64,
    total: u64,
}

impl<T> Default for Pagination<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pagination<T> {
    /// Fresh state: nothing fetched, total unknown.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            total: 1,
        }
    }

    /// Whether another page should be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset < self.total
    }

    /// Offset of the next page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Last total reported by the server.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Folds in one successful page.
    pub fn absorb(&mut self, page: Page<T>, page_size: u64) {
        self.total = page.total;
        self.items.extend(page.items);
        self.offset = self.offset.saturating_add(page_size);
    }

    /// Items gathered so far, in request order.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// One decoded page: the server's current total and this page's items.
#[derive(Debug)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

/// A paginated collection and how to decode its pages.
pub trait PageSource {
    /// Catalog entry produced by this source.
    type Item;

    /// Endpoint to request.
    fn endpoint(&self) -> Endpoint;

    /// Decodes a page payload.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the payload has an unexpected shape.
    fn decode(&self, payload: Value) -> Result<Page<Self::Item>, serde_json::Error>;
}

/// All albums of the group.
#[derive(Debug, Clone, Copy)]
pub struct AlbumSource;

impl PageSource for AlbumSource {
    type Item = Album;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Albums
    }

    fn decode(&self, payload: Value) -> Result<Page<Album>, serde_json::Error> {
        let page: AlbumsPage = decode_payload(payload)?;
        Ok(Page {
            total: page.total,
            items: page.albums.into_iter().map(Album::from).collect(),
        })
    }
}

/// All photos of the group.
#[derive(Debug, Clone, Copy)]
pub struct GroupPhotoSource;

impl PageSource for GroupPhotoSource {
    type Item = Photo;

    fn endpoint(&self) -> Endpoint {
        Endpoint::GroupPhotos
    }

    fn decode(&self, payload: Value) -> Result<Page<Photo>, serde_json::Error> {
        let page: GroupPhotosPage = decode_payload(payload)?;
        Ok(Page {
            total: page.total_photos,
            items: page.photos.into_iter().map(Photo::from).collect(),
        })
    }
}

/// Photos of one album.
#[derive(Debug, Clone, Copy)]
pub struct AlbumPhotoSource {
    pub album_id: u64,
}

impl PageSource for AlbumPhotoSource {
    type Item = Photo;

    fn endpoint(&self) -> Endpoint {
        Endpoint::AlbumPhotos(self.album_id)
    }

    fn decode(&self, payload: Value) -> Result<Page<Photo>, serde_json::Error> {
        let page: AlbumPhotosPage = decode_payload(payload)?;
        Ok(Page {
            total: page.total,
            items: page
                .photo_group_by_details
                .into_iter()
                .flat_map(|group| group.photos)
                .map(Photo::from)
                .collect(),
        })
    }
}

fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload)
}

/// Fetches every page of `source` and merges them in order.
///
/// A `page_size` of zero is treated as one.
///
/// # Errors
///
/// Returns [`CatalogError`] for the first page that is not a success; items
/// from earlier pages are dropped.
#[instrument(level = "debug", skip(gallery, source), fields(endpoint = ?source.endpoint()))]
pub async fn paginate<S: PageSource>(
    gallery: &GalleryClient,
    source: &S,
    page_size: u64,
) -> Result<Vec<S::Item>, CatalogError> {
    let page_size = page_size.max(1);
    let endpoint = source.endpoint();
    let mut state = Pagination::new();

    while state.has_more() {
        let offset = state.offset();
        match gallery.fetch_page(endpoint, offset, page_size).await? {
            GalleryResult::Success(payload) => {
                let page = source.decode(payload).map_err(|e| {
                    CatalogError::malformed(gallery.site().page_url(endpoint, offset, page_size), e)
                })?;
                debug!(offset, total = page.total, items = page.items.len(), "page merged");
                state.absorb(page, page_size);
            }
            failure @ (GalleryResult::NoAccess
            | GalleryResult::ServerError { .. }
            | GalleryResult::NoData) => {
                debug!(offset, "page failed; discarding catalog");
                return Err(CatalogError::from_result(failure).unwrap_or(CatalogError::NoData));
            }
        }
    }

    Ok(state.into_items())
}

/// Every album of the group.
///
/// # Errors
///
/// See [`paginate`].
pub async fn fetch_albums(
    gallery: &GalleryClient,
    page_size: u64,
) -> Result<Vec<Album>, CatalogError> {
    let albums = paginate(gallery, &AlbumSource, page_size).await?;
    info!(count = albums.len(), "album list fetched");
    Ok(albums)
}

/// Every photo of the group, across albums.
///
/// # Errors
///
/// See [`paginate`].
pub async fn fetch_group_photos(
    gallery: &GalleryClient,
    page_size: u64,
) -> Result<Vec<Photo>, CatalogError> {
    let photos = paginate(gallery, &GroupPhotoSource, page_size).await?;
    info!(count = photos.len(), "group photo list fetched");
    Ok(photos)
}

/// Every photo of one album.
///
/// # Errors
///
/// See [`paginate`].
pub async fn fetch_album_photos(
    gallery: &GalleryClient,
    album_id: u64,
    page_size: u64,
) -> Result<Vec<Photo>, CatalogError> {
    let photos = paginate(gallery, &AlbumPhotoSource { album_id }, page_size).await?;
    info!(album_id, count = photos.len(), "album photo list fetched");
    Ok(photos)
}

/// Advisory counts reported by the access probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupStats {
    pub albums: u64,
    pub photos: u64,
}

/// Probes access to the group with two single-item requests.
///
/// The counts are whatever the server claims and may be inaccurate.
///
/// # Errors
///
/// Returns the first non-success classification as a [`CatalogError`].
pub async fn group_stats(gallery: &GalleryClient) -> Result<GroupStats, CatalogError> {
    let albums = probe_total(gallery, &AlbumSource).await?;
    let photos = probe_total(gallery, &GroupPhotoSource).await?;
    Ok(GroupStats { albums, photos })
}

async fn probe_total<S: PageSource>(
    gallery: &GalleryClient,
    source: &S,
) -> Result<u64, CatalogError> {
    let endpoint = source.endpoint();
    match gallery.fetch_page(endpoint, 0, 1).await? {
        GalleryResult::Success(payload) => source
            .decode(payload)
            .map(|page| page.total)
            .map_err(|e| CatalogError::malformed(gallery.site().page_url(endpoint, 0, 1), e)),
        failure => Err(CatalogError::from_result(failure).unwrap_or(CatalogError::NoData)),
    }
}
