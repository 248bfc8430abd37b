//! URL layout of a group's photo gallery.

/// Default base of the JSON API.
pub const DEFAULT_API_BASE: &str = "https://groups.yahoo.com/api/v3/groups";

/// Default base of the browsable web pages (used for referers).
pub const DEFAULT_WEB_BASE: &str = "https://groups.yahoo.com/neo/groups";

/// A paginated collection exposed by the gallery API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// All albums of the group.
    Albums,
    /// All photos of the group, across albums.
    GroupPhotos,
    /// Photos of one album.
    AlbumPhotos(u64),
}

/// Where a group's gallery lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSite {
    api_base: String,
    web_base: String,
    group: String,
}

impl GroupSite {
    /// Gallery of `group` on the default host.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self::with_bases(group, DEFAULT_API_BASE, DEFAULT_WEB_BASE)
    }

    /// Gallery of `group` under explicit API and web bases.
    ///
    /// Trailing slashes on the bases are ignored.
    #[must_use]
    pub fn with_bases(
        group: impl Into<String>,
        api_base: impl Into<String>,
        web_base: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            web_base: web_base.into().trim_end_matches('/').to_string(),
            group: group.into(),
        }
    }

    /// Group name.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// URL of one page of `endpoint`.
    #[must_use]
    pub fn page_url(&self, endpoint: Endpoint, offset: u64, count: u64) -> String {
        let path = match endpoint {
            Endpoint::Albums => "albums".to_string(),
            Endpoint::GroupPhotos => "photos".to_string(),
            Endpoint::AlbumPhotos(album_id) => format!("albums/{album_id}"),
        };
        format!(
            "{}/{}/{path}?start={offset}&count={count}",
            self.api_base, self.group
        )
    }

    /// Album page a browser would have come from when fetching one of its photos.
    #[must_use]
    pub fn album_referer(&self, album_id: u64) -> String {
        format!("{}/{}/photos/albums/{album_id}", self.web_base, self.group)
    }
}
