//! Process exit codes.
//!
//! Single responsibility: map how a run ended to the code the process exits with.

use std::process::ExitCode;

use group_photos_core::CatalogError;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    /// The gallery did not answer with JSON: no logged-in session.
    NoAccess,
    /// The gallery reported an error.
    ServerError,
    /// The gallery answered without data.
    NoData,
    /// The album catalog was empty or could not be fetched.
    EmptyAlbumList,
    /// A requested album or photo does not exist.
    NotFound,
    /// A name matched more than one album or photo.
    Ambiguous,
    /// The photo catalog was empty or could not be fetched.
    EmptyPhotoList,
    /// Anything else: configuration, I/O, transport.
    Failure,
}

impl ProcessExit {
    /// Numeric exit code.
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NoAccess => 1,
            Self::ServerError => 2,
            Self::NoData => 3,
            Self::EmptyAlbumList => 4,
            Self::NotFound => 5,
            Self::Ambiguous => 6,
            Self::EmptyPhotoList => 7,
            Self::Failure => 8,
        }
    }

    /// Exit for a failed access probe.
    pub(crate) fn for_access_error(error: &CatalogError) -> Self {
        match error {
            CatalogError::NoAccess => Self::NoAccess,
            CatalogError::Server { .. } => Self::ServerError,
            CatalogError::NoData => Self::NoData,
            CatalogError::MalformedPage { .. } | CatalogError::Gallery(_) => Self::Failure,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}
