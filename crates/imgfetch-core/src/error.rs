//! Per-URL failure kinds.
//!
//! Every variant means "skip this URL and carry on"; none of them stops a batch.

use crate::http::HttpError;
use std::path::PathBuf;
use thiserror::Error;

/// Outcome of fetching one URL: the saved path, or why nothing was saved.
pub type FetchOutcome = Result<PathBuf, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout, invalid URL, or a non-2xx final status.
    #[error(transparent)]
    Network(#[from] HttpError),
    /// The declared `Content-Type` does not start with `image/`.
    #[error("URL does not point to an image ({content_type})")]
    NotAnImage { content_type: String },
    /// Same bytes were already saved earlier in this session.
    #[error("duplicate of an image already saved ({filename})")]
    Duplicate { filename: String, hash: String },
    /// Anything else, e.g. the file could not be written.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Discriminant of `FetchError`, for counting and matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Network,
    NotAnImage,
    Duplicate,
    Unexpected,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::NotAnImage { .. } => FetchErrorKind::NotAnImage,
            FetchError::Duplicate { .. } => FetchErrorKind::Duplicate,
            FetchError::Unexpected(_) => FetchErrorKind::Unexpected,
        }
    }
}
