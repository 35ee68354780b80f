//! Gallery store error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for gallery operations.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Errors that can occur while reading or changing galleries.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Reading, writing or renaming the store file failed.
    #[error("gallery store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The galleries could not be serialized.
    #[error("failed to serialize galleries: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A gallery name was empty after trimming.
    #[error("gallery name cannot be empty")]
    EmptyName,

    /// No gallery matches the given id.
    #[error("gallery not found: {id}")]
    NotFound { id: String },

    /// An id prefix matched more than one gallery.
    #[error("gallery id '{prefix}' is ambiguous ({matches} matches)")]
    Ambiguous { prefix: String, matches: usize },
}

impl GalleryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GalleryError::not_found("abc");
        assert_eq!(err.to_string(), "gallery not found: abc");

        let err = GalleryError::io("/tmp/x.json", io::Error::other("disk full"));
        assert!(err.to_string().contains("/tmp/x.json"));
        assert!(err.to_string().contains("disk full"));

        let err = GalleryError::Ambiguous {
            prefix: "a".to_string(),
            matches: 2,
        };
        assert!(err.to_string().contains("ambiguous"));
    }
}
