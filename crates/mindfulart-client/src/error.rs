//! Client error types.

use mindfulart_gallery::GalleryError;
use thiserror::Error;

/// Shown instead of the underlying error when a search cannot run at all.
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong while searching. Please try again.";

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An API key reference could not be resolved.
    #[error(transparent)]
    Secret(#[from] crate::secret::SecretError),

    /// Gallery store error.
    #[error(transparent)]
    Gallery(#[from] GalleryError),

    /// A `--pick` number or similar selection was out of range.
    #[error("invalid selection: {0}")]
    Selection(String),

    /// A search could not be carried out. The cause is logged, not shown.
    #[error("{}", SEARCH_FAILED_MESSAGE)]
    SearchFailed(#[source] Box<ClientError>),
}

impl ClientError {
    /// Wraps an error that prevented a search from running.
    pub fn search_failed(err: impl Into<ClientError>) -> Self {
        Self::SearchFailed(Box::new(err.into()))
    }

    /// The line printed to stderr for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::SearchFailed(_) => SEARCH_FAILED_MESSAGE.to_string(),
            other => format!("error: {}", other),
        }
    }
}
