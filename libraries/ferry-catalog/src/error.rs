//! Error types for the destination-catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the destination catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog returned an error response
    #[error("catalog error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid or expired session)
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Device-code login was not completed before the code expired
    #[error("login expired: {0}")]
    LoginExpired(String),

    /// Invalid catalog URL
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a catalog response
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// Catalog is offline or unreachable
    #[error("catalog unreachable: {0}")]
    Unreachable(String),

    /// Session file could not be read or written
    #[error("session file error: {0}")]
    Session(String),

    /// IO error reading or writing the session file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// True for errors where a different request could still succeed.
    ///
    /// Auth failures are excluded: an expired session will not pass on a
    /// retry either, so per-track fallbacks should give up instead.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::AuthRequired | Self::AuthFailed(_))
    }
}

impl From<CatalogError> for ferry_core::FerryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::AuthRequired | CatalogError::AuthFailed(_) => {
                ferry_core::FerryError::Auth(err.to_string())
            }
            other => ferry_core::FerryError::Catalog(other.to_string()),
        }
    }
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
