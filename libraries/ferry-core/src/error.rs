/// Core error types for Playlist Ferry
use thiserror::Error;

/// Result type alias using `FerryError`
pub type Result<T> = std::result::Result<T, FerryError>;

/// Core error type for Playlist Ferry
#[derive(Error, Debug)]
pub enum FerryError {
    /// The user cancelled the operation (interrupt or EOF at a prompt).
    ///
    /// This is control flow, not failure: callers decide whether to abort
    /// everything or carry on with the next playlist.
    #[error("cancelled by user")]
    Cancelled,

    /// Destination catalog operation failed
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Authentication with the destination catalog failed
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Source export could not be parsed
    #[error("export parse error: {0}")]
    Parse(String),

    /// Frontend interaction failed (broken terminal, closed stdin)
    #[error("frontend error: {0}")]
    Frontend(String),

    /// I/O errors (session files, export files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FerryError {
    /// Create a catalog error from any displayable cause
    pub fn catalog(cause: impl std::fmt::Display) -> Self {
        Self::Catalog(cause.to_string())
    }

    /// True if this error is a user cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
