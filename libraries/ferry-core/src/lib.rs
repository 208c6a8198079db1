//! Playlist Ferry Core
//!
//! Shared types, traits, and error handling for Playlist Ferry.
//!
//! This crate defines:
//! - **Domain Types**: `SourceTrack`, `CatalogTrack`, `ImportOutcome`,
//!   `PlaylistHandle`, `FolderReport`
//! - **Boundary Traits**: `Catalog` (destination-catalog operations) and
//!   `Frontend` (user interaction capability)
//! - **Error Handling**: Unified `FerryError` and `Result` types
//!
//! Nothing in this crate performs I/O. The HTTP catalog client lives in
//! `ferry-catalog`, the import pipeline in `ferry-import`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use error::{FerryError, Result};
pub use frontend::{Decision, Frontend, NullFrontend};
pub use types::{
    share_link, CatalogTrack, FolderReport, ImportMode, ImportOutcome, ImportStatus,
    PlaylistHandle, SourceTrack, TrackId,
};
