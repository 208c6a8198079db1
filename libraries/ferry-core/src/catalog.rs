/// Destination-catalog boundary trait
use crate::error::Result;
use crate::types::{CatalogTrack, PlaylistHandle, TrackId};
use async_trait::async_trait;

/// Operations the import pipeline needs from the destination catalog.
///
/// Implemented over HTTP by `ferry-catalog`; tests implement it with
/// in-memory stubs. All operations are issued strictly sequentially by the
/// pipeline, one request in flight at a time.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Exact lookup by recording code (ISRC).
    ///
    /// A hit is authoritative: callers treat it as the match and skip any
    /// text search.
    async fn track_by_code(&self, code: &str) -> Result<Option<CatalogTrack>>;

    /// Free-text track search, returning at most `limit` hits in the
    /// catalog's relevance order.
    async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<CatalogTrack>>;

    /// Create a new, empty playlist owned by the authenticated user.
    async fn create_playlist(&self, name: &str, description: &str) -> Result<PlaylistHandle>;

    /// Add all `track_ids` to the playlist in one call, preserving order.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[TrackId]) -> Result<()>;

    /// Add a single track to the playlist.
    async fn add_track(&self, playlist_id: &str, track_id: &TrackId) -> Result<()>;
}
