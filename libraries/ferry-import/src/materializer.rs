//! Playlist materialization: create the destination playlist and fill it.

use crate::resolver::DEFAULT_THROTTLE;
use ferry_core::{Catalog, FerryError, Frontend, PlaylistHandle, Result, TrackId};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Creates a destination playlist and adds resolved track ids to it.
///
/// Population is best-effort and not transactional: the playlist is
/// created even if every add fails, and callers must treat "created" and
/// "populated" as separate guarantees. A failed batch add falls back to
/// adding the tracks one at a time in original order; individual failures
/// are reported and the track is omitted.
#[derive(Debug, Clone)]
pub struct PlaylistMaterializer {
    throttle: Duration,
}

impl Default for PlaylistMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistMaterializer {
    /// Materializer with the default throttle
    pub fn new() -> Self {
        Self {
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Materializer with a custom throttle (tests use `Duration::ZERO`)
    pub fn with_throttle(throttle: Duration) -> Self {
        Self { throttle }
    }

    /// Create a playlist named `name` and add `track_ids` in order.
    ///
    /// # Errors
    /// Fails only when the playlist itself cannot be created, or when the
    /// session has expired (an auth failure cannot be outrun by retrying
    /// tracks one at a time). Per-track add failures never propagate.
    pub async fn materialize<C, F>(
        &self,
        catalog: &C,
        frontend: &F,
        name: &str,
        track_ids: &[TrackId],
    ) -> Result<PlaylistHandle>
    where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        frontend.materializing(name, track_ids.len());
        let description = format!("Imported playlist — {} tracks", track_ids.len());
        let playlist = catalog.create_playlist(name, &description).await?;

        if track_ids.is_empty() {
            info!(playlist_id = %playlist.id, "Playlist created empty, nothing to add");
            return Ok(playlist);
        }

        debug!(playlist_id = %playlist.id, count = track_ids.len(), "Adding tracks in one batch");
        match catalog.add_tracks(&playlist.id, track_ids).await {
            Ok(()) => {
                info!(playlist_id = %playlist.id, added = track_ids.len(), "Batch add succeeded");
            }
            Err(e @ FerryError::Auth(_)) => return Err(e),
            Err(e) => {
                warn!(playlist_id = %playlist.id, error = %e, "Batch add failed, adding one at a time");
                frontend.batch_add_failed(&e.to_string());
                self.add_individually(catalog, frontend, &playlist.id, track_ids)
                    .await;
            }
        }

        Ok(playlist)
    }

    async fn add_individually<C, F>(
        &self,
        catalog: &C,
        frontend: &F,
        playlist_id: &str,
        track_ids: &[TrackId],
    ) where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        let mut added = 0usize;
        for (i, track_id) in track_ids.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.throttle).await;
            }
            match catalog.add_track(playlist_id, track_id).await {
                Ok(()) => added += 1,
                Err(e) => {
                    warn!(playlist_id = %playlist_id, track_id = %track_id, error = %e, "Could not add track, omitting");
                    frontend.track_add_failed(track_id, &e.to_string());
                }
            }
        }
        info!(
            playlist_id = %playlist_id,
            added,
            omitted = track_ids.len() - added,
            "Individual add pass finished"
        );
    }
}
