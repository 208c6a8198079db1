//! Track resolution: one source track to zero or one destination track.

use ferry_core::{Catalog, CatalogTrack, SourceTrack};
use std::time::Duration;
use tracing::debug;

/// Pause between catalog requests, to stay under the rate limit
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(300);

/// Result cap for the text-search fallback
pub const SEARCH_LIMIT: usize = 5;

/// Resolves source tracks against the destination catalog.
///
/// Resolution order is fixed: an exact recording-code lookup first (a hit
/// is authoritative and returned immediately), then one throttled text
/// search of "title + first artist", first hit wins. No retries, no
/// ranking. Lookup errors are swallowed and treated as "no match at this
/// step" so a flaky catalog never aborts a caller's loop over tracks.
#[derive(Debug, Clone)]
pub struct TrackResolver {
    throttle: Duration,
    search_limit: usize,
}

impl Default for TrackResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackResolver {
    /// Resolver with the default throttle and search limit
    pub fn new() -> Self {
        Self {
            throttle: DEFAULT_THROTTLE,
            search_limit: SEARCH_LIMIT,
        }
    }

    /// Resolver with a custom throttle (tests use `Duration::ZERO`)
    pub fn with_throttle(throttle: Duration) -> Self {
        Self {
            throttle,
            search_limit: SEARCH_LIMIT,
        }
    }

    /// Resolve `track` to a destination-catalog match, if any.
    pub async fn resolve<C>(&self, catalog: &C, track: &SourceTrack) -> Option<CatalogTrack>
    where
        C: Catalog + ?Sized,
    {
        if let Some(code) = track.recording_code.as_deref() {
            if !code.is_empty() {
                match catalog.track_by_code(code).await {
                    Ok(Some(hit)) => {
                        debug!(code = %code, track_id = %hit.id, "Recording code matched");
                        return Some(hit);
                    }
                    Ok(None) => {
                        debug!(code = %code, "No recording code match");
                    }
                    Err(e) => {
                        debug!(code = %code, error = %e, "Recording code lookup failed");
                    }
                }
            }
        }

        // Throttle before the text search to stay under the rate limit
        tokio::time::sleep(self.throttle).await;

        let query = format!("{} {}", track.title, track.primary_artist());
        match catalog.search_tracks(&query, self.search_limit).await {
            Ok(hits) => {
                let hit = hits.into_iter().next();
                debug!(query = %query, found = hit.is_some(), "Text search finished");
                hit
            }
            Err(e) => {
                debug!(query = %query, error = %e, "Text search failed");
                None
            }
        }
    }
}
