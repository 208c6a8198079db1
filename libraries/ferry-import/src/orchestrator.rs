//! Import orchestration: resolve a whole track list and materialize it.

use crate::materializer::PlaylistMaterializer;
use crate::resolver::TrackResolver;
use ferry_core::{
    Catalog, Decision, Frontend, ImportMode, ImportOutcome, ImportStatus, PlaylistHandle, Result,
    SourceTrack, TrackId,
};
use std::time::Duration;
use tracing::info;

/// Drives one playlist's import from source tracks to destination
/// playlist.
///
/// Every input track yields exactly one terminal [`ImportOutcome`], in
/// input order; the materializer then receives the matched ids in that
/// same order. A cancellation raised by the frontend during the loop
/// propagates out before any playlist is created.
#[derive(Debug, Clone, Default)]
pub struct ImportOrchestrator {
    resolver: TrackResolver,
    materializer: PlaylistMaterializer,
}

impl ImportOrchestrator {
    /// Orchestrator with the default throttle
    pub fn new() -> Self {
        Self::default()
    }

    /// Orchestrator with a custom throttle applied to resolution and
    /// add fallbacks alike (tests use `Duration::ZERO`)
    pub fn with_throttle(throttle: Duration) -> Self {
        Self {
            resolver: TrackResolver::with_throttle(throttle),
            materializer: PlaylistMaterializer::with_throttle(throttle),
        }
    }

    /// Run the import for `tracks` under the chosen mode.
    ///
    /// # Errors
    /// Propagates user cancellation from the frontend, playlist-creation
    /// failures, and expired-session errors. Per-track lookup and add
    /// failures never surface here.
    pub async fn run<C, F>(
        &self,
        catalog: &C,
        frontend: &F,
        tracks: &[SourceTrack],
        playlist_name: &str,
        mode: ImportMode,
    ) -> Result<(Vec<ImportOutcome>, PlaylistHandle)>
    where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        let outcomes = match mode {
            ImportMode::Automatic => self.resolve_automatic(catalog, frontend, tracks).await,
            ImportMode::Interactive => self.resolve_interactive(catalog, frontend, tracks).await?,
        };

        let track_ids: Vec<TrackId> = outcomes
            .iter()
            .filter(|outcome| outcome.status == ImportStatus::Added)
            .filter_map(|outcome| outcome.matched.as_ref())
            .map(|matched| matched.id.clone())
            .collect();

        info!(
            playlist = %playlist_name,
            tracks = tracks.len(),
            matched = track_ids.len(),
            ?mode,
            "Resolution pass complete, materializing"
        );

        let playlist = self
            .materializer
            .materialize(catalog, frontend, playlist_name, &track_ids)
            .await?;

        Ok((outcomes, playlist))
    }

    /// Resolve every track with no user interaction.
    async fn resolve_automatic<C, F>(
        &self,
        catalog: &C,
        frontend: &F,
        tracks: &[SourceTrack],
    ) -> Vec<ImportOutcome>
    where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        let total = tracks.len();
        frontend.automatic_started(total);

        let mut outcomes = Vec::with_capacity(total);
        for (i, track) in tracks.iter().enumerate() {
            frontend.begin_track(i + 1, total, track);
            let matched = self.resolver.resolve(catalog, track).await;
            frontend.resolution(track, matched.as_ref());
            outcomes.push(match matched {
                Some(hit) => ImportOutcome::added(track.clone(), hit),
                None => ImportOutcome::not_found(track.clone()),
            });
        }

        frontend.automatic_finished();
        outcomes
    }

    /// Resolve each track with per-track review and confirmation.
    async fn resolve_interactive<C, F>(
        &self,
        catalog: &C,
        frontend: &F,
        tracks: &[SourceTrack],
    ) -> Result<Vec<ImportOutcome>>
    where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        let total = tracks.len();
        let mut outcomes = Vec::with_capacity(total);

        for (i, track) in tracks.iter().enumerate() {
            frontend.begin_track(i + 1, total, track);
            frontend.review_media(track)?;

            let matched = self.resolver.resolve(catalog, track).await;
            frontend.resolution(track, matched.as_ref());

            outcomes.push(match matched {
                Some(hit) => match frontend.confirm_add(&hit)? {
                    Decision::Add => ImportOutcome::added(track.clone(), hit),
                    Decision::Skip => ImportOutcome::skipped(track.clone(), hit),
                },
                None => ImportOutcome::not_found(track.clone()),
            });
        }

        Ok(outcomes)
    }
}
