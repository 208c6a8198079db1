/// User-interaction capability for the import pipeline
use crate::error::Result;
use crate::types::{CatalogTrack, ImportMode, ImportOutcome, PlaylistHandle, SourceTrack, TrackId};

/// The user's answer when asked to confirm a resolved track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Add the track to the playlist
    Add,

    /// Leave the track out
    Skip,
}

/// Presentation and prompting capability, injected into every component
/// that needs to talk to the user.
///
/// The pipeline itself has no dependency on any rendering implementation;
/// the CLI supplies a terminal frontend, tests supply scripted stubs, and
/// [`NullFrontend`] runs everything headless with the defaults below.
///
/// Prompting methods are fallible so that a closed stdin or an interrupt
/// can surface as [`FerryError::Cancelled`](crate::FerryError::Cancelled);
/// display-only methods are infallible and default to doing nothing.
pub trait Frontend: Send + Sync {
    // === Display-only hooks ===

    /// An automatic-mode resolution pass over `total` tracks is starting
    fn automatic_started(&self, total: usize) {
        let _ = total;
    }

    /// The automatic-mode resolution pass finished
    fn automatic_finished(&self) {}

    /// Track `index` (1-based) of `total` is about to be processed
    fn begin_track(&self, index: usize, total: usize, track: &SourceTrack) {
        let _ = (index, total, track);
    }

    /// Resolution finished for `track`; `matched` is the result
    fn resolution(&self, track: &SourceTrack, matched: Option<&CatalogTrack>) {
        let _ = (track, matched);
    }

    /// The batch add call failed and individual adds will be attempted
    fn batch_add_failed(&self, reason: &str) {
        let _ = reason;
    }

    /// An individual track add failed; the track is omitted
    fn track_add_failed(&self, track_id: &TrackId, reason: &str) {
        let _ = (track_id, reason);
    }

    /// A playlist is being created with `track_count` resolved tracks
    fn materializing(&self, name: &str, track_count: usize) {
        let _ = (name, track_count);
    }

    /// Show the track overview for one discovered export file
    fn show_overview(&self, file_id: &str, tracks: &[SourceTrack]) {
        let _ = (file_id, tracks);
    }

    /// Show the per-track summary after an import run
    fn show_summary(&self, outcomes: &[ImportOutcome], playlist: &PlaylistHandle) {
        let _ = (outcomes, playlist);
    }

    // === Prompts ===

    /// Offer cover art and audio preview for a track under review.
    ///
    /// Both offers are skippable; implementations without media support
    /// degrade to printing the URLs or doing nothing.
    fn review_media(&self, track: &SourceTrack) -> Result<()> {
        let _ = track;
        Ok(())
    }

    /// Ask whether to add a resolved track during interactive review
    fn confirm_add(&self, matched: &CatalogTrack) -> Result<Decision> {
        let _ = matched;
        Ok(Decision::Add)
    }

    /// Ask whether to import a discovered playlist at all
    fn confirm_import(&self, file_id: &str, track_count: usize) -> Result<bool> {
        let _ = (file_id, track_count);
        Ok(true)
    }

    /// Ask for the playlist name, offering `default`
    fn ask_playlist_name(&self, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    /// Ask which import mode to use
    fn ask_mode(&self) -> Result<ImportMode> {
        Ok(ImportMode::Automatic)
    }

    /// After a cancelled playlist, ask whether to continue with the rest
    /// of the batch
    fn confirm_continue(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Frontend that never prompts and never displays anything.
///
/// Every question is answered with its default: import everything,
/// automatically, under the suggested name.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrontend;

impl Frontend for NullFrontend {}
