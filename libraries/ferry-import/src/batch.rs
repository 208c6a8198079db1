//! Folder batch control: import many discovered exports in one run.

use crate::orchestrator::ImportOrchestrator;
use ferry_core::{Catalog, FolderReport, Frontend, ImportMode, Result, SourceTrack};
use tracing::{info, warn};

/// One discovered export file, already parsed (or not) upstream.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// File name the entry was discovered under
    pub file_id: String,

    /// Parsed tracks, or the parse error text when parsing failed
    pub tracks: std::result::Result<Vec<SourceTrack>, String>,
}

/// Result of a folder batch run.
///
/// The report covers every entry processed before the run ended; when the
/// user aborted the batch after a cancellation, `cancelled` is set and the
/// caller is expected to show the report before exiting non-zero.
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// Aggregate per-entry report
    pub report: FolderReport,

    /// True when the user aborted the remainder of the batch
    pub cancelled: bool,
}

/// Drives confirmation, naming, mode selection and the orchestrator for
/// each entry of a discovered folder, isolating failures per playlist.
#[derive(Debug, Clone, Default)]
pub struct FolderBatchController {
    orchestrator: ImportOrchestrator,
}

impl FolderBatchController {
    /// Controller with the default orchestrator
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller wrapping a specific orchestrator (tests pass one with a
    /// zero throttle)
    pub fn with_orchestrator(orchestrator: ImportOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Process every entry in discovery order.
    ///
    /// A parse failure or an empty entry is recorded without prompting;
    /// otherwise the user confirms the import, names the playlist, picks a
    /// mode, and the orchestrator runs. Errors are confined to their
    /// entry; only a cancellation the user declines to continue past ends
    /// the run early.
    pub async fn process<C, F>(&self, catalog: &C, frontend: &F, entries: Vec<SourceEntry>) -> BatchRun
    where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        let mut report = FolderReport::new(entries.len());

        for entry in entries {
            let tracks = match entry.tracks {
                Ok(tracks) => tracks,
                Err(reason) => {
                    warn!(file = %entry.file_id, error = %reason, "Skipping unparseable export");
                    report.failed.push((entry.file_id, reason));
                    continue;
                }
            };

            if tracks.is_empty() {
                info!(file = %entry.file_id, "Export has no tracks, skipping");
                report.skipped.push(entry.file_id);
                continue;
            }

            frontend.show_overview(&entry.file_id, &tracks);

            let name = default_playlist_name(&entry.file_id);
            match self.process_entry(catalog, frontend, &entry.file_id, &name, &tracks).await {
                Ok(Some(imported_name)) => report.imported.push(imported_name),
                Ok(None) => report.skipped.push(entry.file_id),
                Err(e) if e.is_cancelled() => {
                    info!(file = %entry.file_id, "Playlist cancelled mid-import");
                    let continue_batch = frontend.confirm_continue().unwrap_or(false);
                    if continue_batch {
                        report.skipped.push(name);
                    } else {
                        return BatchRun {
                            report,
                            cancelled: true,
                        };
                    }
                }
                Err(e) => {
                    warn!(file = %entry.file_id, error = %e, "Playlist import failed");
                    report.failed.push((name, e.to_string()));
                }
            }
        }

        BatchRun {
            report,
            cancelled: false,
        }
    }

    /// Run one confirmed entry. `Ok(None)` means the user declined it.
    async fn process_entry<C, F>(
        &self,
        catalog: &C,
        frontend: &F,
        file_id: &str,
        default_name: &str,
        tracks: &[SourceTrack],
    ) -> Result<Option<String>>
    where
        C: Catalog + ?Sized,
        F: Frontend + ?Sized,
    {
        if !frontend.confirm_import(file_id, tracks.len())? {
            return Ok(None);
        }

        let name = frontend.ask_playlist_name(default_name)?;
        let mode: ImportMode = frontend.ask_mode()?;

        let (outcomes, playlist) = self
            .orchestrator
            .run(catalog, frontend, tracks, &name, mode)
            .await?;
        frontend.show_summary(&outcomes, &playlist);

        Ok(Some(name))
    }
}

/// Derive the default playlist name from an export file name:
/// extension stripped, underscores and hyphens become spaces, title-cased.
pub fn default_playlist_name(file_id: &str) -> String {
    let stem = std::path::Path::new(file_id)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_id);

    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
