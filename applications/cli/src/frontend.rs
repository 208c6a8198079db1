//! Terminal implementation of the import pipeline's frontend capability.
//!
//! Prompts go through dialoguer, the automatic-mode resolution pass gets
//! an indicatif progress bar, and tables degrade to plain text. Cover art
//! and audio previews degrade to printing their URLs.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use ferry_core::{
    share_link, CatalogTrack, Decision, FerryError, FolderReport, Frontend, ImportMode,
    ImportOutcome, ImportStatus, PlaylistHandle, Result, SourceTrack, TrackId,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::ErrorKind;
use std::sync::Mutex;
use tracing::warn;

/// Interactive terminal frontend.
pub struct TerminalFrontend {
    theme: ColorfulTheme,
    progress: Mutex<Option<ProgressBar>>,
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalFrontend {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            progress: Mutex::new(None),
        }
    }

    /// Print the aggregate report of a folder batch run.
    pub fn render_report(&self, report: &FolderReport) {
        println!("\n{}", rule("Folder Import Report"));
        println!("  Discovered: {} export file(s)", report.discovered);
        println!("  Imported:   {}", report.imported.len());
        for name in &report.imported {
            println!("    ✓  {}", name);
        }
        println!("  Skipped:    {}", report.skipped.len());
        for name in &report.skipped {
            println!("    -  {}", name);
        }
        println!("  Failed:     {}", report.failed.len());
        for (name, reason) in &report.failed {
            println!("    ✗  {}: {}", name, reason);
        }
    }

    /// Offer to open the created playlist in a browser.
    pub fn offer_open_in_browser(&self, playlist: &PlaylistHandle) -> Result<()> {
        let Some(url) = share_link(playlist) else {
            println!("Could not determine a playlist URL.");
            return Ok(());
        };

        let open_it = Confirm::with_theme(&self.theme)
            .with_prompt("Open playlist in browser?")
            .default(true)
            .interact()
            .map_err(prompt_err)?;

        if open_it {
            println!("Opening {}", url);
            if let Err(e) = open::that(&url) {
                warn!(error = %e, "Could not open browser");
                println!("Open it yourself: {}", url);
            }
        } else {
            println!("Playlist: {}", url);
        }
        Ok(())
    }
}

impl Frontend for TerminalFrontend {
    fn automatic_started(&self, total: usize) {
        println!("\nSearching the destination catalog…");
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} [{pos}/{len}] {msg}")
        {
            bar.set_style(style);
        }
        *self.progress.lock().unwrap() = Some(bar);
    }

    fn automatic_finished(&self) {
        if let Some(bar) = self.progress.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }

    fn begin_track(&self, index: usize, total: usize, track: &SourceTrack) {
        let progress = self.progress.lock().unwrap();
        if let Some(bar) = progress.as_ref() {
            bar.set_message(track.title.clone());
            return;
        }
        drop(progress);

        println!("\n{}", rule(&format!("Track {}/{}", index, total)));
        println!("  {}", track.title);
        println!("  Artist:   {}", track.artists);
        println!("  Album:    {}", track.album);
        println!("  ISRC:     {}", track.recording_code.as_deref().unwrap_or("—"));
        println!(
            "  Duration: {}{}",
            format_duration(track.duration_ms),
            if track.explicit { "  [Explicit]" } else { "" }
        );
    }

    fn resolution(&self, _track: &SourceTrack, matched: Option<&CatalogTrack>) {
        let progress = self.progress.lock().unwrap();
        if let Some(bar) = progress.as_ref() {
            bar.inc(1);
            return;
        }
        drop(progress);

        match matched {
            Some(hit) => println!("  Found: {}", hit.display_name()),
            None => println!("  Not found in the destination catalog."),
        }
    }

    fn batch_add_failed(&self, reason: &str) {
        println!("Batch add failed ({}), adding one at a time…", reason);
    }

    fn track_add_failed(&self, track_id: &TrackId, reason: &str) {
        println!("  Could not add track {}: {}", track_id, reason);
    }

    fn materializing(&self, name: &str, track_count: usize) {
        println!("\nCreating playlist '{}' with {} track(s)…", name, track_count);
    }

    fn show_overview(&self, file_id: &str, tracks: &[SourceTrack]) {
        println!("\n{}", rule(&format!("{} — {} tracks", file_id, tracks.len())));
        println!("{:>4}  {:<40} {:<30} ISRC", "#", "Track", "Artist(s)");
        for (i, track) in tracks.iter().enumerate() {
            println!(
                "{:>4}  {:<40} {:<30} {}",
                i + 1,
                truncate(&track.title, 39),
                truncate(&track.artists, 29),
                track.recording_code.as_deref().unwrap_or("—"),
            );
        }
    }

    fn show_summary(&self, outcomes: &[ImportOutcome], playlist: &PlaylistHandle) {
        let added: Vec<_> = by_status(outcomes, ImportStatus::Added);
        let skipped: Vec<_> = by_status(outcomes, ImportStatus::Skipped);
        let not_found: Vec<_> = by_status(outcomes, ImportStatus::NotFound);

        println!("\n{}", rule("Import Summary"));
        println!("  Added:      {}", added.len());
        println!("  Skipped:    {}", skipped.len());
        println!("  Not found:  {}", not_found.len());

        if !added.is_empty() {
            println!("\nTracks added to '{}':", playlist.name);
            for outcome in &added {
                let name = outcome
                    .matched
                    .as_ref()
                    .map(CatalogTrack::display_name)
                    .unwrap_or_else(|| outcome.source.display_name());
                println!("  ✓  {}", name);
            }
        }

        if !not_found.is_empty() {
            println!("\nCould not find in the destination catalog:");
            for outcome in &not_found {
                println!("  ✗  {}", outcome.source.display_name());
            }
        }
    }

    fn review_media(&self, track: &SourceTrack) -> Result<()> {
        if let Some(cover_url) = &track.cover_url {
            let show = Confirm::with_theme(&self.theme)
                .with_prompt("  Show cover art?")
                .default(false)
                .interact()
                .map_err(prompt_err)?;
            if show {
                // no inline rendering in a plain terminal
                println!("  Cover: {}", cover_url);
            }
        }

        if let Some(preview_url) = &track.preview_url {
            let play = Confirm::with_theme(&self.theme)
                .with_prompt("  Play preview?")
                .default(false)
                .interact()
                .map_err(prompt_err)?;
            if play {
                println!("  Preview: {}", preview_url);
            }
        }

        Ok(())
    }

    fn confirm_add(&self, matched: &CatalogTrack) -> Result<Decision> {
        let add = Confirm::with_theme(&self.theme)
            .with_prompt(format!("  Add '{}' to the playlist?", matched.display_name()))
            .default(true)
            .interact()
            .map_err(prompt_err)?;
        Ok(if add { Decision::Add } else { Decision::Skip })
    }

    fn confirm_import(&self, file_id: &str, track_count: usize) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!("Import '{}' ({} tracks)?", file_id, track_count))
            .default(true)
            .interact()
            .map_err(prompt_err)
    }

    fn ask_playlist_name(&self, default: &str) -> Result<String> {
        Input::with_theme(&self.theme)
            .with_prompt("Playlist name")
            .default(default.to_string())
            .interact_text()
            .map_err(prompt_err)
    }

    fn ask_mode(&self) -> Result<ImportMode> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("How would you like to import?")
            .items(&[
                "Add all tracks automatically",
                "Review each track individually",
            ])
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        Ok(match choice {
            1 => ImportMode::Interactive,
            _ => ImportMode::Automatic,
        })
    }

    fn confirm_continue(&self) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Continue with the remaining playlists?")
            .default(true)
            .interact()
            .map_err(prompt_err)
    }
}

/// Interrupt and EOF mean the user backed out; anything else is a broken
/// terminal.
fn prompt_err(e: dialoguer::Error) -> FerryError {
    match e {
        dialoguer::Error::IO(io)
            if matches!(io.kind(), ErrorKind::Interrupted | ErrorKind::UnexpectedEof) =>
        {
            FerryError::Cancelled
        }
        other => FerryError::Frontend(other.to_string()),
    }
}

fn rule(title: &str) -> String {
    format!("{}  {}", "─".repeat(50), title)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

fn by_status(outcomes: &[ImportOutcome], status: ImportStatus) -> Vec<&ImportOutcome> {
    outcomes.iter().filter(|o| o.status == status).collect()
}
