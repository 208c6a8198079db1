/// Domain types for playlist migration
use serde::{Deserialize, Serialize};

/// Destination-catalog track identifier
pub type TrackId = String;

/// One track from the source catalog's playlist export.
///
/// Immutable once parsed; the import pipeline never mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTrack {
    /// Track title
    pub title: String,

    /// Artist names, display-joined in export order ("A, B, C")
    pub artists: String,

    /// Album name
    pub album: String,

    /// Industry-standard recording code (ISRC), unique when present
    pub recording_code: Option<String>,

    /// Preview audio snippet URL
    pub preview_url: Option<String>,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// Track duration in milliseconds
    pub duration_ms: u64,

    /// Explicit-content flag
    pub explicit: bool,
}

impl SourceTrack {
    /// "Title — Artists" display form used in prompts and summaries
    pub fn display_name(&self) -> String {
        format!("{} — {}", self.title, self.artists)
    }

    /// The first artist of a multi-artist track, used for text search
    pub fn primary_artist(&self) -> &str {
        self.artists.split(',').next().unwrap_or("").trim()
    }
}

/// A track handle in the destination catalog, as returned by resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Destination-catalog track identifier
    pub id: TrackId,

    /// Track title as known to the destination catalog
    pub title: String,

    /// Primary artist as known to the destination catalog
    pub artist: String,
}

impl CatalogTrack {
    /// "Title — Artist" display form
    pub fn display_name(&self) -> String {
        format!("{} — {}", self.title, self.artist)
    }
}

/// Terminal status of one track's import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    /// Not yet processed; never present after orchestration completes
    Pending,

    /// Resolved and included in the playlist's add attempt
    Added,

    /// Resolved, but the user declined it during interactive review
    Skipped,

    /// No destination-catalog match was found
    NotFound,
}

/// The per-track record produced by the import orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// The source track this outcome is for
    pub source: SourceTrack,

    /// The destination match, when resolution found one
    pub matched: Option<CatalogTrack>,

    /// Terminal status
    pub status: ImportStatus,
}

impl ImportOutcome {
    /// Outcome for a track that was resolved and will be added
    pub fn added(source: SourceTrack, matched: CatalogTrack) -> Self {
        Self {
            source,
            matched: Some(matched),
            status: ImportStatus::Added,
        }
    }

    /// Outcome for a resolved track the user declined
    pub fn skipped(source: SourceTrack, matched: CatalogTrack) -> Self {
        Self {
            source,
            matched: Some(matched),
            status: ImportStatus::Skipped,
        }
    }

    /// Outcome for a track with no destination match
    pub fn not_found(source: SourceTrack) -> Self {
        Self {
            source,
            matched: None,
            status: ImportStatus::NotFound,
        }
    }
}

/// Import workflow selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Resolve and add every track without prompting
    Automatic,

    /// Review each track individually before adding
    Interactive,
}

/// Reference to a playlist created in the destination catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistHandle {
    /// Destination-catalog playlist identifier
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Direct listen URL, when the catalog returned one
    #[serde(default)]
    pub listen_url: Option<String>,

    /// Share URL, when the catalog returned one
    #[serde(default)]
    pub share_url: Option<String>,
}

/// Derive a shareable URL for a playlist.
///
/// Probes the named URL fields in a fixed order (listen, then share), then
/// falls back to the canonical URL built from the playlist identifier.
/// Returns `None` only for a handle with an empty identifier and no URLs.
pub fn share_link(playlist: &PlaylistHandle) -> Option<String> {
    for candidate in [&playlist.listen_url, &playlist.share_url] {
        if let Some(url) = candidate {
            if !url.is_empty() {
                return Some(url.clone());
            }
        }
    }

    if playlist.id.is_empty() {
        return None;
    }
    Some(format!(
        "https://listen.destination.example/playlist/{}",
        playlist.id
    ))
}

/// Aggregate report for a folder batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderReport {
    /// Total export files discovered in the folder
    pub discovered: usize,

    /// Playlist names imported successfully
    pub imported: Vec<String>,

    /// Entries skipped (empty, declined, or cancelled-and-continued)
    pub skipped: Vec<String>,

    /// Entries that failed, with the reason
    pub failed: Vec<(String, String)>,
}

impl FolderReport {
    /// Report for a discovery pass that found `discovered` export files
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            ..Self::default()
        }
    }

    /// Number of entries accounted for so far
    pub fn processed(&self) -> usize {
        self.imported.len() + self.skipped.len() + self.failed.len()
    }
}
