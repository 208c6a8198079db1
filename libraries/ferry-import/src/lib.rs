//! Playlist Ferry Import Pipeline
//!
//! Track resolution and import orchestration against a destination
//! catalog:
//!
//! - [`TrackResolver`] maps one source track to zero or one destination
//!   track (recording-code lookup first, text search fallback).
//! - [`PlaylistMaterializer`] creates and populates the destination
//!   playlist, tolerating partial add failures.
//! - [`ImportOrchestrator`] drives a whole track list through resolution
//!   under an automatic or interactive workflow.
//! - [`FolderBatchController`] runs a folder of discovered exports,
//!   isolating failures per playlist and accumulating a report.
//!
//! Everything here is strictly sequential: one catalog request in flight
//! at a time, with a fixed throttle pause between requests. Results and
//! add attempts always preserve input track order.

#![forbid(unsafe_code)]

mod batch;
mod materializer;
mod orchestrator;
mod resolver;

pub use batch::{default_playlist_name, BatchRun, FolderBatchController, SourceEntry};
pub use materializer::PlaylistMaterializer;
pub use orchestrator::ImportOrchestrator;
pub use resolver::{TrackResolver, DEFAULT_THROTTLE, SEARCH_LIMIT};
