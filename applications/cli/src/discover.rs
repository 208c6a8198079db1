//! Folder discovery of playlist export files.

use crate::export;
use ferry_import::SourceEntry;
use std::path::Path;
use tracing::debug;

/// Discover export files (`*.csv`, case-insensitive) directly inside
/// `dir`, in file-name order, parsing each one.
///
/// A file that fails to parse becomes an entry carrying the error text;
/// the batch controller reports it without stopping the run.
pub fn discover_entries(dir: &Path) -> std::io::Result<Vec<SourceEntry>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    debug!(dir = %dir.display(), found = paths.len(), "Discovered export files");

    Ok(paths
        .into_iter()
        .map(|path| {
            let file_id = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string();
            let tracks = export::load_export(&path).map_err(|e| e.to_string());
            SourceEntry { file_id, tracks }
        })
        .collect())
}
