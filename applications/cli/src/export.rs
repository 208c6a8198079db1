//! Parsing of source-catalog playlist exports.
//!
//! Exports are tabular files in the shape produced by common playlist
//! export tools: a header row naming columns like "Track Name" and
//! "ISRC", delimited by tabs or commas, possibly starting with a UTF-8
//! byte-order mark. Missing fields fall back to defaults instead of
//! failing the row; only an unreadable file or a broken record is an
//! error.

use ferry_core::{FerryError, Result, SourceTrack};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Parse the export file at `path` into source tracks, in file order.
pub fn load_export(path: &Path) -> Result<Vec<SourceTrack>> {
    let raw = std::fs::read_to_string(path)?;
    parse_export(&raw)
}

/// Parse export file contents.
pub fn parse_export(raw: &str) -> Result<Vec<SourceTrack>> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let delimiter = sniff_delimiter(raw);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers: HashMap<String, usize> = reader
        .headers()
        .map_err(|e| FerryError::Parse(format!("could not read header row: {}", e)))?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();

    let mut tracks = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| FerryError::Parse(format!("malformed export row: {}", e)))?;
        let field = |name: &str| -> &str {
            headers
                .get(name)
                .and_then(|&i| record.get(i))
                .map(str::trim)
                .unwrap_or("")
        };

        let duration_ms = field("Track Duration (ms)").parse::<u64>().unwrap_or(0);
        let explicit = matches!(
            field("Explicit").to_lowercase().as_str(),
            "true" | "yes" | "1"
        );

        tracks.push(SourceTrack {
            title: non_empty_or(field("Track Name"), "Unknown"),
            artists: non_empty_or(field("Artist Name(s)"), "Unknown"),
            album: non_empty_or(field("Album Name"), "Unknown"),
            recording_code: optional(field("ISRC")),
            preview_url: optional(field("Track Preview URL")),
            cover_url: optional(field("Album Image URL")),
            duration_ms,
            explicit,
        });
    }

    debug!(tracks = tracks.len(), "Export parsed");
    Ok(tracks)
}

/// Tab-delimited when the header row contains a tab, comma otherwise
fn sniff_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or("");
    if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMA_EXPORT: &str = "\
Track Name,Artist Name(s),Album Name,ISRC,Track Preview URL,Album Image URL,Track Duration (ms),Explicit
Karma Police,Radiohead,OK Computer,GBAYE9700073,https://p/1,https://i/1,261000,False
Hurt,\"Nine Inch Nails, Atticus Ross\",The Downward Spiral,,,,373000,True
";

    #[test]
    fn parses_comma_delimited_export() {
        let tracks = parse_export(COMMA_EXPORT).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Karma Police");
        assert_eq!(tracks[0].recording_code.as_deref(), Some("GBAYE9700073"));
        assert_eq!(tracks[0].duration_ms, 261_000);
        assert!(!tracks[0].explicit);
        assert_eq!(tracks[1].artists, "Nine Inch Nails, Atticus Ross");
        assert!(tracks[1].explicit);
        assert!(tracks[1].recording_code.is_none());
        assert!(tracks[1].preview_url.is_none());
    }

    #[test]
    fn parses_tab_delimited_export() {
        let raw = "Track Name\tArtist Name(s)\tISRC\nHurt\tJohnny Cash\tUSCA20300305\n";
        let tracks = parse_export(raw).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Hurt");
        assert_eq!(tracks[0].artists, "Johnny Cash");
        assert_eq!(tracks[0].recording_code.as_deref(), Some("USCA20300305"));
    }

    #[test]
    fn tolerates_byte_order_mark() {
        let raw = "\u{feff}Track Name,Artist Name(s)\nSong,Artist\n";
        let tracks = parse_export(raw).unwrap();
        assert_eq!(tracks[0].title, "Song");
    }

    #[test]
    fn missing_fields_get_defaults() {
        let raw = "Track Name,Artist Name(s)\n,\n";
        let tracks = parse_export(raw).unwrap();
        assert_eq!(tracks[0].title, "Unknown");
        assert_eq!(tracks[0].artists, "Unknown");
        assert_eq!(tracks[0].album, "Unknown");
        assert_eq!(tracks[0].duration_ms, 0);
        assert!(!tracks[0].explicit);
    }

    #[test]
    fn malformed_duration_defaults_to_zero() {
        let raw = "Track Name,Track Duration (ms)\nSong,not-a-number\n";
        let tracks = parse_export(raw).unwrap();
        assert_eq!(tracks[0].duration_ms, 0);
    }

    #[test]
    fn explicit_flag_accepts_yes_and_one() {
        let raw = "Track Name,Explicit\nA,yes\nB,1\nC,no\n";
        let tracks = parse_export(raw).unwrap();
        assert!(tracks[0].explicit);
        assert!(tracks[1].explicit);
        assert!(!tracks[2].explicit);
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let raw = " Track Name , Artist Name(s) \nSong,Artist\n";
        let tracks = parse_export(raw).unwrap();
        assert_eq!(tracks[0].title, "Song");
        assert_eq!(tracks[0].artists, "Artist");
    }

    #[test]
    fn empty_export_yields_no_tracks() {
        let raw = "Track Name,Artist Name(s)\n";
        assert!(parse_export(raw).unwrap().is_empty());
    }
}
