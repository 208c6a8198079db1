//! Folder batch controller behavior: per-entry isolation, skip/fail
//! bookkeeping, and continue-or-abort after cancellation.


use ferry_core::ImportMode;
use ferry_import::{default_playlist_name, FolderBatchController, ImportOrchestrator, SourceEntry};
use std::sync::atomic::Ordering;
use std::time::Duration;
use test_helpers::{hit, track, Reply, ScriptedFrontend, StubCatalog};

fn controller() -> FolderBatchController {
    FolderBatchController::with_orchestrator(ImportOrchestrator::with_throttle(Duration::ZERO))
}

fn entry(file_id: &str, titles: &[&str]) -> SourceEntry {
    SourceEntry {
        file_id: file_id.to_string(),
        tracks: Ok(titles.iter().map(|t| track(t, "Artist", None)).collect()),
    }
}

fn failed_entry(file_id: &str, reason: &str) -> SourceEntry {
    SourceEntry {
        file_id: file_id.to_string(),
        tracks: Err(reason.to_string()),
    }
}

/// Catalog that resolves any "Song N" title used by these tests
fn catalog() -> StubCatalog {
    let mut catalog = StubCatalog::new();
    for n in 1..=5 {
        catalog = catalog.with_search(
            &format!("Song {} Artist", n),
            vec![hit(&format!("t-{}", n), &format!("Song {}", n), "Artist")],
        );
    }
    catalog
}

#[tokio::test]
async fn empty_declined_and_imported_entries_are_reported_apart() {
    let catalog = catalog();
    let frontend = ScriptedFrontend::new();
    // B is declined at the import question; A never reaches a prompt
    frontend.script_confirm_import(Reply::Value(false));

    let entries = vec![
        entry("a_empty.csv", &[]),
        entry("b_declined.csv", &["Song 1", "Song 2", "Song 3", "Song 4", "Song 5"]),
        entry("c_keepers.csv", &["Song 1", "Song 2"]),
    ];

    let run = controller().process(&catalog, &frontend, entries).await;

    assert!(!run.cancelled);
    assert_eq!(run.report.discovered, 3);
    assert_eq!(run.report.skipped, vec!["a_empty.csv", "b_declined.csv"]);
    assert_eq!(run.report.imported, vec!["C Keepers"]);
    assert!(run.report.failed.is_empty());
}

#[tokio::test]
async fn parse_failures_are_recorded_without_prompting() {
    let catalog = catalog();
    let frontend = ScriptedFrontend::new();

    let entries = vec![
        failed_entry("broken.csv", "missing header row"),
        entry("fine.csv", &["Song 1"]),
    ];

    let run = controller().process(&catalog, &frontend, entries).await;

    assert_eq!(
        run.report.failed,
        vec![("broken.csv".to_string(), "missing header row".to_string())]
    );
    assert_eq!(run.report.imported, vec!["Fine"]);
    // only the parseable entry asked anything
    assert_eq!(frontend.confirm_import_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn one_failing_playlist_does_not_stop_the_batch() {
    let catalog = catalog();
    catalog.fail_create_times.store(1, Ordering::SeqCst);
    let frontend = ScriptedFrontend::new();

    let entries = vec![
        entry("doomed_mix.csv", &["Song 1"]),
        entry("fine.csv", &["Song 2"]),
    ];

    let run = controller().process(&catalog, &frontend, entries).await;

    assert_eq!(run.report.failed.len(), 1);
    assert_eq!(run.report.failed[0].0, "Doomed Mix");
    assert!(run.report.failed[0].1.contains("playlist creation failed"));
    assert_eq!(run.report.imported, vec!["Fine"]);
}

#[tokio::test]
async fn cancellation_then_continue_skips_and_proceeds() {
    let catalog = catalog();
    let frontend = ScriptedFrontend::new();
    // first entry runs interactive and the user cancels at the first track
    frontend.script_mode(Reply::Value(ImportMode::Interactive));
    frontend.script_confirm_add(Reply::Cancel);
    frontend.script_continue(Reply::Value(true));

    let entries = vec![
        entry("abandoned.csv", &["Song 1"]),
        entry("fine.csv", &["Song 2"]),
    ];

    let run = controller().process(&catalog, &frontend, entries).await;

    assert!(!run.cancelled);
    assert_eq!(run.report.skipped, vec!["Abandoned"]);
    assert_eq!(run.report.imported, vec!["Fine"]);
    // the cancelled run never materialized a playlist
    assert_eq!(catalog.created_names(), vec!["Fine"]);
}

#[tokio::test]
async fn cancellation_then_abort_ends_the_batch_with_partial_report() {
    let catalog = catalog();
    let frontend = ScriptedFrontend::new();
    // entry one imports automatically; entry two runs interactive, the
    // user cancels at its first track and declines to continue
    frontend.script_mode(Reply::Value(ImportMode::Automatic));
    frontend.script_mode(Reply::Value(ImportMode::Interactive));
    frontend.script_confirm_add(Reply::Cancel);
    frontend.script_continue(Reply::Value(false));

    let entries = vec![
        entry("done_first.csv", &["Song 1"]),
        entry("abandoned.csv", &["Song 2"]),
        entry("never_reached.csv", &["Song 3"]),
    ];

    let run = controller().process(&catalog, &frontend, entries).await;

    assert!(run.cancelled);
    assert_eq!(run.report.imported, vec!["Done First"]);
    assert!(run.report.skipped.is_empty());
    assert!(run.report.failed.is_empty());
    // the third entry was never processed
    assert_eq!(run.report.processed(), 1);
    assert_eq!(run.report.discovered, 3);
}

#[tokio::test]
async fn chosen_playlist_name_overrides_the_default() {
    let catalog = catalog();
    let frontend = ScriptedFrontend::new();
    frontend.script_name(Reply::Value("Hand Picked".to_string()));

    let entries = vec![entry("raw_file_name.csv", &["Song 1"])];
    let run = controller().process(&catalog, &frontend, entries).await;

    assert_eq!(run.report.imported, vec!["Hand Picked"]);
    assert_eq!(catalog.created_names(), vec!["Hand Picked"]);
}

#[tokio::test]
async fn default_name_is_derived_from_the_file_name() {
    assert_eq!(default_playlist_name("summer_road-trip.csv"), "Summer Road Trip");
}
