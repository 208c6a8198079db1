//! Import orchestrator behavior in automatic and interactive modes.


use ferry_core::{Decision, FerryError, ImportMode, ImportStatus, SourceTrack};
use ferry_import::ImportOrchestrator;
use std::sync::atomic::Ordering;
use std::time::Duration;
use test_helpers::{hit, track, Reply, ScriptedFrontend, StubCatalog};

fn orchestrator() -> ImportOrchestrator {
    ImportOrchestrator::with_throttle(Duration::ZERO)
}

fn three_tracks() -> Vec<SourceTrack> {
    vec![
        track("Karma Police", "Radiohead", Some("USX9P1234567")),
        track("Hurt", "Nine Inch Nails", None),
        track("Obscure B-Side", "Nobody", None),
    ]
}

/// Catalog resolving the first two of [`three_tracks`], never the third
fn matching_catalog() -> StubCatalog {
    StubCatalog::new()
        .with_code("USX9P1234567", hit("t-1", "Karma Police", "Radiohead"))
        .with_search(
            "Hurt Nine Inch Nails",
            vec![hit("t-2", "Hurt", "Nine Inch Nails")],
        )
}

#[tokio::test]
async fn every_track_yields_exactly_one_terminal_outcome() {
    let catalog = matching_catalog();
    let frontend = ScriptedFrontend::new();
    let tracks = three_tracks();

    let (outcomes, _) = orchestrator()
        .run(&catalog, &frontend, &tracks, "Mix", ImportMode::Automatic)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), tracks.len());
    assert!(outcomes.iter().all(|o| o.status != ImportStatus::Pending));
}

#[tokio::test]
async fn automatic_mode_adds_matches_and_marks_the_rest_not_found() {
    let catalog = matching_catalog();
    let frontend = ScriptedFrontend::new();

    let (outcomes, playlist) = orchestrator()
        .run(&catalog, &frontend, &three_tracks(), "Mix", ImportMode::Automatic)
        .await
        .unwrap();

    assert_eq!(outcomes[0].status, ImportStatus::Added);
    assert_eq!(outcomes[1].status, ImportStatus::Added);
    assert_eq!(outcomes[2].status, ImportStatus::NotFound);
    assert!(outcomes[2].matched.is_none());

    // unmatched track never reaches the materializer
    assert_eq!(catalog.added_ids(), vec!["t-1".to_string(), "t-2".to_string()]);
    assert_eq!(playlist.name, "Mix");
}

#[tokio::test]
async fn automatic_mode_never_prompts() {
    let catalog = matching_catalog();
    let frontend = ScriptedFrontend::new();

    orchestrator()
        .run(&catalog, &frontend, &three_tracks(), "Mix", ImportMode::Automatic)
        .await
        .unwrap();

    assert_eq!(frontend.confirm_add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn interactive_decline_yields_skipped_and_excludes_the_id() {
    let catalog = matching_catalog();
    let frontend = ScriptedFrontend::new();
    frontend.script_confirm_add(Reply::Value(Decision::Add)); // Karma Police
    frontend.script_confirm_add(Reply::Value(Decision::Skip)); // Hurt

    let (outcomes, _) = orchestrator()
        .run(&catalog, &frontend, &three_tracks(), "Mix", ImportMode::Interactive)
        .await
        .unwrap();

    assert_eq!(outcomes[0].status, ImportStatus::Added);
    assert_eq!(outcomes[1].status, ImportStatus::Skipped);
    assert!(outcomes[1].matched.is_some());
    assert_eq!(outcomes[2].status, ImportStatus::NotFound);

    assert_eq!(catalog.added_ids(), vec!["t-1".to_string()]);
}

#[tokio::test]
async fn interactive_mode_does_not_prompt_for_unmatched_tracks() {
    let catalog = matching_catalog();
    let frontend = ScriptedFrontend::new();

    orchestrator()
        .run(&catalog, &frontend, &three_tracks(), "Mix", ImportMode::Interactive)
        .await
        .unwrap();

    // two matched tracks, two prompts; the unmatched third never asks
    assert_eq!(frontend.confirm_add_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cancellation_mid_loop_propagates_without_materializing() {
    let catalog = matching_catalog();
    let frontend = ScriptedFrontend::new();
    frontend.script_confirm_add(Reply::Value(Decision::Add));
    frontend.script_confirm_add(Reply::Cancel);

    let result = orchestrator()
        .run(&catalog, &frontend, &three_tracks(), "Mix", ImportMode::Interactive)
        .await;

    assert!(matches!(result, Err(FerryError::Cancelled)));
    assert!(catalog.created_names().is_empty());
}

#[tokio::test]
async fn add_attempts_preserve_input_order() {
    let catalog = StubCatalog::new()
        .with_search("B Song Beta", vec![hit("t-b", "B Song", "Beta")])
        .with_search("A Song Alpha", vec![hit("t-a", "A Song", "Alpha")])
        .with_search("C Song Gamma", vec![hit("t-c", "C Song", "Gamma")]);
    let frontend = ScriptedFrontend::new();
    let tracks = vec![
        track("B Song", "Beta", None),
        track("A Song", "Alpha", None),
        track("C Song", "Gamma", None),
    ];

    orchestrator()
        .run(&catalog, &frontend, &tracks, "Ordered", ImportMode::Automatic)
        .await
        .unwrap();

    assert_eq!(
        catalog.added_ids(),
        vec!["t-b".to_string(), "t-a".to_string(), "t-c".to_string()]
    );
}

#[tokio::test]
async fn empty_track_list_still_materializes_an_empty_playlist() {
    let catalog = StubCatalog::new();
    let frontend = ScriptedFrontend::new();

    let (outcomes, playlist) = orchestrator()
        .run(&catalog, &frontend, &[], "Nothing", ImportMode::Automatic)
        .await
        .unwrap();

    assert!(outcomes.is_empty());
    assert_eq!(playlist.name, "Nothing");
    assert_eq!(catalog.created_names(), vec!["Nothing"]);
}
