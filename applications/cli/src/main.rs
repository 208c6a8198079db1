//! `ferry` — import a playlist export into the destination catalog.
//!
//! Takes one export CSV file or a folder of them, resolves every track
//! against the destination catalog, and creates the playlist(s) there.

mod discover;
mod export;
mod frontend;

use anyhow::{bail, Context};
use clap::Parser;
use ferry_catalog::{CatalogClient, CatalogConfig};
use ferry_core::Frontend;
use ferry_import::{default_playlist_name, FolderBatchController, ImportOrchestrator};
use frontend::TerminalFrontend;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ferry")]
#[command(about = "Import playlist exports into the destination catalog", long_about = None)]
struct Cli {
    /// Export CSV file, or a folder of export files
    path: PathBuf,

    /// Name for the new playlist (single-file mode only)
    #[arg(short, long)]
    name: Option<String>,

    /// JSON file to persist and restore the catalog session
    #[arg(short, long, default_value = "catalog_session.json")]
    session: PathBuf,

    /// Destination catalog API base URL
    #[arg(
        long,
        env = "FERRY_CATALOG_URL",
        default_value = "https://api.destination.example"
    )]
    catalog_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferry=warn,ferry_import=warn,ferry_catalog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    println!("=== Playlist Ferry ===");

    if !cli.path.exists() {
        bail!("File or folder not found: {}", cli.path.display());
    }
    if cli.path.is_dir() && cli.name.is_some() {
        bail!("--name applies to a single export file, not a folder");
    }

    let client = login(&cli).await?;
    let frontend = TerminalFrontend::new();

    if cli.path.is_dir() {
        run_folder(&cli, &client, &frontend).await
    } else {
        run_single(&cli, &client, &frontend).await
    }
}

/// Restore a saved session or walk the user through a device login.
async fn login(cli: &Cli) -> anyhow::Result<CatalogClient> {
    let client = CatalogClient::new(CatalogConfig::new(cli.catalog_url.clone()))
        .context("invalid catalog URL")?;

    if client.restore_session(&cli.session).await {
        println!("Session restored from {}", cli.session.display());
        return Ok(client);
    }

    println!("\nDestination catalog login");
    let auth = client
        .begin_device_login()
        .await
        .context("could not start the login flow")?;
    println!(
        "Open {} and enter the code {}",
        auth.verification_url, auth.user_code
    );

    client
        .wait_for_device_login(&auth)
        .await
        .context("login failed")?;

    match client.persist_session(&cli.session).await {
        Ok(()) => println!("Session saved to {}", cli.session.display()),
        // a failed save costs a re-login next run, nothing more
        Err(e) => tracing::warn!(error = %e, "Could not save the session file"),
    }

    Ok(client)
}

/// Import one export file as one playlist.
async fn run_single(
    cli: &Cli,
    client: &CatalogClient,
    frontend: &TerminalFrontend,
) -> anyhow::Result<()> {
    let tracks = export::load_export(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    if tracks.is_empty() {
        bail!("No tracks found in {}", cli.path.display());
    }
    println!("Loaded {} track(s).", tracks.len());

    let file_id = cli
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    frontend.show_overview(&file_id, &tracks);

    let name = match &cli.name {
        Some(name) => name.clone(),
        None => or_cancel(frontend.ask_playlist_name(&default_playlist_name(&file_id)))?,
    };
    let mode = or_cancel(frontend.ask_mode())?;

    let orchestrator = ImportOrchestrator::new();
    let (outcomes, playlist) =
        or_cancel(orchestrator.run(client, frontend, &tracks, &name, mode).await)?;

    frontend.show_summary(&outcomes, &playlist);
    // the playlist already exists; backing out of the last prompt is fine
    if let Err(e) = frontend.offer_open_in_browser(&playlist) {
        if !e.is_cancelled() {
            return Err(e.into());
        }
    }

    println!("\nDone!");
    Ok(())
}

/// Import every export file discovered in a folder.
async fn run_folder(
    cli: &Cli,
    client: &CatalogClient,
    frontend: &TerminalFrontend,
) -> anyhow::Result<()> {
    let entries = discover::discover_entries(&cli.path)
        .with_context(|| format!("could not read folder {}", cli.path.display()))?;
    if entries.is_empty() {
        bail!("No export files found in {}", cli.path.display());
    }
    println!("Found {} export file(s).", entries.len());

    let controller = FolderBatchController::new();
    let run = controller.process(client, frontend, entries).await;

    // the report covers everything processed, even after an abort
    frontend.render_report(&run.report);

    if run.cancelled {
        bail!("Batch cancelled.");
    }
    println!("\nDone!");
    Ok(())
}

fn or_cancel<T>(result: ferry_core::Result<T>) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_cancelled() => bail!("Import cancelled."),
        Err(e) => Err(e.into()),
    }
}
