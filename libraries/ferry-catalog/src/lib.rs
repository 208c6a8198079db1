//! Destination Catalog Client
//!
//! HTTP client library for the destination catalog's API.
//!
//! # Features
//!
//! - **Authentication**: device-code login, session persistence/restore
//! - **Track lookup**: exact recording-code (ISRC) lookup, free-text search
//! - **Playlists**: creation, batch and single track add
//!
//! # Example
//!
//! ```ignore
//! use ferry_catalog::{CatalogClient, CatalogConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("https://api.destination.example"))?;
//!
//!     if !client.restore_session(Path::new("session.json")).await {
//!         let auth = client.begin_device_login().await?;
//!         println!("Open {} and enter {}", auth.verification_url, auth.user_code);
//!         client.wait_for_device_login(&auth).await?;
//!         client.persist_session(Path::new("session.json")).await?;
//!     }
//!
//!     let hits = client.search_tracks("Karma Police Radiohead", 5).await?;
//!     println!("{} hits", hits.len());
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod session;
mod types;

// Re-export main types
pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use session::{load_session, save_session, StoredSession};
pub use types::{
    ArtistPayload, CatalogConfig, DeviceAuthorization, PlaylistPayload, TokenResponse,
    TrackPayload, UserInfo,
};
