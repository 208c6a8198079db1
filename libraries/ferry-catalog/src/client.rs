//! Main destination-catalog client.

use crate::auth::AuthClient;
use crate::error::{CatalogError, Result};
use crate::types::{
    AddTracksRequest, CatalogConfig, CreatePlaylistRequest, PlaylistPayload, TrackListResponse,
    UserInfo,
};
use async_trait::async_trait;
use ferry_core::{CatalogTrack, PlaylistHandle, TrackId};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// HTTP client for the destination catalog.
///
/// Handles authentication tokens and provides the track lookup, search and
/// playlist operations the import pipeline runs on. One instance is shared
/// (read-only after login) across the whole import run.
///
/// # Example
///
/// ```ignore
/// use ferry_catalog::{CatalogClient, CatalogConfig};
///
/// let config = CatalogConfig::new("https://api.destination.example");
/// let client = CatalogClient::new(config)?;
///
/// let auth = client.begin_device_login().await?;
/// println!("Open {} and enter code {}", auth.verification_url, auth.user_code);
/// client.wait_for_device_login(&auth).await?;
///
/// let user = client.current_user().await?;
/// println!("Logged in as {}", user.id);
/// ```
pub struct CatalogClient {
    http: Client,
    config: Arc<RwLock<CatalogConfig>>,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized_config = CatalogConfig {
            url,
            access_token: config.access_token,
            refresh_token: config.refresh_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("PlaylistFerry/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the catalog base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Replace the stored session tokens.
    pub async fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token);
        config.refresh_token = refresh_token;
    }

    /// Current session tokens, if any.
    pub async fn tokens(&self) -> (Option<String>, Option<String>) {
        let config = self.config.read().await;
        (config.access_token.clone(), config.refresh_token.clone())
    }

    /// Authentication operations (device-code login).
    pub(crate) fn auth<'a>(&'a self, base_url: &'a str) -> AuthClient<'a> {
        AuthClient::new(&self.http, base_url)
    }

    async fn bearer(&self) -> Result<String> {
        self.config
            .read()
            .await
            .access_token
            .clone()
            .ok_or(CatalogError::AuthRequired)
    }

    /// Fetch the authenticated user, verifying the session is still valid.
    pub async fn current_user(&self) -> Result<UserInfo> {
        let token = self.bearer().await?;
        let url = format!("{}/v1/me", self.url().await);
        debug!(url = %url, "Checking session validity");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CatalogError::Unreachable(e.to_string())
                } else {
                    CatalogError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let user: UserInfo = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse user info: {}", e))
            })?;
            debug!(user_id = %user.id, "Session is valid");
            Ok(user)
        } else if status.as_u16() == 401 {
            warn!("Session check failed: token expired or revoked");
            Err(CatalogError::AuthFailed("session expired".to_string()))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Exact track lookup by recording code (ISRC).
    ///
    /// Returns the first hit, or `None` when the catalog knows no recording
    /// under that code.
    pub async fn track_by_code(&self, code: &str) -> Result<Option<CatalogTrack>> {
        let token = self.bearer().await?;
        let base = self.url().await;
        let url = url::Url::parse_with_params(
            &format!("{}/v1/tracks", base),
            &[("recordingCode", code)],
        )
        .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        debug!(code = %code, "Looking up track by recording code");

        let response = self.http.get(url).bearer_auth(&token).send().await?;
        let status = response.status();

        if status.is_success() {
            let list: TrackListResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse track list: {}", e))
            })?;
            let hit = list.items.into_iter().next().map(CatalogTrack::from);
            debug!(code = %code, found = hit.is_some(), "Recording code lookup finished");
            Ok(hit)
        } else if status.as_u16() == 404 {
            Ok(None)
        } else if status.as_u16() == 401 {
            Err(CatalogError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Free-text track search, capped at `limit` results.
    pub async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<CatalogTrack>> {
        let token = self.bearer().await?;
        let base = self.url().await;
        let limit_param = limit.to_string();
        let url = url::Url::parse_with_params(
            &format!("{}/v1/search/tracks", base),
            &[("query", query), ("limit", limit_param.as_str())],
        )
        .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        debug!(query = %query, limit, "Searching tracks");

        let response = self.http.get(url).bearer_auth(&token).send().await?;
        let status = response.status();

        if status.is_success() {
            let list: TrackListResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse search results: {}", e))
            })?;
            debug!(query = %query, hits = list.items.len(), "Search finished");
            Ok(list.items.into_iter().map(CatalogTrack::from).collect())
        } else if status.as_u16() == 401 {
            Err(CatalogError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Create a new playlist owned by the authenticated user.
    pub async fn create_playlist(&self, name: &str, description: &str) -> Result<PlaylistHandle> {
        let token = self.bearer().await?;
        let url = format!("{}/v1/me/playlists", self.url().await);
        debug!(name = %name, "Creating playlist");

        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            let playlist: PlaylistPayload = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse playlist: {}", e))
            })?;
            info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
            Ok(playlist.into())
        } else if status.as_u16() == 401 {
            Err(CatalogError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Add `track_ids` to a playlist in one call, preserving order.
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[TrackId]) -> Result<()> {
        let token = self.bearer().await?;
        let url = format!("{}/v1/playlists/{}/items", self.url().await, playlist_id);
        debug!(playlist_id = %playlist_id, count = track_ids.len(), "Adding tracks (batch)");

        let request = AddTracksRequest {
            track_ids: track_ids.to_vec(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 {
            Err(CatalogError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Add a single track to a playlist.
    pub async fn add_track(&self, playlist_id: &str, track_id: &TrackId) -> Result<()> {
        self.add_tracks(playlist_id, std::slice::from_ref(track_id))
            .await
    }
}

#[async_trait]
impl ferry_core::Catalog for CatalogClient {
    async fn track_by_code(&self, code: &str) -> ferry_core::Result<Option<CatalogTrack>> {
        CatalogClient::track_by_code(self, code)
            .await
            .map_err(Into::into)
    }

    async fn search_tracks(
        &self,
        query: &str,
        limit: usize,
    ) -> ferry_core::Result<Vec<CatalogTrack>> {
        CatalogClient::search_tracks(self, query, limit)
            .await
            .map_err(Into::into)
    }

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> ferry_core::Result<PlaylistHandle> {
        CatalogClient::create_playlist(self, name, description)
            .await
            .map_err(Into::into)
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[TrackId]) -> ferry_core::Result<()> {
        CatalogClient::add_tracks(self, playlist_id, track_ids)
            .await
            .map_err(Into::into)
    }

    async fn add_track(&self, playlist_id: &str, track_id: &TrackId) -> ferry_core::Result<()> {
        CatalogClient::add_track(self, playlist_id, track_id)
            .await
            .map_err(Into::into)
    }
}
