//! Wire types for the destination-catalog API.

use ferry_core::{CatalogTrack, PlaylistHandle};
use serde::{Deserialize, Serialize};

/// Client configuration for one destination catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g. `https://api.destination.example`)
    pub url: String,

    /// Bearer access token, when a session already exists
    pub access_token: Option<String>,

    /// Refresh token, when the catalog issued one
    pub refresh_token: Option<String>,
}

impl CatalogConfig {
    /// Config with no session yet
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            refresh_token: None,
        }
    }

    /// Config with an existing session's tokens
    pub fn with_tokens(
        url: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }
}

/// One track as returned by lookup and search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPayload {
    pub id: String,
    pub title: String,
    pub artist: ArtistPayload,
}

/// Artist object embedded in track payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistPayload {
    pub name: String,
}

impl From<TrackPayload> for CatalogTrack {
    fn from(payload: TrackPayload) -> Self {
        CatalogTrack {
            id: payload.id,
            title: payload.title,
            artist: payload.artist.name,
        }
    }
}

/// Paged list wrapper used by track endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TrackListResponse {
    pub items: Vec<TrackPayload>,
}

/// Body for playlist creation
#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
}

/// Playlist object returned on creation
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub listen_url: Option<String>,
    #[serde(default)]
    pub share_url: Option<String>,
}

impl From<PlaylistPayload> for PlaylistHandle {
    fn from(payload: PlaylistPayload) -> Self {
        PlaylistHandle {
            id: payload.id,
            name: payload.name,
            listen_url: payload.listen_url,
            share_url: payload.share_url,
        }
    }
}

/// Body for adding tracks to a playlist
#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub track_ids: Vec<String>,
}

/// Response from starting a device-code login
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_url: String,
    /// Polling interval in seconds
    pub interval: u64,
    /// Lifetime of the device code in seconds
    pub expires_in: u64,
}

/// Body for polling the token endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DeviceTokenRequest {
    pub device_code: String,
}

/// Tokens issued once the user approves the device
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body returned while a device-code login is still pending
#[derive(Debug, Clone, Deserialize)]
pub struct OauthErrorResponse {
    pub error: String,
}

/// The authenticated user, from the session validity check
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
