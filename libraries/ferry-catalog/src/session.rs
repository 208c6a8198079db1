//! Session persistence for the destination catalog.
//!
//! Tokens are stored as a small JSON file keyed by a caller-supplied path,
//! so a later run can skip the device-code login while the session is
//! still valid.

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// On-disk session format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Read a stored session from `path`.
pub fn load_session(path: &Path) -> Result<StoredSession> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| CatalogError::Session(format!("invalid session file: {}", e)))
}

/// Write a session to `path`, overwriting any previous one.
pub fn save_session(path: &Path, session: &StoredSession) -> Result<()> {
    let data = serde_json::to_string_pretty(session)
        .map_err(|e| CatalogError::Session(format!("could not encode session: {}", e)))?;
    std::fs::write(path, data)?;
    debug!(path = %path.display(), "Session saved");
    Ok(())
}

impl CatalogClient {
    /// Try to restore a saved session from `path`.
    ///
    /// Returns `true` when the file existed and the restored session passed
    /// the catalog's validity check; `false` when there is nothing usable
    /// at `path` (missing, unreadable, or expired) and a fresh login is
    /// needed. Never fails on a bad file: the caller falls back to login.
    pub async fn restore_session(&self, path: &Path) -> bool {
        if !path.exists() {
            return false;
        }

        let session = match load_session(path) {
            Ok(session) => session,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load session file");
                return false;
            }
        };

        self.set_tokens(session.access_token, session.refresh_token)
            .await;

        match self.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                true
            }
            Err(e) => {
                warn!(error = %e, "Saved session is no longer valid");
                false
            }
        }
    }

    /// Persist the current session tokens to `path`.
    ///
    /// No-op when the client holds no tokens.
    pub async fn persist_session(&self, path: &Path) -> Result<()> {
        let (access_token, refresh_token) = self.tokens().await;
        let Some(access_token) = access_token else {
            return Ok(());
        };
        save_session(
            path,
            &StoredSession {
                access_token,
                refresh_token,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = StoredSession {
            access_token: "token-abc".to_string(),
            refresh_token: Some("refresh-xyz".to_string()),
        };
        save_session(&path, &session).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.access_token, "token-abc");
        assert_eq!(loaded.refresh_token.as_deref(), Some("refresh-xyz"));
    }

    #[test]
    fn refresh_token_is_optional_in_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"access_token":"only-access"}"#).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.access_token, "only-access");
        assert!(loaded.refresh_token.is_none());
    }

    #[test]
    fn malformed_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_session(&path),
            Err(CatalogError::Session(_))
        ));
    }
}
