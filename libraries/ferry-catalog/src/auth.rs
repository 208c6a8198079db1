//! Device-code authentication for the destination catalog.
//!
//! The catalog uses an OAuth-style device flow: the client requests a
//! device authorization, the user opens the verification URL in a browser
//! and approves, and the client polls the token endpoint until tokens are
//! issued or the device code expires.

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use crate::types::{DeviceAuthorization, DeviceTokenRequest, OauthErrorResponse, TokenResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one poll of the token endpoint
enum Poll {
    Issued(TokenResponse),
    Pending,
}

/// Authentication sub-client, borrowed from [`CatalogClient`].
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Request a device authorization to show to the user.
    pub async fn begin_device_login(&self) -> Result<DeviceAuthorization> {
        let url = format!("{}/v1/oauth/device", self.base_url);
        debug!(url = %url, "Requesting device authorization");

        let response = self.http.post(&url).send().await.map_err(|e| {
            if e.is_connect() {
                CatalogError::Unreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            let auth: DeviceAuthorization = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse device authorization: {}", e))
            })?;
            info!(user_code = %auth.user_code, "Device authorization issued");
            Ok(auth)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    async fn poll_token(&self, device_code: &str) -> Result<Poll> {
        let url = format!("{}/v1/oauth/token", self.base_url);
        let request = DeviceTokenRequest {
            device_code: device_code.to_string(),
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if status.is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse token response: {}", e))
            })?;
            Ok(Poll::Issued(tokens))
        } else if status.as_u16() == 400 {
            let body: OauthErrorResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse oauth error: {}", e))
            })?;
            match body.error.as_str() {
                "authorization_pending" | "slow_down" => Ok(Poll::Pending),
                "expired_token" => Err(CatalogError::LoginExpired(
                    "device code expired before approval".to_string(),
                )),
                other => Err(CatalogError::AuthFailed(other.to_string())),
            }
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

impl CatalogClient {
    /// Start a device-code login, returning the verification details to
    /// show to the user.
    pub async fn begin_device_login(&self) -> Result<DeviceAuthorization> {
        let base = self.url().await;
        self.auth(&base).begin_device_login().await
    }

    /// Poll the token endpoint until the user approves the device, then
    /// store the issued tokens on this client.
    ///
    /// Fails with [`CatalogError::LoginExpired`] if the device code's
    /// lifetime runs out before approval.
    pub async fn wait_for_device_login(&self, auth: &DeviceAuthorization) -> Result<()> {
        let base = self.url().await;
        let interval = Duration::from_secs(auth.interval.max(1));
        let deadline = tokio::time::Instant::now() + Duration::from_secs(auth.expires_in);

        loop {
            tokio::time::sleep(interval).await;
            if tokio::time::Instant::now() >= deadline {
                warn!("Device code expired before the user approved the login");
                return Err(CatalogError::LoginExpired(
                    "device code expired before approval".to_string(),
                ));
            }

            match self.auth(&base).poll_token(&auth.device_code).await? {
                Poll::Issued(tokens) => {
                    info!("Device login approved, tokens issued");
                    self.set_tokens(tokens.access_token, tokens.refresh_token)
                        .await;
                    return Ok(());
                }
                Poll::Pending => {
                    debug!("Device login still pending");
                }
            }
        }
    }
}
