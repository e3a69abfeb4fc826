// Refresh-token exchange client

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{RefreshRequest, TokenPair};
use crate::config::AuthConfig;
use crate::error::RefreshError;

/// Performs the network exchange of a refresh token for a new token pair
#[async_trait]
pub trait RefreshClient: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> std::result::Result<TokenPair, RefreshError>;
}

/// Refresh client speaking the JSON exchange endpoint:
/// POST {base_url}{refresh_path} with `{"refreshToken": "..."}`
pub struct HttpRefreshClient {
    client: Client,
    refresh_url: String,
}

impl HttpRefreshClient {
    pub fn new(client: Client, base_url: &str, refresh_path: &str) -> Self {
        Self {
            client,
            refresh_url: format!("{}{}", base_url.trim_end_matches('/'), refresh_path),
        }
    }

    /// Build with a dedicated HTTP client configured from `AuthConfig`
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::new(client, &config.base_url, &config.refresh_path))
    }
}

#[async_trait]
impl RefreshClient for HttpRefreshClient {
    async fn refresh(&self, refresh_token: &str) -> std::result::Result<TokenPair, RefreshError> {
        tracing::debug!("Exchanging refresh token for a new pair...");

        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .client
            .post(&self.refresh_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Refresh exchange rejected");
            return Err(RefreshError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let pair: TokenPair = response
            .json()
            .await
            .map_err(|e| RefreshError::Malformed(e.to_string()))?;

        if pair.access_token.value.is_empty() || pair.refresh_token.value.is_empty() {
            return Err(RefreshError::Malformed(
                "response contains an empty token".to_string(),
            ));
        }

        tracing::info!(
            expires = %pair.access_token.expires_at.to_rfc3339(),
            "Token pair refreshed"
        );

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_url_joins_base_and_path() {
        let client = HttpRefreshClient::new(Client::new(), "https://api.example.com", "/auth/refresh");
        assert_eq!(client.refresh_url, "https://api.example.com/auth/refresh");

        // Trailing slash on the base does not double up
        let client =
            HttpRefreshClient::new(Client::new(), "https://api.example.com/", "/auth/refresh");
        assert_eq!(client.refresh_url, "https://api.example.com/auth/refresh");
    }
}
