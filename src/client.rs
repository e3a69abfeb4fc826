use anyhow::{Context, Result};
use reqwest::{Client, IntoUrl, Request, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{RequestSigner, TokenAuthenticator};
use crate::config::AuthConfig;
use crate::error::ClientError;

/// HTTP client that signs outgoing requests with the current access token
/// and transparently refreshes it on 401.
///
/// A 401 that survives the refresh/retry cycle is returned as an ordinary
/// response; callers see the original failure, never a refresh error.
pub struct AuthHttpClient {
    /// Shared HTTP client with connection pooling
    client: Client,

    signer: RequestSigner,

    authenticator: Arc<TokenAuthenticator>,
}

impl AuthHttpClient {
    pub fn new(
        client: Client,
        signer: RequestSigner,
        authenticator: Arc<TokenAuthenticator>,
    ) -> Self {
        Self {
            client,
            signer,
            authenticator,
        }
    }

    /// Build with a pooled HTTP client configured from `AuthConfig`
    pub fn from_config(
        config: &AuthConfig,
        signer: RequestSigner,
        authenticator: Arc<TokenAuthenticator>,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::new(client, signer, authenticator))
    }

    /// Start building a GET request against the wrapped client
    pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        self.client.get(url)
    }

    /// Start building a POST request against the wrapped client
    pub fn post(&self, url: impl IntoUrl) -> RequestBuilder {
        self.client.post(url)
    }

    /// Execute a request with bearer signing and at most one auth retry
    pub async fn execute(&self, mut request: Request) -> Result<Response, ClientError> {
        self.signer.sign(&mut request);

        // Streaming bodies cannot be cloned; those requests go out without
        // retry eligibility.
        let retry_copy = request.try_clone();

        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        let response = self.client.execute(request).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(original) = retry_copy else {
            tracing::warn!(url = %url, "401 on a non-cloneable request, surfacing it");
            return Ok(response);
        };

        tracing::warn!(url = %url, "Received 401, attempting token refresh");

        match self.authenticator.authenticate(&original, false).await {
            Some(retried) => {
                tracing::debug!(url = %url, "Resending request with refreshed token");
                // If this one comes back 401 too it is surfaced as-is: a
                // retried response is never re-authenticated.
                Ok(self.client.execute(retried).await?)
            }
            None => Ok(response),
        }
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
