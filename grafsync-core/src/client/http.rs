//! `reqwest` implementation of [`GrafanaApi`].

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::{ApiResponse, GrafanaApi};
use crate::config::TargetConfig;
use crate::error::{ApiError, ApiResult};

/// User agent sent with every request
const USER_AGENT: &str = concat!("grafsync/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP client for one Grafana instance.
///
/// No request timeout is configured beyond the transport defaults, and
/// requests are never retried.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl HttpClient {
    /// Creates a client for the given target.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientBuild` if the TLS backend cannot be
    /// initialized.
    pub fn new(target: &TargetConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: target.url().to_string(),
            token: SecretString::from(target.token().expose_secret()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<ApiResponse> {
        let response = request
            .bearer_auth(self.token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl GrafanaApi for HttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        let url = self.endpoint(path);
        tracing::debug!(method = "GET", url = %url, "Sending request");

        let response = self.send(self.client.get(&url)).await?;
        tracing::debug!(status = response.status, url = %url, "Received response");
        Ok(response)
    }

    async fn post_json(&self, path: &str, body: &Value) -> ApiResult<ApiResponse> {
        let url = self.endpoint(path);
        tracing::debug!(method = "POST", url = %url, "Sending request");

        let response = self.send(self.client.post(&url).json(body)).await?;
        tracing::debug!(status = response.status, url = %url, "Received response");
        Ok(response)
    }
}
