//! HTTP client for the hotel listing API.
//!
//! Provides a minimal client with bearer auth, generic verb helpers that
//! normalize transport and application-level failures into `AppError`, and
//! domain methods (hotel CRUD, review transitions, image upload). The
//! services and CLI crates use this client directly.

pub mod envelope;
pub mod hotels;
pub mod upload;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value as JsonValue;
use stayport_core::{AppError, ClientConfig};

/// HTTP client for the hotel API with bearer-token auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    upload_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let token = config
            .api_token
            .clone()
            .context("Missing API token. Set STAYPORT_API_TOKEN")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
        })
    }

    /// Create client from environment: STAYPORT_API_URL, STAYPORT_API_TOKEN.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.token))
    }

    /// GET with optional query parameters.
    pub async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<JsonValue, AppError> {
        let mut request = self.apply_auth(self.client.get(self.build_url(path)));
        if !query.is_empty() {
            request = request.query(query);
        }
        Self::dispatch(request).await
    }

    /// POST a JSON body.
    pub async fn post_value<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<JsonValue, AppError> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        Self::dispatch(request).await
    }

    /// PUT a JSON body.
    pub async fn put_value<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<JsonValue, AppError> {
        let request = self.apply_auth(self.client.put(self.build_url(path)).json(body));
        Self::dispatch(request).await
    }

    /// PATCH a JSON body.
    pub async fn patch_value<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<JsonValue, AppError> {
        let request = self.apply_auth(self.client.patch(self.build_url(path)).json(body));
        Self::dispatch(request).await
    }

    /// POST a multipart form; uploads get their own (longer) timeout.
    pub async fn post_multipart_value(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<JsonValue, AppError> {
        let request = self
            .apply_auth(self.client.post(self.build_url(path)))
            .timeout(self.upload_timeout)
            .multipart(form);
        Self::dispatch(request).await
    }

    async fn dispatch(request: reqwest::RequestBuilder) -> Result<JsonValue, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        let parsed: Option<JsonValue> = if text.trim().is_empty() {
            Some(JsonValue::Null)
        } else {
            serde_json::from_str(&text).ok()
        };

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(envelope::error_message)
                .unwrap_or_else(|| truncate_body(&text).to_string());
            tracing::debug!(status = status.as_u16(), %message, "request rejected");
            return Err(AppError::Server {
                code: i64::from(status.as_u16()),
                message,
            });
        }

        let value = parsed.ok_or_else(|| {
            AppError::Internal("Failed to parse response as JSON".to_string())
        })?;

        // success HTTP status can still carry an application-level failure
        envelope::check_app_code(&value)?;
        Ok(value)
    }
}

fn truncate_body(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].trim()
}
