//! HTTP adapter for the session server (reqwest)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use talekeeper_shared::ErrorResponse;
use url::Url;

use crate::config::PlayerConfig;
use crate::ports::outbound::{ApiError, RawApiPort};

/// `RawApiPort` over a shared reqwest client.
///
/// Request paths are resolved against `base_url`, so a base of
/// `http://host/api` sends `/sessions/1` to `http://host/api/sessions/1`.
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: Url,
}

impl ApiAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| ApiError::RequestFailed(format!("invalid API URL {}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &PlayerConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::RequestFailed(format!("invalid path {}: {}", path, e)))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ApiError::http(status.as_u16(), error_detail(&body)));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::RequestFailed(e.to_string())
    }
}

/// The server reports failures as `{"detail": "..."}`; fall back to the raw
/// body for anything else (proxies, HTML error pages).
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        self.execute(self.client.get(url)).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(url).json(body)).await
    }

    async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(url)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "DELETE");
        self.execute(self.client.delete(url)).await
    }
}
