//! Low-level HTTP plumbing for the clinic service.
//!
//! One request per call: no retries, no timeout, no backoff. Status
//! translation follows the service contract — 400 bodies are validation
//! messages, 204 means an intentionally empty result.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use crate::config;

/// HTTP client for the clinic service REST API.
///
/// Cheap to clone — the underlying `reqwest::Client` is a shared handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Client configured from the environment (`PRONTUA_API_BASE_URL`).
    pub fn from_env() -> Self {
        Self::new(&config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let req = self.client.get(self.url(endpoint)).query(query);
        self.execute(Method::GET, endpoint, req).await
    }

    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.client.post(self.url(endpoint)).json(body);
        self.execute(Method::POST, endpoint, req).await
    }

    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.client.put(self.url(endpoint)).json(body);
        self.execute(Method::PUT, endpoint, req).await
    }

    /// Bodyless PATCH — the deactivate sub-path answers 204.
    pub(crate) async fn patch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let req = self.client.patch(self.url(endpoint));
        self.execute(Method::PATCH, endpoint, req).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(%method, endpoint, "outgoing request");
        let response = req.header(CONTENT_TYPE, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::BAD_REQUEST {
                let text = response.text().await.unwrap_or_default();
                tracing::warn!(%method, endpoint, "validation rejected: {text}");
                return Err(ApiError::BadRequest(text));
            }
            tracing::warn!(%method, endpoint, status = status.as_u16(), "request failed");
            return Err(ApiError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let text = response.text().await?;
        if status == StatusCode::NO_CONTENT || text.is_empty() {
            // Empty success: deserialize `null` so `()` targets succeed.
            return serde_json::from_str("null").map_err(|e| ApiError::Decode(e.to_string()));
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_env()
    }
}
