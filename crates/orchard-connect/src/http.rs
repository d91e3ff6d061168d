//! Authenticated HTTP plumbing for the App Store Connect API

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::TokenSource;
use crate::error::{ConnectError, Result};
use crate::resources::UploadOperation;

/// Base URL for the App Store Connect API
const API_BASE_URL: &str = "https://api.appstoreconnect.apple.com/v1";

/// Authenticated API transport.
///
/// Cheap to clone; clones share the HTTP connection pool and the token
/// cache. Every call surfaces its failure immediately — retry policy, if
/// any, belongs to the caller.
#[derive(Clone)]
pub struct Api {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenSource>,
}

impl Api {
    /// Create a transport using the given token source
    pub fn new(tokens: TokenSource) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: API_BASE_URL.to_string(),
            tokens: Arc::new(tokens),
        }
    }

    /// Override the API base URL, mainly for tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// GET a resource or collection
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, None).await
    }

    /// POST a new resource, returning its representation
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    /// POST to a linkage endpoint that returns no content
    pub async fn post_no_content(&self, endpoint: &str, body: serde_json::Value) -> Result<()> {
        let token = self.tokens.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "API POST request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// PATCH an existing resource, discarding the response body
    pub async fn patch(&self, endpoint: &str, body: serde_json::Value) -> Result<()> {
        let token = self.tokens.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "API PATCH request");

        let response = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// DELETE a resource
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let token = self.tokens.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "API DELETE request");

        let response = self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// Execute one byte-range transfer operation.
    ///
    /// Transfer destinations are pre-signed by the catalog service; the
    /// request carries only the headers the operation names.
    pub async fn transfer(&self, operation: &UploadOperation, chunk: Vec<u8>) -> Result<()> {
        let method = operation
            .method
            .as_deref()
            .and_then(|m| Method::from_bytes(m.as_bytes()).ok())
            .unwrap_or(Method::PUT);
        debug!(url = %operation.url, length = chunk.len(), "transferring chunk");

        let mut request = self.client.request(method, &operation.url);
        for header in &operation.request_headers {
            request = request.header(header.name.as_str(), header.value.as_str());
        }

        let response = request.body(chunk).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let token = self.tokens.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, %url, "API request");

        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = Self::check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConnectError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}
