//! REST API client module.
//!
//! One `ApiClient` talks to the attendance backend; each resource lives in its own file.

mod attendance;
mod auth;
mod todos;
mod users;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{ClientError, Result};

/// Authenticated HTTP access to the attendance backend.
///
/// No retries, no backoff; timeouts are the HTTP client's defaults.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a request and return the parsed JSON body.
    ///
    /// Attaches `Authorization: Bearer <token>` when a token is given. Any
    /// non-2xx status or transport failure becomes an error; an empty 2xx
    /// body is returned as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("{} {} failed with {}: {}", method, url, status, text);
            return Err(ClientError::from_response(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value = serde_json::from_str(&text)?;
        tracing::debug!("{} {} -> {}", method, url, status);
        Ok(value)
    }

    /// `request` followed by deserialization into `T`.
    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<T> {
        let value = self.request(method, path, body, token).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Serialize a request body.
fn to_body<B: Serialize>(body: &B) -> Result<Option<Value>> {
    Ok(Some(serde_json::to_value(body)?))
}
