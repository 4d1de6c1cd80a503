//! Authentication endpoints.

use reqwest::Method;
use serde_json::json;

use super::{to_body, ApiClient};
use crate::errors::Result;
use crate::models::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest};

impl ApiClient {
    /// POST /login
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.request_as(Method::POST, "/login", to_body(request)?, None)
            .await
    }

    /// POST /register
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.request_as(Method::POST, "/register", to_body(request)?, None)
            .await
    }

    /// POST /logout
    pub async fn logout(&self, token: &str) -> Result<LogoutResponse> {
        self.request_as(Method::POST, "/logout", Some(json!({})), Some(token))
            .await
    }
}
