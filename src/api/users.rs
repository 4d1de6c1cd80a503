//! User profile endpoints.

use reqwest::Method;
use serde_json::{Map, Value};

use super::{to_body, ApiClient};
use crate::errors::Result;
use crate::models::{ProfileField, ProfileImageUpload, UserProfile};

impl ApiClient {
    /// GET /users/profile
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
        self.request_as(Method::GET, "/users/profile", None, Some(token))
            .await
    }

    /// PUT /users/update with a single-field body.
    pub async fn update_profile_field(
        &self,
        token: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<Value> {
        let mut body = Map::new();
        body.insert(field.key().to_string(), Value::String(value.to_string()));
        self.request(Method::PUT, "/users/update", Some(Value::Object(body)), Some(token))
            .await
    }

    /// POST /users/profile-image
    pub async fn upload_profile_image(
        &self,
        token: &str,
        upload: &ProfileImageUpload,
    ) -> Result<Value> {
        self.request(
            Method::POST,
            "/users/profile-image",
            to_body(upload)?,
            Some(token),
        )
        .await
    }
}
