//! To-do endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::errors::Result;
use crate::models::TodoListResponse;

impl ApiClient {
    /// GET /todolist
    pub async fn list_todos(&self, token: &str) -> Result<TodoListResponse> {
        self.request_as(Method::GET, "/todolist", None, Some(token))
            .await
    }
}
