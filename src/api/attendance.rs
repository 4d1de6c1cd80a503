//! Attendance endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::errors::Result;
use crate::models::{AttendanceRecord, DocumentEnvelope, ExportedDocument};

impl ApiClient {
    /// GET /attendance
    pub async fn list_attendance(&self, token: &str) -> Result<Vec<AttendanceRecord>> {
        self.request_as(Method::GET, "/attendance", None, Some(token))
            .await
    }

    /// GET /attendance/create-document
    pub async fn create_document(&self, token: &str) -> Result<ExportedDocument> {
        let envelope: DocumentEnvelope = self
            .request_as(Method::GET, "/attendance/create-document", None, Some(token))
            .await?;
        Ok(envelope.data)
    }
}
