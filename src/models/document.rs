//! Generated attendance document.

use serde::{Deserialize, Serialize};

/// Fixed MIME type of exported documents (Word).
pub const DOCUMENT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A generated document: server-chosen file name plus base64 content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    pub file_name: String,
    pub file_content: String,
}

/// Response body of `GET /attendance/create-document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    pub data: ExportedDocument,
}
