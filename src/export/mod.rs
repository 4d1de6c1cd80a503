//! Document export pipeline.
//!
//! Request the generated document, write it to the document directory, post
//! a notification, then offer Open / Share / Cancel. Each stage reports its
//! own failure as an alert and stops; nothing is retried.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::{ClientError, Result};
use crate::models::{ExportedDocument, DOCUMENT_MIME_TYPE};
use crate::platform::{ExportAction, LocalNotification, SavedDocument};
use crate::AppState;

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The backend call failed; nothing was written.
    NoFileData,
    /// Decoding, writing or notifying failed.
    DownloadFailed,
    /// The file was saved and the user picked an action.
    Downloaded {
        document: SavedDocument,
        action: ExportAction,
        /// Message of the alert shown if the action failed
        action_error: Option<String>,
    },
}

pub struct ExportPipeline<'a> {
    app: &'a AppState,
}

impl<'a> ExportPipeline<'a> {
    pub fn new(app: &'a AppState) -> Self {
        Self { app }
    }

    /// Run the whole pipeline once.
    pub async fn run(&self) -> ExportOutcome {
        let alerts = &self.app.caps.alerts;

        let Some(exported) = self.fetch_document().await else {
            tracing::warn!("No file data received");
            alerts.alert("Error", "No file data received");
            return ExportOutcome::NoFileData;
        };

        let document = match self.save(&exported).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Error writing file: {}", e);
                alerts.alert("Error", "Failed to download file");
                return ExportOutcome::DownloadFailed;
            }
        };

        let action = alerts.prompt(
            "Success",
            "File downloaded successfully. What would you like to do?",
            &ExportAction::ALL,
        );

        let action_error = match action {
            ExportAction::Open => self.open_file(&document).await,
            ExportAction::Share => self.share_file(&document).await,
            ExportAction::Cancel => None,
        };

        ExportOutcome::Downloaded {
            document,
            action,
            action_error,
        }
    }

    async fn fetch_document(&self) -> Option<ExportedDocument> {
        match self.request_document().await {
            Ok(document) => {
                tracing::info!("Document fetched successfully: {}", document.file_name);
                Some(document)
            }
            Err(e) => {
                tracing::error!("Error fetching document: {}", e);
                None
            }
        }
    }

    async fn request_document(&self) -> Result<ExportedDocument> {
        let token = self.app.session.require().await?;
        self.app.api.create_document(&token).await
    }

    /// Decode, write and announce the document.
    async fn save(&self, exported: &ExportedDocument) -> Result<SavedDocument> {
        let file_name = safe_file_name(&exported.file_name)?;
        let bytes = STANDARD.decode(exported.file_content.trim())?;

        let dir = &self.app.config.document_dir;
        tokio::fs::create_dir_all(dir).await?;
        let path = tokio::fs::canonicalize(dir).await?.join(&file_name);
        tracing::info!("Saving file to: {}", path.display());

        tokio::fs::write(&path, &bytes).await?;

        let document = SavedDocument {
            uri: file_uri(&path),
            file_name,
            path,
        };

        self.app
            .caps
            .notifier
            .schedule(&LocalNotification::download_complete(
                &document.file_name,
                &document.uri,
            ))?;

        Ok(document)
    }

    /// Open the document; returns the alert message on failure.
    pub async fn open_file(&self, document: &SavedDocument) -> Option<String> {
        let result = if document.uri.is_empty() {
            Err(ClientError::Io("File URI is invalid".to_string()))
        } else {
            self.app.caps.opener.open(document, DOCUMENT_MIME_TYPE).await
        };

        result.err().map(|e| {
            tracing::error!("Error opening file: {}", e);
            let message = format!("Error opening file: {}", e.message());
            self.app.caps.alerts.alert("Error", &message);
            message
        })
    }

    /// Share the document; returns the alert message on failure.
    pub async fn share_file(&self, document: &SavedDocument) -> Option<String> {
        let alerts = &self.app.caps.alerts;

        if document.uri.is_empty() {
            let message = "Error sharing file: File URI is invalid".to_string();
            tracing::error!("{}", message);
            alerts.alert("Error", &message);
            return Some(message);
        }

        if !self.app.caps.share.is_available().await {
            let message = "Sharing is not available on this device".to_string();
            alerts.alert("Error", &message);
            return Some(message);
        }

        match self.app.caps.share.share(document, DOCUMENT_MIME_TYPE).await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("Error sharing file: {}", e);
                let message = format!("Error sharing file: {}", e.message());
                alerts.alert("Error", &message);
                Some(message)
            }
        }
    }
}

/// Keep only the final path component of a server-supplied name.
fn safe_file_name(raw: &str) -> Result<String> {
    Path::new(raw.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClientError::Decode(format!("Invalid file name '{}'", raw)))
}

fn file_uri(path: &Path) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        format!("file://{}", display)
    } else {
        format!("file:///{}", display)
    }
}
