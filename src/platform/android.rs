//! Android: intents dispatched through the activity manager.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use super::{FileOpener, SavedDocument, ShareSheet};
use crate::errors::{ClientError, Result};

const ACTIVITY_MANAGER: &str = "/system/bin/am";

/// `FLAG_GRANT_READ_URI_PERMISSION`
const GRANT_READ_URI_PERMISSION: &str = "1";

/// Build the content URI the file provider exposes for a saved document.
pub fn content_uri(authority: &str, document: &SavedDocument) -> String {
    format!("content://{}/documents/{}", authority, document.file_name)
}

async fn run_activity_manager(args: &[&str]) -> Result<()> {
    tracing::debug!("am {}", args.join(" "));
    let output = Command::new(ACTIVITY_MANAGER).args(args).output().await?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ClientError::Io(format!(
            "Activity manager exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }
}

/// Opens a file with an `ACTION_VIEW` intent on its content URI.
pub struct AndroidIntentOpener {
    authority: String,
}

impl AndroidIntentOpener {
    pub fn new(authority: &str) -> Self {
        Self {
            authority: authority.to_string(),
        }
    }
}

#[async_trait]
impl FileOpener for AndroidIntentOpener {
    fn name(&self) -> &'static str {
        "android-intent"
    }

    async fn open(&self, document: &SavedDocument, mime_type: &str) -> Result<()> {
        let uri = content_uri(&self.authority, document);
        run_activity_manager(&[
            "start",
            "-a",
            "android.intent.action.VIEW",
            "-d",
            &uri,
            "-t",
            mime_type,
            "-f",
            GRANT_READ_URI_PERMISSION,
        ])
        .await
    }
}

/// Shares a file with an `ACTION_SEND` chooser.
pub struct AndroidShareSheet {
    authority: String,
}

impl AndroidShareSheet {
    pub fn new(authority: &str) -> Self {
        Self {
            authority: authority.to_string(),
        }
    }
}

#[async_trait]
impl ShareSheet for AndroidShareSheet {
    fn name(&self) -> &'static str {
        "android-send"
    }

    async fn is_available(&self) -> bool {
        Path::new(ACTIVITY_MANAGER).exists()
    }

    async fn share(&self, document: &SavedDocument, mime_type: &str) -> Result<()> {
        let uri = content_uri(&self.authority, document);
        run_activity_manager(&[
            "start",
            "-a",
            "android.intent.action.SEND",
            "-t",
            mime_type,
            "--eu",
            "android.intent.extra.STREAM",
            &uri,
            "-f",
            GRANT_READ_URI_PERMISSION,
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_uri() {
        let doc = SavedDocument {
            file_name: "rekap.docx".into(),
            path: "/data/user/0/app/files/rekap.docx".into(),
            uri: "file:///data/user/0/app/files/rekap.docx".into(),
        };
        assert_eq!(
            content_uri("com.example.provider", &doc),
            "content://com.example.provider/documents/rekap.docx"
        );
    }
}
