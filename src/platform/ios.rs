//! iOS: hand the raw file URI to the system URL opener.

use async_trait::async_trait;

use super::{FileOpener, SavedDocument};
use crate::errors::{ClientError, Result};

pub struct IosUrlOpener;

#[async_trait]
impl FileOpener for IosUrlOpener {
    fn name(&self) -> &'static str {
        "ios-url"
    }

    async fn open(&self, document: &SavedDocument, _mime_type: &str) -> Result<()> {
        let uri = document.uri.clone();
        tokio::task::spawn_blocking(move || webbrowser::open(&uri))
            .await
            .map_err(|e| ClientError::Io(format!("URL opener task failed: {}", e)))??;
        Ok(())
    }
}
