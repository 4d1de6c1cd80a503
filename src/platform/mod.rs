//! OS capabilities the client depends on.
//!
//! Alerts, local notifications, file opening and the share sheet are traits;
//! the concrete variant is picked once from the configured platform.

mod android;
mod console;
mod ios;

pub use android::*;
pub use console::*;
pub use ios::*;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{Config, Platform};
use crate::errors::{ClientError, Result};

/// Choices offered once a document has been saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Open,
    Share,
    Cancel,
}

impl ExportAction {
    pub const ALL: [ExportAction; 3] = [ExportAction::Open, ExportAction::Share, ExportAction::Cancel];

    pub fn label(&self) -> &'static str {
        match self {
            ExportAction::Open => "Open",
            ExportAction::Share => "Share",
            ExportAction::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "o" | "1" => Ok(ExportAction::Open),
            "share" | "s" | "2" => Ok(ExportAction::Share),
            "cancel" | "c" | "3" | "" => Ok(ExportAction::Cancel),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// User-facing alerts and the post-download prompt.
pub trait Alerts: Send + Sync {
    fn alert(&self, title: &str, message: &str);

    /// Ask the user to pick one of `choices`. Dismissal counts as `Cancel`.
    fn prompt(&self, title: &str, message: &str, choices: &[ExportAction]) -> ExportAction;
}

/// A local notification with an immediate trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// File URI carried as payload metadata
    pub uri: String,
}

impl LocalNotification {
    pub fn download_complete(file_name: &str, uri: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "Download Complete".to_string(),
            body: format!("File {} has been downloaded successfully.", file_name),
            uri: uri.to_string(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn schedule(&self, notification: &LocalNotification) -> Result<()>;
}

/// A document saved to local storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
    pub path: std::path::PathBuf,
    /// `file://` URI of `path`
    pub uri: String,
}

/// Hands a saved file to the OS viewer.
#[async_trait]
pub trait FileOpener: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn open(&self, document: &SavedDocument, mime_type: &str) -> Result<()>;
}

/// The OS share sheet.
#[async_trait]
pub trait ShareSheet: Send + Sync {
    fn name(&self) -> &'static str;

    async fn is_available(&self) -> bool;
    async fn share(&self, document: &SavedDocument, mime_type: &str) -> Result<()>;
}

/// Opener for platforms without a file viewer integration.
pub struct UnsupportedOpener;

#[async_trait]
impl FileOpener for UnsupportedOpener {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    async fn open(&self, _document: &SavedDocument, _mime_type: &str) -> Result<()> {
        Err(ClientError::Unsupported("Unsupported platform".to_string()))
    }
}

/// Share sheet for platforms that have none.
///
/// iOS is wired to this too: its share sheet is a UIKit view controller,
/// which a headless binary has no way to present. Share therefore reports
/// "not available" there, while Open still goes through the URL opener.
pub struct NoShareSheet;

#[async_trait]
impl ShareSheet for NoShareSheet {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, _document: &SavedDocument, _mime_type: &str) -> Result<()> {
        Err(ClientError::Unsupported(
            "Sharing is not available on this device".to_string(),
        ))
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The capability set handed to controllers.
#[derive(Clone)]
pub struct Capabilities {
    pub alerts: Arc<dyn Alerts>,
    pub notifier: Arc<dyn Notifier>,
    pub opener: Arc<dyn FileOpener>,
    pub share: Arc<dyn ShareSheet>,
    pub clock: Arc<dyn Clock>,
}

impl Capabilities {
    /// Pick the opener and share sheet for the configured platform.
    ///
    /// Android gets intents for both. iOS opens through the URL opener and
    /// has no share sheet (see [`NoShareSheet`]). Anything else can do neither.
    pub fn for_platform(config: &Config, alerts: Arc<dyn Alerts>) -> Self {
        let (opener, share): (Arc<dyn FileOpener>, Arc<dyn ShareSheet>) = match config.platform {
            Platform::Android => (
                Arc::new(AndroidIntentOpener::new(&config.android_authority)),
                Arc::new(AndroidShareSheet::new(&config.android_authority)),
            ),
            Platform::Ios => (Arc::new(IosUrlOpener), Arc::new(NoShareSheet)),
            Platform::Other => (Arc::new(UnsupportedOpener), Arc::new(NoShareSheet)),
        };

        tracing::debug!(
            opener = opener.name(),
            share = share.name(),
            "Using {} platform capabilities",
            config.platform.as_str()
        );

        Self {
            alerts,
            notifier: Arc::new(ConsoleNotifier),
            opener,
            share,
            clock: Arc::new(SystemClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn config_for(platform: Platform) -> Config {
        Config {
            api_base_url: "http://127.0.0.1:1".to_string(),
            db_path: "/tmp/presensi-test.db".into(),
            document_dir: "/tmp".into(),
            platform,
            android_authority: "com.example.provider".to_string(),
            utc_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
            log_level: "debug".to_string(),
        }
    }

    fn capabilities_for(platform: Platform) -> Capabilities {
        Capabilities::for_platform(&config_for(platform), Arc::new(ConsoleAlerts::new(None)))
    }

    #[test]
    fn test_for_platform_picks_variants() {
        let android = capabilities_for(Platform::Android);
        assert_eq!(android.opener.name(), "android-intent");
        assert_eq!(android.share.name(), "android-send");

        let ios = capabilities_for(Platform::Ios);
        assert_eq!(ios.opener.name(), "ios-url");
        assert_eq!(ios.share.name(), "none");

        let other = capabilities_for(Platform::Other);
        assert_eq!(other.opener.name(), "unsupported");
        assert_eq!(other.share.name(), "none");
    }

    #[tokio::test]
    async fn test_ios_reports_sharing_unavailable() {
        let ios = capabilities_for(Platform::Ios);
        assert!(!ios.share.is_available().await);
    }

    #[test]
    fn test_export_action_parse() {
        assert_eq!("Open".parse::<ExportAction>(), Ok(ExportAction::Open));
        assert_eq!("2".parse::<ExportAction>(), Ok(ExportAction::Share));
        assert_eq!("".parse::<ExportAction>(), Ok(ExportAction::Cancel));
        assert!("print".parse::<ExportAction>().is_err());
    }

    #[test]
    fn test_download_notification_text() {
        let n = LocalNotification::download_complete("rekap.docx", "file:///tmp/rekap.docx");
        assert_eq!(n.title, "Download Complete");
        assert_eq!(n.body, "File rekap.docx has been downloaded successfully.");
        assert_eq!(n.uri, "file:///tmp/rekap.docx");
    }

    #[tokio::test]
    async fn test_unsupported_platform_fails_to_open() {
        let doc = SavedDocument {
            file_name: "a.docx".into(),
            path: "/tmp/a.docx".into(),
            uri: "file:///tmp/a.docx".into(),
        };
        let err = UnsupportedOpener.open(&doc, "x").await.unwrap_err();
        assert_eq!(err.message(), "Unsupported platform");
        assert!(!NoShareSheet.is_available().await);
    }
}
