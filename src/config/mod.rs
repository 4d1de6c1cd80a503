//! Configuration module for the presensi client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://attendance-pkl.aviraster.com/api";

/// Default authority used when building Android content URIs.
pub const DEFAULT_ANDROID_AUTHORITY: &str = "com.aviraster.presensi.fileprovider";

/// Asia/Jakarta has no DST, so a fixed offset is enough.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Target platform the export pipeline dispatches open/share actions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl Platform {
    /// Platform of the running binary.
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Other => "other",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "other" | "desktop" => Ok(Platform::Other),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the attendance backend, without trailing slash
    pub api_base_url: String,
    /// Path to the SQLite file holding the session token
    pub db_path: PathBuf,
    /// Directory exported documents are written to
    pub document_dir: PathBuf,
    /// Platform used to pick the file opener and share sheet
    pub platform: Platform,
    /// Authority for Android content URIs
    pub android_authority: String,
    /// Offset used for "today" and the home clock
    pub utc_offset: FixedOffset,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("PRESENSI_API_BASE_URL")
            .ok()
            .and_then(|raw| normalize_base_url(&raw))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let db_path = env::var("PRESENSI_DB_PATH")
            .unwrap_or_else(|_| "./data/presensi.sqlite".to_string())
            .into();

        let document_dir = env::var("PRESENSI_DOCUMENT_DIR")
            .unwrap_or_else(|_| "./data/documents".to_string())
            .into();

        let platform = match env::var("PRESENSI_PLATFORM") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring PRESENSI_PLATFORM: {}", e);
                Platform::detect()
            }),
            Err(_) => Platform::detect(),
        };

        let android_authority = env::var("PRESENSI_ANDROID_AUTHORITY")
            .unwrap_or_else(|_| DEFAULT_ANDROID_AUTHORITY.to_string());

        let utc_offset = env::var("PRESENSI_UTC_OFFSET_HOURS")
            .ok()
            .and_then(|raw| {
                let parsed = parse_offset_hours(&raw);
                if parsed.is_none() {
                    tracing::warn!("Invalid PRESENSI_UTC_OFFSET_HOURS '{}', using +7", raw);
                }
                parsed
            })
            .unwrap_or_else(default_offset);

        let log_level = env::var("PRESENSI_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Self {
            api_base_url,
            db_path,
            document_dir,
            platform,
            android_authority,
            utc_offset,
            log_level,
        }
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        tracing::warn!("Invalid PRESENSI_API_BASE_URL '{}', using default", raw);
        None
    }
}

fn parse_offset_hours(raw: &str) -> Option<FixedOffset> {
    let hours: i32 = raw.trim().parse().ok()?;
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

/// UTC+7.
pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("PRESENSI_API_BASE_URL");
        env::remove_var("PRESENSI_DB_PATH");
        env::remove_var("PRESENSI_DOCUMENT_DIR");
        env::remove_var("PRESENSI_PLATFORM");
        env::remove_var("PRESENSI_ANDROID_AUTHORITY");
        env::remove_var("PRESENSI_UTC_OFFSET_HOURS");
        env::remove_var("PRESENSI_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.db_path, PathBuf::from("./data/presensi.sqlite"));
        assert_eq!(config.document_dir, PathBuf::from("./data/documents"));
        assert_eq!(config.platform, Platform::detect());
        assert_eq!(config.android_authority, DEFAULT_ANDROID_AUTHORITY);
        assert_eq!(config.utc_offset.local_minus_utc(), 7 * 3600);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8000/api/"),
            Some("http://127.0.0.1:8000/api".to_string())
        );
        assert_eq!(normalize_base_url("ftp://example.com"), None);
    }

    #[test]
    fn test_parse_offset_hours() {
        assert_eq!(parse_offset_hours("8").map(|o| o.local_minus_utc()), Some(8 * 3600));
        assert_eq!(parse_offset_hours("-3").map(|o| o.local_minus_utc()), Some(-3 * 3600));
        assert!(parse_offset_hours("abc").is_none());
        assert!(parse_offset_hours("48").is_none());
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("Android".parse::<Platform>(), Ok(Platform::Android));
        assert_eq!("ios".parse::<Platform>(), Ok(Platform::Ios));
        assert_eq!("desktop".parse::<Platform>(), Ok(Platform::Other));
        assert!("symbian".parse::<Platform>().is_err());
    }
}
