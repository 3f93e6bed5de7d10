//! Runtime settings loaded from config.toml with environment overrides.
//!
//! Every field has a default so a missing config file is not an error; a
//! `DATABASE_URL` environment variable (typically from `.env` via dotenvy)
//! takes precedence over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_database_url() -> String {
    super::database::DEFAULT_DATABASE_URL.to_string()
}

fn default_alert_threshold() -> f64 {
    5.0
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_lock_file() -> PathBuf {
    PathBuf::from("scheduler.lock")
}

fn default_email_from() -> String {
    "noreply@dryweightwatchers.com".to_string()
}

/// Application settings for the scheduler, alerting and outbound channels.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Default weight-change alert threshold, overridable per patient
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    /// Seconds between reminder-matcher ticks
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Advisory lock file guarding against duplicate poller instances
    #[serde(default = "default_lock_file")]
    pub lock_file: PathBuf,
    /// From-address for reminder and alert emails
    #[serde(default = "default_email_from")]
    pub email_from: String,
    /// From-number for SMS alerts; SMS delivery is skipped when unset
    #[serde(default)]
    pub sms_from: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            alert_threshold: default_alert_threshold(),
            poll_interval_secs: default_poll_interval_secs(),
            lock_file: default_lock_file(),
            email_from: default_email_from(),
            sms_from: None,
        }
    }
}

impl AppSettings {
    /// Poll interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Loads settings from a TOML file, falling back to defaults when the file
/// does not exist, then applies environment overrides.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AppSettings> {
    let mut settings = if path.as_ref().exists() {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
            message: format!("Failed to read config file: {e}"),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?
    } else {
        AppSettings::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }

    Ok(settings)
}

/// Loads settings from the default location (./config.toml).
pub fn load_default_settings() -> Result<AppSettings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            database_url = "sqlite::memory:"
            alert_threshold = 7.5
            poll_interval_secs = 30
            lock_file = "/tmp/dww.lock"
            email_from = "alerts@example.com"
            sms_from = "+15550100"
        "#;

        let settings: AppSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.alert_threshold, 7.5);
        assert_eq!(settings.poll_interval_secs, 30);
        assert_eq!(settings.lock_file, PathBuf::from("/tmp/dww.lock"));
        assert_eq!(settings.email_from, "alerts@example.com");
        assert_eq!(settings.sms_from.as_deref(), Some("+15550100"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: AppSettings = toml::from_str("").unwrap();
        assert_eq!(settings.alert_threshold, 5.0);
        assert_eq!(settings.poll_interval_secs, 60);
        assert_eq!(settings.lock_file, PathBuf::from("scheduler.lock"));
        assert!(settings.sms_from.is_none());
        assert_eq!(settings.poll_interval(), Duration::from_secs(60));
    }
}
