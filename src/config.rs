use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::SERVICE_NAME;

/// Default config file path.
pub const CONFIG_PATH: &str = "config.toml";

/// Environment variables that override the `[twitter]` credentials.
pub const ENV_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// Top-level application config deserialized from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// OAuth 1.0a user-context credentials for the posting account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterConfig {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_secret: String,
}

impl fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"[REDACTED]")
            .finish()
    }
}

impl TwitterConfig {
    /// All four credentials are present.
    pub fn is_complete(&self) -> bool {
        !self.consumer_key.is_empty()
            && !self.consumer_secret.is_empty()
            && !self.access_token.is_empty()
            && !self.access_token_secret.is_empty()
    }

    /// Replace credentials with any non-empty values from the environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields = [
            (ENV_CONSUMER_KEY, &mut self.consumer_key),
            (ENV_CONSUMER_SECRET, &mut self.consumer_secret),
            (ENV_ACCESS_TOKEN, &mut self.access_token),
            (ENV_ACCESS_TOKEN_SECRET, &mut self.access_token_secret),
        ];
        for (name, field) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Minutes to sleep between poll ticks.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_minutes: u64,
    /// Innings pitched a bid needs before anything is posted.
    #[serde(default = "default_innings_to_alert")]
    pub innings_to_alert: f64,
    /// Run everything except the publish call.
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    /// Timeout applied to every outbound HTTP request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// systemd unit reported by `update-status`.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_poll_interval() -> u64 {
    3
}

fn default_innings_to_alert() -> f64 {
    6.0
}

fn default_log_path() -> String {
    "nohittertracker.log".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_service_name() -> String {
    SERVICE_NAME.to_string()
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: default_poll_interval(),
            innings_to_alert: default_innings_to_alert(),
            debug_mode: false,
            log_path: default_log_path(),
            request_timeout_secs: default_request_timeout(),
            service_name: default_service_name(),
        }
    }
}

impl SettingsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_minutes * 60)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Load config from the given TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load config, falling back to defaults when the file is missing or
    /// invalid. The failure is logged rather than returned.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Config data successfully loaded from {}", path.display());
                config
            }
            Err(e) => {
                error!("Error loading config data, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    /// Write config to the given TOML file path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let s = SettingsConfig::default();
        assert_eq!(s.poll_interval_minutes, 3);
        assert_eq!(s.innings_to_alert, 6.0);
        assert!(!s.debug_mode);
        assert_eq!(s.poll_interval(), Duration::from_secs(180));
        assert_eq!(s.service_name, "nohittertracker.service");
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[settings]\npoll_interval_minutes = 1\ndebug_mode = true\n\n[twitter]\nconsumer_key = \"ck\""
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.settings.poll_interval_minutes, 1);
        assert!(config.settings.debug_mode);
        assert_eq!(config.settings.innings_to_alert, 6.0);
        assert_eq!(config.twitter.consumer_key, "ck");
        assert!(!config.twitter.is_complete());
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.toml"));
        assert_eq!(config.settings, SettingsConfig::default());
    }

    #[test]
    fn load_or_default_on_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\ninnings_to_alert = \"six\"").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
        let config = AppConfig::load_or_default(file.path());
        assert_eq!(config.settings.innings_to_alert, 6.0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.settings.innings_to_alert = 5.0;
        config.twitter.access_token = "token".into();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.settings.innings_to_alert, 5.0);
        assert_eq!(loaded.twitter.access_token, "token");
    }

    #[test]
    fn env_overrides_replace_non_empty_values() {
        let mut twitter = TwitterConfig {
            consumer_key: "file-key".into(),
            consumer_secret: "file-secret".into(),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CONSUMER_KEY, "env-key"),
            (ENV_CONSUMER_SECRET, "  "),
            (ENV_ACCESS_TOKEN, "env-token"),
            (ENV_ACCESS_TOKEN_SECRET, "env-token-secret"),
        ]);
        twitter.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(twitter.consumer_key, "env-key");
        assert_eq!(twitter.consumer_secret, "file-secret");
        assert_eq!(twitter.access_token, "env-token");
        assert!(twitter.is_complete());
    }

    #[test]
    fn debug_redacts_secrets() {
        let twitter = TwitterConfig {
            consumer_secret: "hunter2".into(),
            access_token_secret: "hunter3".into(),
            ..Default::default()
        };
        let shown = format!("{twitter:?}");
        assert!(!shown.contains("hunter2"));
        assert!(!shown.contains("hunter3"));
    }
}
