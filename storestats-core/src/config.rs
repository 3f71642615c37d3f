//! Configuration management
//!
//! Settings are resolved in order: built-in defaults, an optional JSON
//! settings file, then environment overrides. The CLI applies its own flags last.
//!
//! ```json
//! {
//!   "baseUrl": "https://fakestoreapi.com",
//!   "cartsStartDate": "2000-01-01",
//!   "cartsEndDate": "2023-04-07",
//!   "timeoutSecs": 30
//! }
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};

/// Default store API
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Environment variable to override the store API base URL
pub const BASE_URL_ENV: &str = "STORESTATS_BASE_URL";

/// Environment variable to override the request timeout in seconds
pub const TIMEOUT_ENV: &str = "STORESTATS_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw settings file structure; every key is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    carts_start_date: Option<NaiveDate>,
    #[serde(default)]
    carts_end_date: Option<NaiveDate>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Store API base URL without a trailing slash
    pub base_url: String,
    /// First day of the cart date window (inclusive)
    pub carts_start_date: NaiveDate,
    /// Last day of the cart date window (inclusive)
    pub carts_end_date: NaiveDate,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            carts_start_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            carts_end_date: NaiveDate::from_ymd_opt(2023, 4, 7).unwrap_or_default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from an optional settings file and the process environment
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = settings_path {
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::config(format!("cannot read settings file {}: {}", path.display(), e))
            })?;
            config.apply_settings_json(&content)?;
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::debug!(base_url = %config.base_url, "configuration loaded");
        Ok(config)
    }

    /// Overlay values from a settings file's JSON content
    fn apply_settings_json(&mut self, content: &str) -> Result<()> {
        let raw: SettingsFile = serde_json::from_str(content)
            .map_err(|e| Error::config(format!("invalid settings file: {}", e)))?;

        if let Some(base_url) = raw.base_url {
            self.base_url = normalize_base_url(&base_url);
        }
        if let Some(start) = raw.carts_start_date {
            self.carts_start_date = start;
        }
        if let Some(end) = raw.carts_end_date {
            self.carts_end_date = end;
        }
        if let Some(timeout) = raw.timeout_secs {
            self.timeout_secs = timeout;
        }
        Ok(())
    }

    /// Overlay environment variables, read through `lookup`
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = normalize_base_url(&base_url);
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
        }
        Ok(())
    }

    /// Replace the base URL (used for command-line overrides)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Check the resolved values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.carts_start_date > self.carts_end_date {
            return Err(Error::config(format!(
                "cart window starts ({}) after it ends ({})",
                self.carts_start_date, self.carts_end_date
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
