//! Client configuration
//!
//! Supports loading settings from (in order of priority):
//! 1. JSON file in the shared config directory (~/.config/audience-sync/mailchimp.json)
//! 2. Runtime environment variables (fallback)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default time unit for batch poll backoff
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Settings for a client bound to one audience
#[derive(Debug, Clone)]
pub struct MailchimpConfig {
    pub list_id: String,
    pub api_key: String,
    /// Records per page when listing members and segments
    pub page_size: usize,
    /// Log every HTTP request at info level
    pub debug: bool,
    /// Backoff unit: attempt `n` waits `n² * poll_interval`
    pub poll_interval: Duration,
}

/// On-disk config file format
#[derive(Deserialize)]
struct ConfigFile {
    list_id: String,
    api_key: String,
    page_size: Option<usize>,
    debug: Option<bool>,
    poll_interval_secs: Option<u64>,
}

impl MailchimpConfig {
    /// Create a config with default page size, debug off and one second poll unit
    pub fn new(list_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            debug: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Builder method to set the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder method to toggle request logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder method to set the poll backoff unit
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Load config from the config directory, falling back to the environment
    pub fn load() -> Result<Self> {
        if config::config_exists(config::MAILCHIMP_FILE) {
            let file: ConfigFile = config::load_json(config::MAILCHIMP_FILE)?;
            return Self::from_config_file(file);
        }

        Self::from_env()
    }

    /// Load config from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: ConfigFile = config::load_json_file(path)?;
        Self::from_config_file(file)
    }

    /// Parse config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(json).context("Failed to parse Mailchimp config JSON")?;
        Self::from_config_file(file)
    }

    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::new(file.list_id, file.api_key)
            .with_page_size(file.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .with_debug(file.debug.unwrap_or(false));
        if let Some(secs) = file.poll_interval_secs {
            config.poll_interval = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load config from `MAILCHIMP_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let list_id =
            lookup("MAILCHIMP_LIST_ID").context("MAILCHIMP_LIST_ID environment variable not set")?;
        let api_key =
            lookup("MAILCHIMP_API_KEY").context("MAILCHIMP_API_KEY environment variable not set")?;

        let mut config = Self::new(list_id, api_key);

        if let Some(page_size) = lookup("MAILCHIMP_PAGE_SIZE") {
            config.page_size = page_size
                .parse()
                .with_context(|| format!("Invalid MAILCHIMP_PAGE_SIZE: {}", page_size))?;
        }
        if let Some(debug) = lookup("MAILCHIMP_DEBUG") {
            config.debug = matches!(debug.as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the config can be used to build a client
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list_id.trim().is_empty() {
            return Err(ConfigError::MissingListId);
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        self.datacenter()?;
        Ok(())
    }

    /// Datacenter the audience lives in, taken from the API key suffix (`<key>-us6`)
    pub fn datacenter(&self) -> Result<&str, ConfigError> {
        match self.api_key.rsplit_once('-') {
            Some((key, dc)) if !key.is_empty() && !dc.is_empty() => Ok(dc),
            _ => Err(ConfigError::MissingDatacenter),
        }
    }

    /// API root, e.g. `https://us6.api.mailchimp.com/3.0/`
    pub fn base_url(&self) -> Result<String, ConfigError> {
        Ok(format!("https://{}.api.mailchimp.com/3.0/", self.datacenter()?))
    }

    /// Get the default config file path (~/.config/audience-sync/mailchimp.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(config::MAILCHIMP_FILE)
    }

    /// Check if settings are available (file or env vars)
    pub fn is_available() -> bool {
        if config::config_exists(config::MAILCHIMP_FILE) {
            return true;
        }
        std::env::var("MAILCHIMP_LIST_ID").is_ok() && std::env::var("MAILCHIMP_API_KEY").is_ok()
    }
}
