use std::time::Duration;

use anyhow::{Context, Result};

use crate::Locale;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_SUCCESS_WINDOW: Duration = Duration::from_secs(3);
pub const DEFAULT_TOP_K: i64 = 3;

/// Settings shared by the client and the interaction flows.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every endpoint path is appended to.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub locale: Locale,
    /// How long an upload confirmation stays visible.
    pub success_window: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            locale: Locale::default(),
            success_window: DEFAULT_SUCCESS_WINDOW,
        }
    }
}

impl Config {
    /// Reads `API_URL`, `API_TIMEOUT_SECS`, `RAG_LOCALE` and `UPLOAD_SUCCESS_SECS`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = get("API_URL") {
            config.api_url = url;
        }
        if let Some(secs) = get("API_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("API_TIMEOUT_SECS must be a whole number of seconds")?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(locale) = get("RAG_LOCALE") {
            config.locale = locale.parse().context("invalid RAG_LOCALE")?;
        }
        if let Some(secs) = get("UPLOAD_SUCCESS_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("UPLOAD_SUCCESS_SECS must be a whole number of seconds")?;
            config.success_window = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
