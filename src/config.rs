//! Runtime configuration read from the environment (and `.env`, loaded by the
//! binary through dotenvy).
//!
//! | Variable                    | Default                   |
//! |-----------------------------|---------------------------|
//! | `MBTA_API_BASE_URL`         | `https://api-v3.mbta.com` |
//! | `MBTA_API_KEY`              | unset (anonymous quota)   |
//! | `MBTA_TIMEOUT_SECS`         | `30`                      |
//! | `MBTA_CONNECT_TIMEOUT_SECS` | `10`                      |

use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get("MBTA_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("MBTA_API_BASE_URL is not a valid URL: {base_url}"))?;

        let secs = |key: &str, default: u64| -> Result<Duration> {
            let secs = match get(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} must be a whole number of seconds"))?,
                None => default,
            };
            Ok(Duration::from_secs(secs))
        };

        Ok(Self {
            base_url,
            api_key: get("MBTA_API_KEY").map(|k| k.trim().to_string()),
            timeout: secs("MBTA_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout: secs("MBTA_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        })
    }
}
