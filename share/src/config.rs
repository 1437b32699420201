//! Share client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_SHARE_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_SHARE_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SHARE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// Origin of the storage server, without a trailing slash.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_SHARE_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_SHARE_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ShareConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SHARE_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `SHARE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHARE_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ShareConfig::from_env`], reading variables through `get`.
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = get("SHARE_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        Self {
            base_url,
            request_timeout_secs: parse_or(get("SHARE_REQUEST_TIMEOUT_SECS"), DEFAULT_SHARE_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: parse_or(get("SHARE_CONNECT_TIMEOUT_SECS"), DEFAULT_SHARE_CONNECT_TIMEOUT_SECS),
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}
