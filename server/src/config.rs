//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_SVG_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: `{value}`")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory for `FileStore`; `None` selects the in-memory store.
    pub store_dir: Option<PathBuf>,
    /// Largest accepted SVG document, in bytes.
    pub max_svg_bytes: usize,
    /// Public origin of this server, for logs.
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, store_dir: None, max_svg_bytes: DEFAULT_MAX_SVG_BYTES, public_base_url: None }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SVG_STORE_DIR`: store shares as files here (memory when unset)
    /// - `MAX_SVG_BYTES`: default 1 MiB
    /// - `PUBLIC_BASE_URL`: informational
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable is set but
    /// cannot be parsed, or `MAX_SVG_BYTES` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `get`.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = parse_var("PORT", get("PORT"), DEFAULT_PORT)?;
        let max_svg_bytes = parse_var("MAX_SVG_BYTES", get("MAX_SVG_BYTES"), DEFAULT_MAX_SVG_BYTES)?;
        if max_svg_bytes == 0 {
            return Err(ConfigError::Invalid { key: "MAX_SVG_BYTES", value: "0".into() });
        }

        Ok(Self {
            port,
            store_dir: get("SVG_STORE_DIR").map(PathBuf::from),
            max_svg_bytes,
            public_base_url: get("PUBLIC_BASE_URL").map(|v| v.trim_end_matches('/').to_string()),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
