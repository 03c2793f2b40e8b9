use std::env;

use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "VDESK_API_URL";

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or is not http(s).
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let base_url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
            raw: raw.to_string(),
            reason: err.to_string(),
        })?;
        match base_url.scheme() {
            "http" | "https" => Ok(Self { base_url }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Pick the base URL: `flag`, then `VDESK_API_URL` via `lookup`, then
    /// [`DEFAULT_API_URL`]. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the chosen value is not a usable URL.
    pub fn resolve(
        flag: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let from_env = lookup(API_URL_ENV);
        let chosen = flag
            .filter(|value| !value.trim().is_empty())
            .or_else(|| from_env.as_deref().filter(|value| !value.trim().is_empty()))
            .unwrap_or(DEFAULT_API_URL);
        Self::new(chosen)
    }

    /// [`ApiConfig::resolve`] against the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the chosen value is not a usable URL.
    pub fn from_env(flag: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(flag, |name| env::var(name).ok())
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join an absolute API path (`/api/...`) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
