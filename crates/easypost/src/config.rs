//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::EasyPostError;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.easypost.com/v2";

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Immutable settings shared by every request a client makes.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, EasyPostError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EasyPostError::Config("API key is required".to_string()));
        }

        Ok(Self {
            api_key,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("easypost-rust/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads `EASYPOST_API_KEY` (required), `EASYPOST_BASE_URL` and
    /// `EASYPOST_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the overrides are invalid.
    pub fn from_env() -> Result<Self, EasyPostError> {
        let api_key = env::var("EASYPOST_API_KEY").map_err(|_| {
            EasyPostError::Config("EASYPOST_API_KEY environment variable not set".to_string())
        })?;

        let mut config = Self::new(api_key)?;

        if let Some(base_url) = env::var("EASYPOST_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
        {
            config = config.with_base_url(&base_url)?;
        }

        if let Ok(raw) = env::var("EASYPOST_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                EasyPostError::Config(format!("EASYPOST_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Point the client at a different endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, EasyPostError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Endpoint every request path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Value sent as `User-Agent`.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Join a resource path onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, EasyPostError> {
    let url = Url::parse(raw)
        .map_err(|e| EasyPostError::Config(format!("invalid base URL {raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(EasyPostError::Config(format!(
            "unsupported base URL scheme: {scheme}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_new_requires_api_key() {
        assert!(ClientConfig::new("").is_err());
        assert!(ClientConfig::new("   ").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("EZTK123").unwrap();
        assert_eq!(config.base_url().as_str(), "https://api.easypost.com/v2");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.user_agent().starts_with("easypost-rust/"));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("EZTK123")
            .unwrap()
            .with_base_url("http://localhost:8080/v2/")
            .unwrap();
        assert_eq!(
            config.endpoint("/shipments/shp_1"),
            "http://localhost:8080/v2/shipments/shp_1"
        );
        assert_eq!(config.endpoint("trackers"), "http://localhost:8080/v2/trackers");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = ClientConfig::new("EZTK123").unwrap();
        assert!(config.clone().with_base_url("not a url").is_err());
        assert!(config.with_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("EZTK_super_secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("EASYPOST_API_KEY", "EZTK_env");
        env::set_var("EASYPOST_BASE_URL", "http://127.0.0.1:9000/v2");
        env::set_var("EASYPOST_TIMEOUT_SECS", "5");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key(), "EZTK_env");
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:9000/v2");
        assert_eq!(config.timeout(), Duration::from_secs(5));

        env::set_var("EASYPOST_TIMEOUT_SECS", "soon");
        assert!(ClientConfig::from_env().is_err());

        env::remove_var("EASYPOST_API_KEY");
        env::remove_var("EASYPOST_BASE_URL");
        env::remove_var("EASYPOST_TIMEOUT_SECS");
        assert!(ClientConfig::from_env().is_err());
    }
}
