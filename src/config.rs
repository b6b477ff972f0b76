//! Runtime configuration for [`CryptoCompare`](crate::client::CryptoCompare)

use crate::constants::{
    ENV_API_URL, ENV_APP_NAME, ENV_LEGACY_API_URL, ENV_TIMEOUT_SECS, LEGACY_API_URL, MIN_API_URL,
    REQUEST_TIMEOUT_SECS,
};
use std::time::Duration;

/// Client configuration
///
/// The application name is the only value the API itself sees; it is sent as
/// `extraParams` on every request. The rest configures the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for min-api endpoints
    pub api_url: String,
    /// Base URL for legacy www endpoints
    pub legacy_api_url: String,
    /// Application name attached to every request
    pub app_name: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: MIN_API_URL.to_string(),
            legacy_api_url: LEGACY_API_URL.to_string(),
            app_name: None,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads overrides from `CRYPTOCOMPARE_*` environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_APP_NAME).filter(|v| !v.is_empty()) {
            config.app_name = Some(name);
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            config = config.with_api_url(url);
        }
        if let Some(url) = lookup(ENV_LEGACY_API_URL).filter(|v| !v.is_empty()) {
            config = config.with_legacy_api_url(url);
        }
        match lookup(ENV_TIMEOUT_SECS).map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) => config.timeout = Duration::from_secs(secs),
            Some(Err(e)) => {
                tracing::warn!(error = %e, var = ENV_TIMEOUT_SECS, "Ignoring invalid timeout");
            }
            None => {}
        }

        config
    }

    /// Sets the application name sent as `extraParams`
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        self.app_name = (!app_name.is_empty()).then_some(app_name);
        self
    }

    /// Overrides the min-api base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the legacy www base URL
    pub fn with_legacy_api_url(mut self, url: impl Into<String>) -> Self {
        self.legacy_api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
