//! Client configuration: bundled TOML defaults with a build-time override.
//!
//! The only setting that normally changes between deployments is the
//! backend base URL. Every field has a sensible default so the TOML source
//! may be empty. The WebSocket URLs are derived from the backend URL by
//! swapping `http` for `ws` (and `https` for `wss`).

use std::time::Duration;

use devicehub_domain::id::{DeviceId, UserId};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://hub.example.com`.
    pub backend_url: String,
    /// Delay between live-channel reconnect attempts.
    pub reconnect_delay_ms: u64,
    /// How long a notification stays on screen.
    pub toast_timeout_ms: u32,
    /// Number of readings fetched for a device's history panel.
    pub sensor_history_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            reconnect_delay_ms: 3000,
            toast_timeout_ms: 5000,
            sensor_history_limit: 10,
        }
    }
}

impl ClientConfig {
    /// Parse `source` as TOML, apply the optional backend override, and
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for unusable values.
    pub fn load(source: &str, backend_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(source)?;
        if let Some(url) = backend_override.filter(|url| !url.trim().is_empty()) {
            config.backend_url = url.trim().to_string();
        }
        config.backend_url = config.backend_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "backend_url must start with http:// or https://, got `{}`",
                self.backend_url
            )));
        }
        if self.reconnect_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "reconnect_delay_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Reconnect delay as a [`Duration`].
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// Absolute URL of an API path, e.g. `api_url("/devices")`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{path}", self.backend_url)
    }

    /// Live channel URL for the dashboard of `user_id`.
    #[must_use]
    pub fn dashboard_ws_url(&self, user_id: &UserId) -> String {
        format!("{}/ws/dashboard/{user_id}", self.ws_base())
    }

    /// URL a device connects to, shown on its card for flashing.
    #[must_use]
    pub fn device_ws_url(&self, device_id: &DeviceId, auth_token: &str) -> String {
        format!("{}/ws/device/{device_id}/{auth_token}", self.ws_base())
    }

    fn ws_base(&self) -> String {
        if let Some(rest) = self.backend_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.backend_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.backend_url.clone()
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
