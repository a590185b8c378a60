//! Client configuration bundled into the WASM binary.

use devicehub_app::config::ClientConfig;

/// `devicehub.toml`, compiled in.
const BUNDLED: &str = include_str!("../devicehub.toml");

/// Load the bundled configuration, honouring a `DEVICEHUB_BACKEND_URL` set
/// at build time. Falls back to the defaults when the bundle is invalid.
pub fn load() -> ClientConfig {
    match ClientConfig::load(BUNDLED, option_env!("DEVICEHUB_BACKEND_URL")) {
        Ok(config) => {
            tracing::info!(backend_url = %config.backend_url, "configuration loaded");
            config
        }
        Err(err) => {
            tracing::error!(error = %err, "invalid bundled configuration, using defaults");
            ClientConfig::default()
        }
    }
}
