//! # devicehub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that the browser adapter implements:
//!   - `DeviceHubApi`: the backend REST API
//!   - `Notifier`: transient user-facing notifications
//!   - `DashboardStore` / `FirmwareStore`: reactive view state
//!   - `LiveTransport` / `LiveConnection` / `Sleeper`: the live channel
//! - Define **use-case services**:
//!   - `SessionService`: login / register
//!   - `DashboardService`: device & device-type lists, live dispatch
//!   - `DeviceService`: pin control, sensor history
//!   - `FirmwareService`: list, upload, OTA push
//! - Run the **live feed**: fixed-delay reconnect loop over the live channel
//! - Load and validate the **client configuration**
//!
//! ## Dependency rule
//! Depends on `devicehub-domain` only. Never imports the dashboard adapter.
//! Port futures are not `Send`: everything runs on the browser's single
//! event loop.

pub mod config;
pub mod live_feed;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
