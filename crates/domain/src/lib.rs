//! # devicehub-domain
//!
//! Pure domain model for the devicehub device-management dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (hardware registered by the user, with live status)
//! - Define **Device types** (templates shared by many devices)
//! - Define **Firmware versions** and the upload form
//! - Define **Sessions** (user + opaque token) and login/register credentials
//! - Define **Pin commands** and **sensor readings**
//! - Decode **live messages** pushed over the dashboard channel
//! - Pure dashboard logic: status updates, counts, device-type lookup
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod connection;
pub mod dashboard;
pub mod device;
pub mod device_type;
pub mod firmware;
pub mod live;
pub mod pin;
pub mod sensor;
pub mod session;
