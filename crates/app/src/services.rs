//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from the browser.
//! Failures never escape a service: they are logged and turned into
//! notifications at the call site.

pub mod dashboard_service;
pub mod device_service;
pub mod firmware_service;
pub mod session_service;
