//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! browser adapter can depend on them without creating circular dependencies.

pub mod api;
pub mod live;
pub mod notifier;
pub mod store;

pub use api::{ApiError, DeviceHubApi, OtaReceipt};
pub use live::{LiveConnection, LiveError, LiveTransport, Sleeper};
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use store::{DashboardStore, FirmwareStore};
