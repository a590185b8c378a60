//! Typed identifier newtypes.
//!
//! Identifiers are issued by the backend as opaque strings; the client never
//! generates them. They are transparent on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a server-issued identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty (e.g. an unselected form field).
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Unique identifier for a [`DeviceType`](crate::device_type::DeviceType).
    DeviceTypeId
);

define_id!(
    /// Unique identifier for a [`FirmwareVersion`](crate::firmware::FirmwareVersion).
    FirmwareId
);

define_id!(
    /// Unique identifier for a [`User`](crate::session::User).
    UserId
);

define_id!(
    /// Unique identifier for a [`SensorReading`](crate::sensor::SensorReading).
    ReadingId
);
