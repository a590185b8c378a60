//! Live messages pushed to the dashboard over `/ws/dashboard/{user_id}`.
//!
//! Frames are JSON objects tagged by `type`. Decoding is strict about the
//! tag: a tag this client does not know is reported as
//! [`DecodeError::UnknownType`] so that supporting a new message kind is an
//! explicit change to [`LiveMessage`] rather than a silent default.

use serde::{Deserialize, Deserializer, Serialize};

use crate::device::DeviceStatus;
use crate::error::DecodeError;
use crate::id::DeviceId;

/// Result reported by a device after an OTA push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOutcome {
    #[default]
    Success,
    Failed,
    #[serde(other)]
    Other,
}

/// A decoded live message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// A device connected or disconnected.
    DeviceStatus {
        device_id: DeviceId,
        status: DeviceStatus,
    },
    /// A device reported sensor values.
    SensorData {
        device_id: DeviceId,
        #[serde(default)]
        data: serde_json::Value,
    },
    /// A device finished (or failed) applying an OTA update.
    FirmwareUpdateStatus {
        device_id: DeviceId,
        /// Devices may omit the outcome, which the backend relays as `null`.
        #[serde(default, deserialize_with = "null_as_default")]
        status: UpdateOutcome,
        #[serde(default)]
        version: Option<String>,
    },
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Tags understood by [`LiveMessage`].
const KNOWN_TYPES: [&str; 3] = ["device_status", "sensor_data", "firmware_update_status"];

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

impl LiveMessage {
    /// Decode one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownType`] for an unrecognised `type` tag and
    /// [`DecodeError::Malformed`] for invalid JSON or missing fields.
    pub fn decode(frame: &str) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_str(frame).map_err(DecodeError::Malformed)?;
        if !KNOWN_TYPES.contains(&envelope.kind.as_str()) {
            return Err(DecodeError::UnknownType(envelope.kind));
        }
        serde_json::from_str(frame).map_err(DecodeError::Malformed)
    }

    /// The device this message is about.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::DeviceStatus { device_id, .. }
            | Self::SensorData { device_id, .. }
            | Self::FirmwareUpdateStatus { device_id, .. } => device_id,
        }
    }
}
