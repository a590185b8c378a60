//! Sensor readings reported by devices.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, ReadingId};
use crate::time::{self, Timestamp};

/// One stored reading, as returned by `GET /sensor-data/{device_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: ReadingId,
    pub device_id: DeviceId,
    /// Free-form payload sent by the device (e.g. `{"temp": 21.5}`).
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, deserialize_with = "time::deserialize_lenient")]
    pub timestamp: Option<Timestamp>,
}

impl SensorReading {
    /// Compact single-line rendering of the payload.
    #[must_use]
    pub fn data_display(&self) -> String {
        self.data.to_string()
    }
}
