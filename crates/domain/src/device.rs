//! Device: a piece of hardware registered by the user.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceId, DeviceTypeId};
use crate::time::{self, Timestamp};

/// Connectivity of a device as last reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

impl DeviceStatus {
    /// Whether the device currently holds a live connection to the backend.
    #[must_use]
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// A registered device, as cached by the dashboard.
///
/// The backend is the source of truth; this copy is replaced on every
/// refetch and patched in place by live status messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub device_type_id: DeviceTypeId,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default, deserialize_with = "time::deserialize_lenient")]
    pub last_seen: Option<Timestamp>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub wifi_ssid: Option<String>,
    #[serde(default, deserialize_with = "time::deserialize_lenient")]
    pub created_at: Option<Timestamp>,
}

/// Payload for `POST /devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDevice {
    pub name: String,
    pub device_type_id: DeviceTypeId,
}

impl NewDevice {
    /// Create a builder for constructing a [`NewDevice`].
    #[must_use]
    pub fn builder() -> NewDeviceBuilder {
        NewDeviceBuilder::default()
    }

    /// Check presence of every required field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the name (after
    /// trimming) or the device type is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("Device name"));
        }
        if self.device_type_id.is_empty() {
            return Err(ValidationError::MissingField("Device type"));
        }
        Ok(())
    }
}

/// Step-by-step builder for [`NewDevice`].
#[derive(Debug, Default)]
pub struct NewDeviceBuilder {
    name: Option<String>,
    device_type_id: Option<DeviceTypeId>,
}

impl NewDeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type_id(mut self, id: impl Into<DeviceTypeId>) -> Self {
        self.device_type_id = Some(id.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewDevice`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if a required field is
    /// missing or empty.
    pub fn build(self) -> Result<NewDevice, ValidationError> {
        let device = NewDevice {
            name: self.name.unwrap_or_default().trim().to_string(),
            device_type_id: self.device_type_id.unwrap_or_else(|| DeviceTypeId::new("")),
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_new_device_when_all_fields_present() {
        let device = NewDevice::builder()
            .name("Greenhouse")
            .device_type_id("esp32")
            .build()
            .unwrap();
        assert_eq!(device.name, "Greenhouse");
        assert_eq!(device.device_type_id.as_str(), "esp32");
    }

    #[test]
    fn should_reject_blank_name() {
        let result = NewDevice::builder()
            .name("   ")
            .device_type_id("esp32")
            .build();
        assert_eq!(result, Err(ValidationError::MissingField("Device name")));
    }

    #[test]
    fn should_reject_missing_device_type() {
        let result = NewDevice::builder().name("Greenhouse").build();
        assert_eq!(result, Err(ValidationError::MissingField("Device type")));
    }

    #[test]
    fn should_deserialize_backend_payload_ignoring_extra_fields() {
        let json = r#"{
            "id": "d1",
            "name": "Porch light",
            "device_type_id": "t1",
            "auth_token": "secret",
            "user_id": "u1",
            "status": "online",
            "last_seen": "2024-03-01T12:30:05.123456+00:00",
            "firmware_version": "1.0.0",
            "ip_address": null,
            "wifi_ssid": null,
            "created_at": "2024-03-01T10:00:00+00:00"
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id.as_str(), "d1");
        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.firmware_version.as_deref(), Some("1.0.0"));
        assert!(device.last_seen.is_some());
        assert!(device.ip_address.is_none());
    }

    #[test]
    fn should_default_to_offline_when_status_missing() {
        let json = r#"{"id": "d1", "name": "n", "device_type_id": "t1"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.status, DeviceStatus::Offline);
        assert!(!device.status.is_online());
    }

    #[test]
    fn should_serialize_create_payload() {
        let device = NewDevice::builder()
            .name("Greenhouse")
            .device_type_id("esp32")
            .build()
            .unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Greenhouse", "device_type_id": "esp32"})
        );
    }
}
