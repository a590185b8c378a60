//! Device type: a template describing a class of hardware.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::DeviceTypeId;
use crate::time::{self, Timestamp};

/// A class of hardware (e.g. a specific microcontroller board) shared by
/// many devices. Immutable once created from this UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: DeviceTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Opaque pin descriptors; this UI never populates them.
    #[serde(default)]
    pub pins_config: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "time::deserialize_lenient")]
    pub created_at: Option<Timestamp>,
}

/// Payload for `POST /device-types`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDeviceType {
    pub name: String,
    pub description: String,
    pub pins_config: Vec<serde_json::Value>,
}

impl NewDeviceType {
    /// Build a creation payload from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the name is blank.
    pub fn from_form(name: &str, description: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("Device type name"));
        }
        Ok(Self {
            name: name.to_string(),
            description: description.trim().to_string(),
            pins_config: Vec::new(),
        })
    }
}

/// Resolve the display name of a device type, `"Unknown"` when the
/// reference does not match any loaded type.
#[must_use]
pub fn name_of<'a>(types: &'a [DeviceType], id: &DeviceTypeId) -> &'a str {
    types
        .iter()
        .find(|t| &t.id == id)
        .map_or("Unknown", |t| t.name.as_str())
}
