//! Pin control: commands addressing a hardware I/O line on a device.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::DeviceId;

/// Value written to a pin. Integers go out as JSON numbers, anything else
/// as the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PinValue {
    Int(i64),
    Text(String),
}

impl PinValue {
    /// Interpret free-text input: an integer when the trimmed text parses as
    /// one, otherwise the raw text unchanged.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Int)
    }
}

impl std::fmt::Display for PinValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => v.fmt(f),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Payload for `POST /control/pin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinCommand {
    pub device_id: DeviceId,
    pub pin: String,
    pub value: PinValue,
}

impl PinCommand {
    /// Build a command from the card's form fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the pin or the value
    /// is blank.
    pub fn from_form(device_id: DeviceId, pin: &str, value: &str) -> Result<Self, ValidationError> {
        let pin = pin.trim();
        if pin.is_empty() {
            return Err(ValidationError::MissingField("Pin"));
        }
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField("Value"));
        }
        Ok(Self {
            device_id,
            pin: pin.to_string(),
            value: PinValue::parse(value),
        })
    }
}
