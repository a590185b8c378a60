//! Firmware versions and the upload form.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceTypeId, FirmwareId};
use crate::time::{self, Timestamp};

/// A firmware binary stored by the backend for one device type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmwareVersion {
    pub id: FirmwareId,
    pub device_type_id: DeviceTypeId,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Size of the binary in bytes, as reported by the server.
    pub file_size: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "time::deserialize_lenient")]
    pub created_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

impl FirmwareVersion {
    /// Size in kilobytes with two decimals, e.g. `"12.50 KB"`.
    #[must_use]
    pub fn size_display(&self) -> String {
        format_kilobytes(self.file_size)
    }
}

/// Format a byte count as kilobytes with two decimals.
#[must_use]
pub fn format_kilobytes(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let kb = bytes as f64 / 1024.0;
    format!("{kb:.2} KB")
}

/// Raw state of the firmware upload form.
///
/// `F` is the platform's file handle (a browser `File` in the dashboard,
/// plain bytes in tests).
#[derive(Debug, Clone)]
pub struct FirmwareUploadForm<F> {
    pub device_type_id: Option<DeviceTypeId>,
    pub version: String,
    pub description: String,
    pub file: Option<F>,
}

impl<F> Default for FirmwareUploadForm<F> {
    fn default() -> Self {
        Self {
            device_type_id: None,
            version: String::new(),
            description: String::new(),
            file: None,
        }
    }
}

impl<F> FirmwareUploadForm<F> {
    /// Check presence of file, version and device type and produce the
    /// multipart payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first missing field.
    pub fn validate(self) -> Result<FirmwareUpload<F>, ValidationError> {
        let file = self
            .file
            .ok_or(ValidationError::MissingField("Firmware file"))?;
        let version = self.version.trim().to_string();
        if version.is_empty() {
            return Err(ValidationError::MissingField("Version"));
        }
        let device_type_id = self
            .device_type_id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingField("Device type"))?;
        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());
        Ok(FirmwareUpload {
            device_type_id,
            version,
            description,
            file,
        })
    }
}

/// Validated multipart payload for `POST /firmware/upload`.
#[derive(Debug, Clone)]
pub struct FirmwareUpload<F> {
    pub device_type_id: DeviceTypeId,
    pub version: String,
    /// Omitted from the multipart body when `None`.
    pub description: Option<String>,
    pub file: F,
}

/// Response of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub id: FirmwareId,
    pub version: String,
    #[serde(default)]
    pub size: u64,
}

/// Response of `GET /firmware/download/{firmware_id}`: the binary travels
/// base64-encoded inside JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirmwareDownload {
    pub id: FirmwareId,
    pub version: String,
    pub file_data: String,
    #[serde(default)]
    pub file_size: u64,
}

impl FirmwareDownload {
    /// Decode the payload into a file ready to be saved.
    ///
    /// # Errors
    ///
    /// Fails when `file_data` is not valid base64.
    pub fn into_binary(self) -> Result<FirmwareBinary, base64::DecodeError> {
        let bytes = BASE64.decode(self.file_data.trim())?;
        Ok(FirmwareBinary {
            file_name: format!("firmware-{}.bin", self.version),
            bytes,
        })
    }
}

/// A decoded firmware binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareBinary {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
