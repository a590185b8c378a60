//! REST API port: every call the dashboard makes to the backend.
//!
//! Paths are relative to the `/api` base. All calls except authentication
//! are expected to carry the session token; that is the adapter's concern.

use std::future::Future;

use devicehub_domain::device::{Device, NewDevice};
use devicehub_domain::device_type::{DeviceType, NewDeviceType};
use devicehub_domain::firmware::{
    FirmwareDownload, FirmwareUpload, FirmwareVersion, UploadReceipt,
};
use devicehub_domain::id::{DeviceId, DeviceTypeId, FirmwareId};
use devicehub_domain::pin::PinCommand;
use devicehub_domain::sensor::SensorReading;
use devicehub_domain::session::{AuthRequest, Session};
use serde::Deserialize;

/// Error returned by API calls. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a usable response (network, decoding, …).
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Build an HTTP error from a status and an optional server-provided
    /// detail, falling back to `HTTP <status>`.
    #[must_use]
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self::Http {
            status,
            message: detail.unwrap_or_else(|| format!("HTTP {status}")),
        }
    }
}

/// Response of `POST /firmware/ota/{device_id}/{firmware_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OtaReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// The backend REST API.
pub trait DeviceHubApi {
    /// Platform file handle carried by firmware uploads.
    type File;

    /// `POST /auth/login` or `/auth/register`, depending on the request.
    fn authenticate(
        &self,
        request: &AuthRequest,
    ) -> impl Future<Output = Result<Session, ApiError>>;

    /// `GET /devices`.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, ApiError>>;

    /// `POST /devices`.
    fn create_device(&self, device: &NewDevice) -> impl Future<Output = Result<Device, ApiError>>;

    /// `DELETE /devices/{id}`.
    fn delete_device(&self, id: &DeviceId) -> impl Future<Output = Result<(), ApiError>>;

    /// `GET /device-types`.
    fn list_device_types(&self) -> impl Future<Output = Result<Vec<DeviceType>, ApiError>>;

    /// `POST /device-types`.
    fn create_device_type(
        &self,
        device_type: &NewDeviceType,
    ) -> impl Future<Output = Result<DeviceType, ApiError>>;

    /// `GET /firmware/{device_type_id}`.
    fn list_firmware(
        &self,
        device_type_id: &DeviceTypeId,
    ) -> impl Future<Output = Result<Vec<FirmwareVersion>, ApiError>>;

    /// `POST /firmware/upload` (multipart).
    fn upload_firmware(
        &self,
        upload: FirmwareUpload<Self::File>,
    ) -> impl Future<Output = Result<UploadReceipt, ApiError>>;

    /// `GET /firmware/download/{firmware_id}`.
    fn download_firmware(
        &self,
        firmware_id: &FirmwareId,
    ) -> impl Future<Output = Result<FirmwareDownload, ApiError>>;

    /// `POST /firmware/ota/{device_id}/{firmware_id}`.
    fn push_firmware(
        &self,
        device_id: &DeviceId,
        firmware_id: &FirmwareId,
    ) -> impl Future<Output = Result<OtaReceipt, ApiError>>;

    /// `POST /control/pin`.
    fn control_pin(&self, command: &PinCommand) -> impl Future<Output = Result<(), ApiError>>;

    /// `GET /sensor-data/{device_id}?limit={limit}`.
    fn sensor_history(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, ApiError>>;
}

impl<T: DeviceHubApi + ?Sized> DeviceHubApi for &T {
    type File = T::File;

    fn authenticate(
        &self,
        request: &AuthRequest,
    ) -> impl Future<Output = Result<Session, ApiError>> {
        (**self).authenticate(request)
    }

    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, ApiError>> {
        (**self).list_devices()
    }

    fn create_device(&self, device: &NewDevice) -> impl Future<Output = Result<Device, ApiError>> {
        (**self).create_device(device)
    }

    fn delete_device(&self, id: &DeviceId) -> impl Future<Output = Result<(), ApiError>> {
        (**self).delete_device(id)
    }

    fn list_device_types(&self) -> impl Future<Output = Result<Vec<DeviceType>, ApiError>> {
        (**self).list_device_types()
    }

    fn create_device_type(
        &self,
        device_type: &NewDeviceType,
    ) -> impl Future<Output = Result<DeviceType, ApiError>> {
        (**self).create_device_type(device_type)
    }

    fn list_firmware(
        &self,
        device_type_id: &DeviceTypeId,
    ) -> impl Future<Output = Result<Vec<FirmwareVersion>, ApiError>> {
        (**self).list_firmware(device_type_id)
    }

    fn upload_firmware(
        &self,
        upload: FirmwareUpload<Self::File>,
    ) -> impl Future<Output = Result<UploadReceipt, ApiError>> {
        (**self).upload_firmware(upload)
    }

    fn download_firmware(
        &self,
        firmware_id: &FirmwareId,
    ) -> impl Future<Output = Result<FirmwareDownload, ApiError>> {
        (**self).download_firmware(firmware_id)
    }

    fn push_firmware(
        &self,
        device_id: &DeviceId,
        firmware_id: &FirmwareId,
    ) -> impl Future<Output = Result<OtaReceipt, ApiError>> {
        (**self).push_firmware(device_id, firmware_id)
    }

    fn control_pin(&self, command: &PinCommand) -> impl Future<Output = Result<(), ApiError>> {
        (**self).control_pin(command)
    }

    fn sensor_history(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, ApiError>> {
        (**self).sensor_history(device_id, limit)
    }
}
