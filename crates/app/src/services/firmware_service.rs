//! Firmware service: version listing, upload and OTA push.

use devicehub_domain::firmware::{FirmwareBinary, FirmwareUploadForm};
use devicehub_domain::id::{DeviceId, DeviceTypeId, FirmwareId};

use crate::ports::{DeviceHubApi, FirmwareStore, Notifier};

/// Backs the firmware manager page.
pub struct FirmwareService<A, N, S> {
    api: A,
    notifier: N,
    store: S,
}

impl<A: DeviceHubApi, N: Notifier, S: FirmwareStore> FirmwareService<A, N, S> {
    /// Create a new service backed by the given ports.
    pub fn new(api: A, notifier: N, store: S) -> Self {
        Self {
            api,
            notifier,
            store,
        }
    }

    /// Fetch the versions of `device_type_id` into the store.
    ///
    /// Called on every selection change; results are never cached.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, device_type_id: &DeviceTypeId) -> bool {
        match self.api.list_firmware(device_type_id).await {
            Ok(versions) => {
                tracing::debug!(count = versions.len(), "firmware versions loaded");
                self.store.set_versions(device_type_id, versions);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load firmware versions");
                self.notifier
                    .error(format!("Failed to load firmware versions: {err}"));
                false
            }
        }
    }

    /// Validate and upload a firmware binary, then refetch the version list
    /// of its device type.
    ///
    /// Returns `true` on success, for the form to clear itself.
    #[tracing::instrument(skip_all, fields(version = %form.version))]
    pub async fn upload(&self, form: FirmwareUploadForm<A::File>) -> bool {
        let upload = match form.validate() {
            Ok(upload) => upload,
            Err(err) => {
                self.notifier.error(err.to_string());
                return false;
            }
        };
        let device_type_id = upload.device_type_id.clone();

        match self.api.upload_firmware(upload).await {
            Ok(receipt) => {
                tracing::info!(firmware_id = %receipt.id, size = receipt.size, "firmware uploaded");
                self.notifier
                    .success(format!("Firmware {} uploaded", receipt.version));
                self.list(&device_type_id).await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "firmware upload failed");
                self.notifier
                    .error(format!("Failed to upload firmware: {err}"));
                false
            }
        }
    }

    /// Fetch a firmware binary for saving on the user's machine.
    #[tracing::instrument(skip(self))]
    pub async fn download(&self, firmware_id: &FirmwareId) -> Option<FirmwareBinary> {
        let download = match self.api.download_firmware(firmware_id).await {
            Ok(download) => download,
            Err(err) => {
                tracing::warn!(error = %err, "firmware download failed");
                self.notifier
                    .error(format!("Failed to download firmware: {err}"));
                return None;
            }
        };
        let version = download.version.clone();
        match download.into_binary() {
            Ok(binary) => {
                tracing::debug!(size = binary.bytes.len(), "firmware downloaded");
                Some(binary)
            }
            Err(err) => {
                tracing::warn!(error = %err, "firmware payload is not valid base64");
                self.notifier
                    .error(format!("Firmware {version} could not be decoded"));
                None
            }
        }
    }

    /// Ask the backend to push `firmware_id` to `device_id`.
    ///
    /// Completion is reported later on the live channel.
    #[tracing::instrument(skip(self))]
    pub async fn push(&self, device_id: &DeviceId, firmware_id: &FirmwareId) -> bool {
        match self.api.push_firmware(device_id, firmware_id).await {
            Ok(receipt) => {
                tracing::info!(message = %receipt.message, "ota update triggered");
                self.notifier.success(match receipt.version {
                    Some(version) => format!("OTA update to {version} started"),
                    None => "OTA update started".to_string(),
                });
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "ota push failed");
                self.notifier
                    .error(format!("Failed to trigger OTA update: {err}"));
                false
            }
        }
    }
}
