//! Dashboard service: the device list, device types and live updates.

use devicehub_domain::connection::ConnectionState;
use devicehub_domain::dashboard;
use devicehub_domain::device::NewDevice;
use devicehub_domain::device_type::NewDeviceType;
use devicehub_domain::id::{DeviceId, DeviceTypeId};
use devicehub_domain::live::{LiveMessage, UpdateOutcome};

use crate::ports::{DashboardStore, DeviceHubApi, Notifier};

/// Work left to do after a live message has been applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum LiveFollowup {
    None,
    /// The device list must be fetched again.
    RefreshDevices,
}

/// Owns the dashboard's collections and keeps them in sync with the backend.
pub struct DashboardService<A, N, S> {
    api: A,
    notifier: N,
    store: S,
}

impl<A: DeviceHubApi, N: Notifier, S: DashboardStore> DashboardService<A, N, S> {
    /// Create a new service backed by the given ports.
    pub fn new(api: A, notifier: N, store: S) -> Self {
        Self {
            api,
            notifier,
            store,
        }
    }

    /// Initial load: device types, then devices.
    pub async fn load(&self) {
        self.refresh_device_types().await;
        self.refresh_devices().await;
    }

    /// Replace the cached device list with the server's.
    ///
    /// Returns `false` when the fetch failed; the failure has already been
    /// logged and shown.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_devices(&self) -> bool {
        match self.api.list_devices().await {
            Ok(devices) => {
                tracing::debug!(count = devices.len(), "devices loaded");
                self.store.set_devices(devices);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load devices");
                self.notifier.error(format!("Failed to load devices: {err}"));
                false
            }
        }
    }

    /// Replace the cached device-type list with the server's.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_device_types(&self) -> bool {
        match self.api.list_device_types().await {
            Ok(types) => {
                tracing::debug!(count = types.len(), "device types loaded");
                self.store.set_device_types(types);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load device types");
                self.notifier
                    .error(format!("Failed to load device types: {err}"));
                false
            }
        }
    }

    /// Record the live channel's state.
    pub fn set_connection(&self, state: ConnectionState) {
        self.store.set_connection(state);
    }

    /// Apply `message` to the cached state and notify.
    ///
    /// Synchronous so that the browser adapter can call it straight from the
    /// socket callback; the returned followup tells it what to fetch next.
    pub fn apply_live(&self, message: LiveMessage) -> LiveFollowup {
        match message {
            LiveMessage::DeviceStatus { device_id, status } => {
                let name = self
                    .store
                    .update_devices(|devices| {
                        if dashboard::apply_status(devices, &device_id, status) {
                            devices
                                .iter()
                                .find(|d| d.id == device_id)
                                .map(|d| d.name.clone())
                        } else {
                            None
                        }
                    })
                    .flatten();
                match name {
                    Some(name) => {
                        tracing::info!(device_id = %device_id, %status, "device status changed");
                        self.notifier.info(format!("{name} is now {status}"));
                    }
                    None => {
                        tracing::debug!(
                            device_id = %device_id,
                            "status for unknown device ignored"
                        );
                    }
                }
                LiveFollowup::None
            }
            LiveMessage::SensorData { device_id, data } => {
                tracing::debug!(device_id = %device_id, %data, "sensor data");
                LiveFollowup::None
            }
            LiveMessage::FirmwareUpdateStatus {
                device_id,
                status,
                version,
            } => {
                let version = version.unwrap_or_else(|| "unknown version".to_string());
                tracing::info!(
                    device_id = %device_id,
                    ?status,
                    %version,
                    "firmware update reported"
                );
                match status {
                    UpdateOutcome::Failed => {
                        self.notifier
                            .error(format!("Firmware update to {version} failed"));
                    }
                    UpdateOutcome::Success | UpdateOutcome::Other => {
                        self.notifier
                            .success(format!("Firmware updated to {version}"));
                    }
                }
                LiveFollowup::RefreshDevices
            }
        }
    }

    /// Apply `message` and perform its followup.
    pub async fn handle_live(&self, message: LiveMessage) {
        match self.apply_live(message) {
            LiveFollowup::RefreshDevices => {
                self.refresh_devices().await;
            }
            LiveFollowup::None => {}
        }
    }

    /// Validate and create a device, then refetch the device list.
    ///
    /// Returns `true` when the device was created, for the form to reset.
    #[tracing::instrument(skip(self))]
    pub async fn create_device(&self, name: &str, device_type_id: &DeviceTypeId) -> bool {
        let device = match NewDevice::builder()
            .name(name)
            .device_type_id(device_type_id.clone())
            .build()
        {
            Ok(device) => device,
            Err(err) => {
                self.notifier.error(err.to_string());
                return false;
            }
        };

        match self.api.create_device(&device).await {
            Ok(created) => {
                tracing::info!(device_id = %created.id, "device created");
                self.notifier
                    .success(format!("Device {} created", created.name));
                self.refresh_devices().await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create device");
                self.notifier
                    .error(format!("Failed to create device: {err}"));
                false
            }
        }
    }

    /// Delete a device, then refetch the device list.
    ///
    /// The device stays in the cached list until the refetch replaces it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: &DeviceId) -> bool {
        match self.api.delete_device(id).await {
            Ok(()) => {
                tracing::info!("device deleted");
                self.notifier.success("Device deleted");
                self.refresh_devices().await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to delete device");
                self.notifier
                    .error(format!("Failed to delete device: {err}"));
                false
            }
        }
    }

    /// Validate and create a device type, then refetch the type list.
    #[tracing::instrument(skip(self, description))]
    pub async fn create_device_type(&self, name: &str, description: &str) -> bool {
        let device_type = match NewDeviceType::from_form(name, description) {
            Ok(device_type) => device_type,
            Err(err) => {
                self.notifier.error(err.to_string());
                return false;
            }
        };

        match self.api.create_device_type(&device_type).await {
            Ok(created) => {
                tracing::info!(device_type_id = %created.id, "device type created");
                self.notifier
                    .success(format!("Device type {} created", created.name));
                self.refresh_device_types().await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create device type");
                self.notifier
                    .error(format!("Failed to create device type: {err}"));
                false
            }
        }
    }
}
