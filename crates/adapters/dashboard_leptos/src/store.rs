//! Signal-backed view state.

use devicehub_app::ports::{DashboardStore, FirmwareStore};
use devicehub_domain::connection::ConnectionState;
use devicehub_domain::device::Device;
use devicehub_domain::device_type::DeviceType;
use devicehub_domain::firmware::FirmwareVersion;
use devicehub_domain::id::DeviceTypeId;
use leptos::prelude::*;

/// Collections owned by the logged-in shell, shared with every page through
/// context.
#[derive(Clone, Copy)]
pub struct DashboardState {
    pub devices: RwSignal<Vec<Device>>,
    pub device_types: RwSignal<Vec<DeviceType>>,
    pub connection: RwSignal<ConnectionState>,
    /// `false` until the initial load has settled.
    pub loaded: RwSignal<bool>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            devices: RwSignal::new(Vec::new()),
            device_types: RwSignal::new(Vec::new()),
            connection: RwSignal::new(ConnectionState::Disconnected),
            loaded: RwSignal::new(false),
        }
    }
}

impl DashboardStore for DashboardState {
    fn set_devices(&self, devices: Vec<Device>) {
        self.devices.set(devices);
    }

    fn update_devices<R>(&self, f: impl FnOnce(&mut Vec<Device>) -> R) -> Option<R> {
        self.devices.try_update(f)
    }

    fn set_device_types(&self, device_types: Vec<DeviceType>) {
        self.device_types.set(device_types);
    }

    fn set_connection(&self, state: ConnectionState) {
        self.connection.set(state);
    }
}

/// State of the firmware page.
#[derive(Clone, Copy)]
pub struct FirmwareState {
    pub selected: RwSignal<Option<DeviceTypeId>>,
    pub versions: RwSignal<Vec<FirmwareVersion>>,
}

impl FirmwareState {
    pub fn new() -> Self {
        Self {
            selected: RwSignal::new(None),
            versions: RwSignal::new(Vec::new()),
        }
    }
}

impl FirmwareStore for FirmwareState {
    fn set_versions(&self, device_type_id: &DeviceTypeId, versions: Vec<FirmwareVersion>) {
        let current = self.selected.try_get_untracked().flatten();
        if current.as_ref() == Some(device_type_id) {
            self.versions.set(versions);
        } else {
            tracing::debug!(%device_type_id, "dropping versions of a deselected type");
        }
    }
}
