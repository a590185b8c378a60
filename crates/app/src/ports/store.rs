//! View-state ports: where services write the collections they fetch.
//!
//! The dashboard adapter backs these with reactive signals; tests use plain
//! `RefCell`s.

use devicehub_domain::connection::ConnectionState;
use devicehub_domain::device::Device;
use devicehub_domain::device_type::DeviceType;
use devicehub_domain::firmware::FirmwareVersion;
use devicehub_domain::id::DeviceTypeId;

/// State owned by the dashboard controller.
pub trait DashboardStore {
    /// Replace the cached device list.
    fn set_devices(&self, devices: Vec<Device>);

    /// Mutate the cached device list in place.
    ///
    /// Returns `None` when the store no longer exists (view unmounted).
    fn update_devices<R>(&self, f: impl FnOnce(&mut Vec<Device>) -> R) -> Option<R>;

    /// Replace the cached device-type list.
    fn set_device_types(&self, device_types: Vec<DeviceType>);

    /// Record the live channel's state.
    fn set_connection(&self, state: ConnectionState);
}

/// State owned by the firmware manager.
pub trait FirmwareStore {
    /// Replace the version list shown for `device_type_id`.
    ///
    /// Implementations should drop results for a type that is no longer
    /// selected.
    fn set_versions(&self, device_type_id: &DeviceTypeId, versions: Vec<FirmwareVersion>);
}

impl<T: DashboardStore> DashboardStore for &T {
    fn set_devices(&self, devices: Vec<Device>) {
        (**self).set_devices(devices);
    }

    fn update_devices<R>(&self, f: impl FnOnce(&mut Vec<Device>) -> R) -> Option<R> {
        (**self).update_devices(f)
    }

    fn set_device_types(&self, device_types: Vec<DeviceType>) {
        (**self).set_device_types(device_types);
    }

    fn set_connection(&self, state: ConnectionState) {
        (**self).set_connection(state);
    }
}

impl<T: FirmwareStore> FirmwareStore for &T {
    fn set_versions(&self, device_type_id: &DeviceTypeId, versions: Vec<FirmwareVersion>) {
        (**self).set_versions(device_type_id, versions);
    }
}
