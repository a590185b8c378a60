//! Pure dashboard logic over the cached device list.

use crate::device::{Device, DeviceStatus};
use crate::id::{DeviceId, DeviceTypeId};

/// Online/offline tallies, recomputed from the list on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCounts {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
}

impl DeviceCounts {
    /// Tally `devices` by status.
    #[must_use]
    pub fn of(devices: &[Device]) -> Self {
        let online = devices.iter().filter(|d| d.status.is_online()).count();
        Self {
            total: devices.len(),
            online,
            offline: devices.len() - online,
        }
    }
}

/// Set the status of the device with `id`, leaving every other device
/// untouched. Returns `false` (and changes nothing) when no device matches.
pub fn apply_status(devices: &mut [Device], id: &DeviceId, status: DeviceStatus) -> bool {
    match devices.iter_mut().find(|d| &d.id == id) {
        Some(device) => {
            device.status = status;
            true
        }
        None => false,
    }
}

/// Devices of one type, used to offer OTA targets for a firmware version.
pub fn of_type<'a>(
    devices: &'a [Device],
    device_type_id: &'a DeviceTypeId,
) -> impl Iterator<Item = &'a Device> + 'a {
    devices
        .iter()
        .filter(move |d| &d.device_type_id == device_type_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, type_id: &str, status: DeviceStatus) -> Device {
        Device {
            id: DeviceId::new(id),
            name: format!("device {id}"),
            device_type_id: DeviceTypeId::new(type_id),
            status,
            firmware_version: None,
            auth_token: String::new(),
            last_seen: None,
            ip_address: None,
            wifi_ssid: None,
            created_at: None,
        }
    }

    #[test]
    fn should_count_online_and_offline() {
        let devices = vec![
            device("a", "t", DeviceStatus::Online),
            device("b", "t", DeviceStatus::Offline),
            device("c", "t", DeviceStatus::Online),
        ];
        assert_eq!(
            DeviceCounts::of(&devices),
            DeviceCounts {
                total: 3,
                online: 2,
                offline: 1,
            }
        );
    }

    #[test]
    fn should_count_empty_list_as_zero() {
        assert_eq!(DeviceCounts::of(&[]), DeviceCounts::default());
    }

    #[test]
    fn should_update_only_matching_device() {
        let mut devices = vec![
            device("a", "t", DeviceStatus::Offline),
            device("b", "t", DeviceStatus::Offline),
        ];
        let before_b = devices[1].clone();

        assert!(apply_status(
            &mut devices,
            &DeviceId::new("a"),
            DeviceStatus::Online
        ));

        assert_eq!(devices[0].status, DeviceStatus::Online);
        assert_eq!(devices[1], before_b);
    }

    #[test]
    fn should_ignore_unknown_device() {
        let mut devices = vec![device("a", "t", DeviceStatus::Offline)];
        let before = devices.clone();

        assert!(!apply_status(
            &mut devices,
            &DeviceId::new("zzz"),
            DeviceStatus::Online
        ));
        assert_eq!(devices, before);
    }

    #[test]
    fn should_filter_devices_by_type() {
        let devices = vec![
            device("a", "esp32", DeviceStatus::Online),
            device("b", "uno", DeviceStatus::Online),
            device("c", "esp32", DeviceStatus::Offline),
        ];
        let esp32 = DeviceTypeId::new("esp32");
        let ids: Vec<_> = of_type(&devices, &esp32).map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
