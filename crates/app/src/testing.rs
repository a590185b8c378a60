//! In-memory port fakes shared by the service tests.

use std::cell::RefCell;

use devicehub_domain::connection::ConnectionState;
use devicehub_domain::device::{Device, DeviceStatus, NewDevice};
use devicehub_domain::device_type::{DeviceType, NewDeviceType};
use devicehub_domain::firmware::{
    FirmwareDownload, FirmwareUpload, FirmwareVersion, UploadReceipt,
};
use devicehub_domain::id::{DeviceId, DeviceTypeId, FirmwareId};
use devicehub_domain::pin::PinCommand;
use devicehub_domain::sensor::SensorReading;
use devicehub_domain::session::{AuthRequest, Session};

use crate::ports::{
    ApiError, DashboardStore, DeviceHubApi, FirmwareStore, Notice, NoticeLevel, Notifier,
    OtaReceipt,
};

/// Every call the fake API received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Authenticate(AuthRequest),
    ListDevices,
    CreateDevice(NewDevice),
    DeleteDevice(DeviceId),
    ListDeviceTypes,
    CreateDeviceType(NewDeviceType),
    ListFirmware(DeviceTypeId),
    UploadFirmware {
        device_type_id: DeviceTypeId,
        version: String,
        description: Option<String>,
    },
    DownloadFirmware(FirmwareId),
    PushFirmware(DeviceId, FirmwareId),
    ControlPin(PinCommand),
    SensorHistory(DeviceId, usize),
}

/// Scriptable [`DeviceHubApi`] that records its calls.
pub struct FakeApi {
    pub session: RefCell<Result<Session, ApiError>>,
    pub devices: RefCell<Result<Vec<Device>, ApiError>>,
    pub device_types: RefCell<Result<Vec<DeviceType>, ApiError>>,
    pub firmware: RefCell<Result<Vec<FirmwareVersion>, ApiError>>,
    pub readings: RefCell<Result<Vec<SensorReading>, ApiError>>,
    pub download: RefCell<Result<FirmwareDownload, ApiError>>,
    /// When set, every mutating call fails with this error.
    pub mutation_error: RefCell<Option<ApiError>>,
    pub calls: RefCell<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            session: RefCell::new(Err(ApiError::Transport("no session scripted".to_string()))),
            devices: RefCell::new(Ok(Vec::new())),
            device_types: RefCell::new(Ok(Vec::new())),
            firmware: RefCell::new(Ok(Vec::new())),
            readings: RefCell::new(Ok(Vec::new())),
            download: RefCell::new(Ok(FirmwareDownload {
                id: FirmwareId::new("f1"),
                version: "1.0.1".to_string(),
                file_data: "3q0=".to_string(),
                file_size: 2,
            })),
            mutation_error: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn mutation<T>(&self, ok: T) -> Result<T, ApiError> {
        match self.mutation_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(ok),
        }
    }
}

impl DeviceHubApi for FakeApi {
    type File = Vec<u8>;

    async fn authenticate(&self, request: &AuthRequest) -> Result<Session, ApiError> {
        self.record(Call::Authenticate(request.clone()));
        self.session.borrow().clone()
    }

    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        self.record(Call::ListDevices);
        self.devices.borrow().clone()
    }

    async fn create_device(&self, device: &NewDevice) -> Result<Device, ApiError> {
        self.record(Call::CreateDevice(device.clone()));
        self.mutation(sample_device("new", device.device_type_id.as_str(), DeviceStatus::Offline))
    }

    async fn delete_device(&self, id: &DeviceId) -> Result<(), ApiError> {
        self.record(Call::DeleteDevice(id.clone()));
        self.mutation(())
    }

    async fn list_device_types(&self) -> Result<Vec<DeviceType>, ApiError> {
        self.record(Call::ListDeviceTypes);
        self.device_types.borrow().clone()
    }

    async fn create_device_type(
        &self,
        device_type: &NewDeviceType,
    ) -> Result<DeviceType, ApiError> {
        self.record(Call::CreateDeviceType(device_type.clone()));
        self.mutation(sample_device_type("new", &device_type.name))
    }

    async fn list_firmware(
        &self,
        device_type_id: &DeviceTypeId,
    ) -> Result<Vec<FirmwareVersion>, ApiError> {
        self.record(Call::ListFirmware(device_type_id.clone()));
        self.firmware.borrow().clone()
    }

    async fn upload_firmware(
        &self,
        upload: FirmwareUpload<Vec<u8>>,
    ) -> Result<UploadReceipt, ApiError> {
        self.record(Call::UploadFirmware {
            device_type_id: upload.device_type_id.clone(),
            version: upload.version.clone(),
            description: upload.description.clone(),
        });
        self.mutation(UploadReceipt {
            id: FirmwareId::new("fw-new"),
            version: upload.version,
            size: upload.file.len() as u64,
        })
    }

    async fn download_firmware(
        &self,
        firmware_id: &FirmwareId,
    ) -> Result<FirmwareDownload, ApiError> {
        self.record(Call::DownloadFirmware(firmware_id.clone()));
        self.download.borrow().clone()
    }

    async fn push_firmware(
        &self,
        device_id: &DeviceId,
        firmware_id: &FirmwareId,
    ) -> Result<OtaReceipt, ApiError> {
        self.record(Call::PushFirmware(device_id.clone(), firmware_id.clone()));
        self.mutation(OtaReceipt {
            message: "OTA update triggered".to_string(),
            version: Some("1.0.1".to_string()),
        })
    }

    async fn control_pin(&self, command: &PinCommand) -> Result<(), ApiError> {
        self.record(Call::ControlPin(command.clone()));
        self.mutation(())
    }

    async fn sensor_history(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<SensorReading>, ApiError> {
        self.record(Call::SensorHistory(device_id.clone(), limit));
        self.readings.borrow().clone()
    }
}

/// [`Notifier`] that keeps every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices.borrow().iter().map(|n| n.level).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// `RefCell`-backed view state.
#[derive(Default)]
pub struct MemoryStore {
    pub devices: RefCell<Vec<Device>>,
    pub device_types: RefCell<Vec<DeviceType>>,
    pub connection: RefCell<Vec<ConnectionState>>,
    pub versions: RefCell<Option<(DeviceTypeId, Vec<FirmwareVersion>)>>,
}

impl DashboardStore for MemoryStore {
    fn set_devices(&self, devices: Vec<Device>) {
        *self.devices.borrow_mut() = devices;
    }

    fn update_devices<R>(&self, f: impl FnOnce(&mut Vec<Device>) -> R) -> Option<R> {
        Some(f(&mut self.devices.borrow_mut()))
    }

    fn set_device_types(&self, device_types: Vec<DeviceType>) {
        *self.device_types.borrow_mut() = device_types;
    }

    fn set_connection(&self, state: ConnectionState) {
        self.connection.borrow_mut().push(state);
    }
}

impl FirmwareStore for MemoryStore {
    fn set_versions(&self, device_type_id: &DeviceTypeId, versions: Vec<FirmwareVersion>) {
        *self.versions.borrow_mut() = Some((device_type_id.clone(), versions));
    }
}

pub fn sample_device(id: &str, device_type_id: &str, status: DeviceStatus) -> Device {
    Device {
        id: DeviceId::new(id),
        name: format!("device {id}"),
        device_type_id: DeviceTypeId::new(device_type_id),
        status,
        firmware_version: Some("1.0.0".to_string()),
        auth_token: format!("token-{id}"),
        last_seen: None,
        ip_address: None,
        wifi_ssid: None,
        created_at: None,
    }
}

pub fn sample_device_type(id: &str, name: &str) -> DeviceType {
    DeviceType {
        id: DeviceTypeId::new(id),
        name: name.to_string(),
        description: None,
        pins_config: Vec::new(),
        created_at: None,
    }
}

pub fn sample_firmware(id: &str, device_type_id: &str, version: &str) -> FirmwareVersion {
    FirmwareVersion {
        id: FirmwareId::new(id),
        device_type_id: DeviceTypeId::new(device_type_id),
        version: version.to_string(),
        description: None,
        file_size: 4096,
        is_active: true,
        created_at: None,
    }
}
