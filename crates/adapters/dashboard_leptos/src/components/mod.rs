mod add_device_form;
mod add_device_type_form;
mod connection_badge;
mod device_card;
mod loading;
mod nav;
mod stat_card;
mod toast;

pub use add_device_form::AddDeviceForm;
pub use add_device_type_form::AddDeviceTypeForm;
pub use connection_badge::ConnectionBadge;
pub use device_card::DeviceCard;
pub use loading::Loading;
pub use nav::Nav;
pub use stat_card::StatCard;
pub use toast::{ToastContainer, ToastProvider, use_toasts};
