mod devices;
mod firmware;
mod login;
mod not_found;
mod settings;

pub use devices::Devices;
pub use firmware::Firmware;
pub use login::Login;
pub use not_found::NotFound;
pub use settings::Settings;
