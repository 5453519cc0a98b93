pub mod convert;
pub mod document;
pub mod error;
pub mod mapper;

pub use convert::{ConverterRegistry, SettingValue};
pub use document::{SettingEntry, SettingsDocument, default_settings_path};
pub use error::SettingsError;
pub use mapper::{FieldHandle, SettingsMapper};
