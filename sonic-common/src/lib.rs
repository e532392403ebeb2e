pub mod constants;
pub mod models;
pub mod settings;

pub use settings::{MemorySettings, SettingValue, SettingsError, SettingsProvider, TomlSettings};
