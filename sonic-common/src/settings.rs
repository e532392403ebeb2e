use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Read access to the persisted key-value settings of the client.
///
/// Implementations must tolerate concurrent writers: every getter reads the
/// current state, nothing is cached on the caller's side.
pub trait SettingsProvider: Send + Sync {
    /// Returns the string stored under `key`, or `None` if it is absent or not a string.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Returns the boolean stored under `key`, or `default`.
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Returns the integer stored under `key`, or `default`.
    fn get_int(&self, key: &str, default: i64) -> i64;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Bool(bool),
    Int(i64),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Int(value.into())
    }
}

/// In-memory settings, writable from any thread.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<SettingValue>,
    {
        self.values.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<SettingValue> {
        self.values.write().remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MemorySettings
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: RwLock::new(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl SettingsProvider for MemorySettings {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.read().get(key) {
            Some(SettingValue::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.read().get(key) {
            Some(SettingValue::Bool(value)) => *value,
            _ => default,
        }
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.read().get(key) {
            Some(SettingValue::Int(value)) => *value,
            _ => default,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings toml {path:?}: {err}")]
    TomlParseError {
        path: PathBuf,
        err: toml::de::Error,
    },

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Settings backed by a flat toml file:
///
/// ```toml
/// serverId = 1
/// serverUrl1 = "https://music.example.com"
/// username1 = "alice"
/// password1 = "secret"
/// allowSSCertificate1 = false
/// ```
///
/// The file is read on [TomlSettings::open] and on every [TomlSettings::reload].
/// A missing file is treated as empty settings.
#[derive(Debug)]
pub struct TomlSettings {
    path: PathBuf,
    table: RwLock<toml::Table>,
}

impl TomlSettings {
    pub fn open<P>(path: P) -> Result<Self, SettingsError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let table = read_table(&path)?;
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Path of the underlying settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reload(&self) -> Result<(), SettingsError> {
        let table = read_table(&self.path)?;
        *self.table.write() = table;
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<toml::Table, SettingsError> {
    let input = match fs::read_to_string(path) {
        Ok(input) => input,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Settings file {:?} does not exist, using empty settings", path);
            return Ok(toml::Table::new());
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&input).map_err(|err| SettingsError::TomlParseError {
        path: path.to_path_buf(),
        err,
    })
}

impl SettingsProvider for TomlSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.table
            .read()
            .get(key)
            .and_then(|v| v.as_str())
            .map(ToString::to_string)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.table
            .read()
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.table
            .read()
            .get(key)
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    }
}
