//! Persistent cache namespaced by server identity.
//!
//! Every [ScopedCacheStore] owns one sub directory of the shared storage
//! root, so stores constructed for different servers never observe each
//! other's entries, even for identical keys.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

const EXTENSION: &str = "json";
const KEY_EXTENSION: &str = "key";
/// Longest hex encoded key used as a file name, longer keys are hashed.
const MAX_ENCODED_KEY: usize = 200;

pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ScopedCacheStore {
    /// Namespace directory: `<storage>/<server_id>`
    root: PathBuf,
    server_id: String,
    debug: bool,
}

impl ScopedCacheStore {
    /// Creates a store for `server_id` under `storage`.
    ///
    /// Nothing is touched on disk until the first [store](Self::store).
    pub fn new<P>(storage: P, server_id: &str, debug: bool) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            root: storage.as_ref().join(namespace_dir(server_id)),
            server_id: server_id.to_string(),
            debug,
        }
    }

    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// Directory holding the entries of this store.
    pub fn path(&self) -> &Path {
        &self.root
    }

    fn location_of(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{EXTENSION}", file_stem(key)))
    }

    /// Sidecar holding the original key of a hashed entry.
    fn key_location_of(&self, key: &str) -> Option<PathBuf> {
        let stem = file_stem(key);
        stem.starts_with('h')
            .then(|| self.root.join(format!("{stem}.{KEY_EXTENSION}")))
    }

    /// Returns the entry stored under `key`.
    ///
    /// Missing and unreadable entries are both reported as `None`.
    pub fn load<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let path = self.location_of(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.debug {
                    log::debug!("[{}] cache miss: {}", self.server_id, key);
                }
                return None;
            }
            Err(e) => {
                log::warn!("[{}] failed to open cache entry {}: {}", self.server_id, key, e);
                return None;
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(value) => {
                if self.debug {
                    log::debug!("[{}] cache hit: {}", self.server_id, key);
                }
                Some(value)
            }
            Err(e) => {
                log::warn!("[{}] invalid cache entry {}: {}", self.server_id, key, e);
                None
            }
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry is written to a temporary file first and renamed into place,
    /// so concurrent readers never see a partial entry.
    pub fn store<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        create_dir_all(&self.root)?;

        if let Some(key_path) = self.key_location_of(key) {
            fs::write(key_path, key)?;
        }

        let path = self.location_of(key);
        let tmp = self.root.join(format!(".{}.tmp", Uuid::new_v4().simple()));
        let result =
            write_json(&tmp, value).and_then(|_| fs::rename(&tmp, &path).map_err(CacheError::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        } else if self.debug {
            log::debug!("[{}] cache stored: {}", self.server_id, key);
        }
        result
    }

    /// Removes the entry stored under `key`, returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let removed = remove_file(&self.location_of(key))?;
        if let Some(key_path) = self.key_location_of(key) {
            remove_file(&key_path)?;
        }
        Ok(removed)
    }

    /// Keys of all entries in this store, in no particular order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let key = if let Some(encoded) = stem.strip_prefix('e') {
                hex::decode(encoded)
                    .ok()
                    .and_then(|s| String::from_utf8(s).ok())
            } else if stem.starts_with('h') {
                fs::read_to_string(path.with_extension(KEY_EXTENSION)).ok()
            } else {
                None
            };
            if let Some(key) = key {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    /// Removes every entry of this store. Other namespaces are untouched.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => {
                log::info!("[{}] cache cleared", self.server_id);
                Ok(())
            }
        }
    }
}

/// `e<hex key>` for short keys, `h<sha256 of key>` for keys too long for a file name.
///
/// The prefix keeps the empty key addressable.
fn file_stem(key: &str) -> String {
    let encoded = hex::encode(key);
    if encoded.len() <= MAX_ENCODED_KEY {
        format!("e{encoded}")
    } else {
        format!("h{}", hex::encode(Sha256::digest(key.as_bytes())))
    }
}

/// Server ids are usually decimal hashes; anything else that could escape
/// the storage root is hex encoded behind an `x`, which plain ids never start with.
fn namespace_dir(server_id: &str) -> String {
    let plain = !server_id.is_empty()
        && !server_id.starts_with('x')
        && server_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if plain {
        server_id.to_string()
    } else {
        format!("x{}", hex::encode(server_id))
    }
}

fn write_json<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    match fs::create_dir_all(path) {
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        r => r,
    }
}
