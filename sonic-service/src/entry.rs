//! Keys and entry layout shared by the cached and offline services.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub(crate) const MUSIC_FOLDERS: &str = "music_folders";
pub(crate) const INDEXES: &str = "indexes";
pub(crate) const DIRECTORY_PREFIX: &str = "directory/";
pub(crate) const ALBUM_PREFIX: &str = "album/";
pub(crate) const PLAYLISTS: &str = "playlists";
pub(crate) const PLAYLIST_PREFIX: &str = "playlist/";
pub(crate) const GENRES: &str = "genres";

pub(crate) fn indexes(music_folder_id: Option<&str>) -> String {
    match music_folder_id {
        Some(id) => format!("{INDEXES}/{id}"),
        None => INDEXES.to_string(),
    }
}

pub(crate) fn is_indexes(key: &str) -> bool {
    key == INDEXES || key.starts_with("indexes/")
}

pub(crate) fn directory(id: &str) -> String {
    format!("{DIRECTORY_PREFIX}{id}")
}

pub(crate) fn album(id: &str) -> String {
    format!("{ALBUM_PREFIX}{id}")
}

pub(crate) fn playlist(id: &str) -> String {
    format!("{PLAYLIST_PREFIX}{id}")
}

/// A cached value with the time it was fetched.
#[derive(Serialize, Deserialize)]
pub(crate) struct CacheEntry<V> {
    /// Seconds since unix epoch
    pub cached_at: u64,
    pub value: V,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V) -> Self {
        Self {
            cached_at: now(),
            value,
        }
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        now().saturating_sub(self.cached_at) < ttl.as_secs()
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_do_not_collide() {
        assert_eq!(indexes(None), "indexes");
        assert_eq!(indexes(Some("all")), "indexes/all");
        assert!(is_indexes("indexes"));
        assert!(is_indexes("indexes/3"));
        assert!(!is_indexes("indexes_old"));
        assert_ne!(directory("1"), album("1"));
        assert_ne!(playlist("1"), PLAYLISTS);
    }

    #[test]
    fn freshness() {
        let entry = CacheEntry::new(());
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert!(!entry.is_fresh(Duration::ZERO));

        let old = CacheEntry {
            cached_at: now() - 120,
            value: (),
        };
        assert!(!old.is_fresh(Duration::from_secs(60)));
    }
}
