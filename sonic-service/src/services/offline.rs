use crate::entry::{self, CacheEntry};
use crate::{MusicService, Result, ServiceError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sonic_cache::ScopedCacheStore;
use sonic_common::models::{
    Album, Entry, Genre, Indexes, MusicDirectory, MusicFolder, Playlist, SearchCriteria,
    SearchResult,
};
use std::collections::HashSet;
use std::sync::Arc;

/// [OfflineMusicService] answers from the scoped cache store only and never touches the network.
pub struct OfflineMusicService {
    store: Arc<ScopedCacheStore>,
}

impl OfflineMusicService {
    pub fn new(store: Arc<ScopedCacheStore>) -> Self {
        Self { store }
    }

    fn load<V>(&self, key: &str) -> Option<V>
    where
        V: DeserializeOwned,
    {
        self.store.load::<CacheEntry<V>>(key).map(|e| e.value)
    }

    fn load_or_not_found<V>(&self, key: &str, kind: &'static str, id: &str) -> Result<V>
    where
        V: DeserializeOwned,
    {
        self.load(key).ok_or_else(|| ServiceError::NotFound {
            kind,
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl MusicService for OfflineMusicService {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn is_license_valid(&self) -> Result<bool> {
        Ok(true)
    }

    async fn music_folders(&self, _refresh: bool) -> Result<Vec<MusicFolder>> {
        Ok(self.load(entry::MUSIC_FOLDERS).unwrap_or_default())
    }

    async fn indexes(&self, music_folder_id: Option<&str>, _refresh: bool) -> Result<Indexes> {
        Ok(self
            .load(&entry::indexes(music_folder_id))
            .unwrap_or_default())
    }

    async fn music_directory(&self, id: &str, _refresh: bool) -> Result<MusicDirectory> {
        self.load_or_not_found(&entry::directory(id), "directory", id)
    }

    async fn album(&self, id: &str, _refresh: bool) -> Result<Album> {
        self.load_or_not_found(&entry::album(id), "album", id)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let query = criteria.query.to_lowercase();
        let matches = |s: &str| s.to_lowercase().contains(&query);

        let mut keys = self.store.keys()?;
        keys.sort();

        let mut result = SearchResult::default();
        let mut seen_artists = HashSet::new();
        let mut seen_albums = HashSet::new();
        let mut seen_songs = HashSet::new();
        let mut add_song = |result: &mut SearchResult, song: &Entry| {
            if !song.is_dir
                && result.songs.len() < criteria.song_count
                && matches(&song.title)
                && seen_songs.insert(song.id.clone())
            {
                result.songs.push(song.clone());
            }
        };

        for key in keys.iter() {
            if entry::is_indexes(key) {
                let Some(indexes) = self.load::<Indexes>(key) else {
                    continue;
                };
                for artist in indexes.artists() {
                    if result.artists.len() < criteria.artist_count
                        && matches(&artist.name)
                        && seen_artists.insert(artist.id.clone())
                    {
                        result.artists.push(artist.clone());
                    }
                }
            } else if key.starts_with(entry::ALBUM_PREFIX) {
                let Some(album) = self.load::<Album>(key) else {
                    continue;
                };
                for song in album.songs.iter() {
                    add_song(&mut result, song);
                }
                if result.albums.len() < criteria.album_count
                    && matches(&album.name)
                    && seen_albums.insert(album.id.clone())
                {
                    result.albums.push(Album {
                        songs: Vec::new(),
                        ..album
                    });
                }
            } else if key.starts_with(entry::DIRECTORY_PREFIX) {
                let Some(directory) = self.load::<MusicDirectory>(key) else {
                    continue;
                };
                for song in directory.songs() {
                    add_song(&mut result, song);
                }
            }
        }

        Ok(result)
    }

    async fn playlists(&self, _refresh: bool) -> Result<Vec<Playlist>> {
        Ok(self.load(entry::PLAYLISTS).unwrap_or_default())
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        self.load_or_not_found(&entry::playlist(id), "playlist", id)
    }

    async fn genres(&self, _refresh: bool) -> Result<Vec<Genre>> {
        Ok(self.load(entry::GENRES).unwrap_or_default())
    }

    fn stream_url(&self, _id: &str, _max_bit_rate: Option<u32>) -> Result<String> {
        Err(ServiceError::Offline("streaming"))
    }

    fn cover_art_url(&self, _id: &str, _size: Option<u32>) -> Result<String> {
        Err(ServiceError::Offline("cover art"))
    }
}
