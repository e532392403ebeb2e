use crate::entry::{self, CacheEntry};
use crate::{MusicService, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sonic_cache::ScopedCacheStore;
use sonic_common::models::{
    Album, Genre, Indexes, MusicDirectory, MusicFolder, Playlist, SearchCriteria, SearchResult,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// [CachedMusicService] decorates another service with the scoped cache store.
///
/// Library reads are answered from the store while the entry is younger than
/// the configured ttl, and every successful answer of the inner service is
/// written back, so the offline service sees what was browsed online.
/// When the inner service cannot be reached, a stale entry is returned instead.
pub struct CachedMusicService<T>
where
    T: MusicService,
{
    inner: T,
    store: Arc<ScopedCacheStore>,
    ttl: Duration,
}

impl<T> CachedMusicService<T>
where
    T: MusicService,
{
    pub fn new(inner: T, store: Arc<ScopedCacheStore>) -> Self {
        Self::with_ttl(inner, store, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: T, store: Arc<ScopedCacheStore>, ttl: Duration) -> Self {
        Self { inner, store, ttl }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn store(&self) -> &ScopedCacheStore {
        &self.store
    }

    async fn read_through<V>(
        &self,
        key: &str,
        refresh: bool,
        on_miss: impl Future<Output = Result<V>> + Send,
    ) -> Result<V>
    where
        V: Serialize + DeserializeOwned + Send,
    {
        let cached = match self.store.load::<CacheEntry<V>>(key) {
            Some(entry) if !refresh && entry.is_fresh(self.ttl) => return Ok(entry.value),
            cached => cached,
        };

        match on_miss.await {
            Ok(value) => {
                self.persist(key, &value);
                Ok(value)
            }
            Err(e) if e.is_transient() => match cached {
                Some(entry) => {
                    log::warn!("Serving stale {} from cache: {}", key, e);
                    Ok(entry.value)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    fn persist<V>(&self, key: &str, value: &V)
    where
        V: Serialize,
    {
        // a failed write only costs a later cache miss
        if let Err(e) = self.store.store(key, &CacheEntry::new(value)) {
            log::warn!("Failed to cache {}: {}", key, e);
        }
    }
}

#[async_trait]
impl<T> MusicService for CachedMusicService<T>
where
    T: MusicService,
{
    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    async fn is_license_valid(&self) -> Result<bool> {
        self.inner.is_license_valid().await
    }

    async fn music_folders(&self, refresh: bool) -> Result<Vec<MusicFolder>> {
        self.read_through(
            entry::MUSIC_FOLDERS,
            refresh,
            self.inner.music_folders(refresh),
        )
        .await
    }

    async fn indexes(&self, music_folder_id: Option<&str>, refresh: bool) -> Result<Indexes> {
        self.read_through(
            &entry::indexes(music_folder_id),
            refresh,
            self.inner.indexes(music_folder_id, refresh),
        )
        .await
    }

    async fn music_directory(&self, id: &str, refresh: bool) -> Result<MusicDirectory> {
        self.read_through(
            &entry::directory(id),
            refresh,
            self.inner.music_directory(id, refresh),
        )
        .await
    }

    async fn album(&self, id: &str, refresh: bool) -> Result<Album> {
        self.read_through(&entry::album(id), refresh, self.inner.album(id, refresh))
            .await
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        self.inner.search(criteria).await
    }

    async fn playlists(&self, refresh: bool) -> Result<Vec<Playlist>> {
        self.read_through(entry::PLAYLISTS, refresh, self.inner.playlists(refresh))
            .await
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        // playlists change often, always ask the server first
        self.read_through(&entry::playlist(id), true, self.inner.playlist(id))
            .await
    }

    async fn genres(&self, refresh: bool) -> Result<Vec<Genre>> {
        self.read_through(entry::GENRES, refresh, self.inner.genres(refresh))
            .await
    }

    fn stream_url(&self, id: &str, max_bit_rate: Option<u32>) -> Result<String> {
        self.inner.stream_url(id, max_bit_rate)
    }

    fn cover_art_url(&self, id: &str, size: Option<u32>) -> Result<String> {
        self.inner.cover_art_url(id, size)
    }
}
