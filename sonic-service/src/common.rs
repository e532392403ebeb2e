use async_trait::async_trait;
use sonic_api::ApiError;
use sonic_cache::CacheError;
use sonic_common::models::{
    Album, Genre, Indexes, MusicDirectory, MusicFolder, Playlist, SearchCriteria, SearchResult,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// MusicService is the common trait for every source of music library data.
///
/// Methods taking a `refresh` flag may answer from a cache unless `refresh` is set.
#[async_trait]
pub trait MusicService: Send + Sync {
    /// Checks that the service is reachable and the credentials are accepted.
    async fn ping(&self) -> Result<()>;

    async fn is_license_valid(&self) -> Result<bool>;

    async fn music_folders(&self, refresh: bool) -> Result<Vec<MusicFolder>>;

    /// Artist index, optionally restricted to one music folder.
    async fn indexes(&self, music_folder_id: Option<&str>, refresh: bool) -> Result<Indexes>;

    async fn music_directory(&self, id: &str, refresh: bool) -> Result<MusicDirectory>;

    async fn album(&self, id: &str, refresh: bool) -> Result<Album>;

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult>;

    async fn playlists(&self, refresh: bool) -> Result<Vec<Playlist>>;

    async fn playlist(&self, id: &str) -> Result<Playlist>;

    async fn genres(&self, refresh: bool) -> Result<Vec<Genre>>;

    /// Url a player can stream the song `id` from.
    fn stream_url(&self, id: &str, max_bit_rate: Option<u32>) -> Result<String>;

    /// Url of the cover art `id`, scaled to `size` pixels if given.
    fn cover_art_url(&self, id: &str, size: Option<u32>) -> Result<String>;
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} is not available offline")]
    Offline(&'static str),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    ApiError(#[from] ApiError),

    #[error(transparent)]
    CacheError(#[from] CacheError),
}

impl ServiceError {
    /// Whether the error comes from the connection rather than from the server's answer.
    ///
    /// Http error statuses are answers too, even when a proxy sent them.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ServiceError::ApiError(ApiError::RequestError(e)) if !e.is_status()
        )
    }
}
