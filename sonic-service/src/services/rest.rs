use crate::{MusicService, Result};
use async_trait::async_trait;
use sonic_api::SubsonicApiClient;
use sonic_common::models::{
    Album, Genre, Indexes, MusicDirectory, MusicFolder, Playlist, SearchCriteria, SearchResult,
};

/// [RestMusicService] talks to the configured server on every call.
pub struct RestMusicService {
    client: SubsonicApiClient,
}

impl RestMusicService {
    pub fn new(client: SubsonicApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SubsonicApiClient {
        &self.client
    }
}

#[async_trait]
impl MusicService for RestMusicService {
    async fn ping(&self) -> Result<()> {
        Ok(self.client.ping().await?)
    }

    async fn is_license_valid(&self) -> Result<bool> {
        Ok(self.client.get_license().await?.valid)
    }

    async fn music_folders(&self, _refresh: bool) -> Result<Vec<MusicFolder>> {
        Ok(self.client.get_music_folders().await?)
    }

    async fn indexes(&self, music_folder_id: Option<&str>, _refresh: bool) -> Result<Indexes> {
        Ok(self.client.get_indexes(music_folder_id).await?)
    }

    async fn music_directory(&self, id: &str, _refresh: bool) -> Result<MusicDirectory> {
        Ok(self.client.get_music_directory(id).await?)
    }

    async fn album(&self, id: &str, _refresh: bool) -> Result<Album> {
        Ok(self.client.get_album(id).await?)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        Ok(self.client.search3(criteria).await?)
    }

    async fn playlists(&self, _refresh: bool) -> Result<Vec<Playlist>> {
        Ok(self.client.get_playlists().await?)
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        Ok(self.client.get_playlist(id).await?)
    }

    async fn genres(&self, _refresh: bool) -> Result<Vec<Genre>> {
        Ok(self.client.get_genres().await?)
    }

    fn stream_url(&self, id: &str, max_bit_rate: Option<u32>) -> Result<String> {
        Ok(self.client.stream_url(id, max_bit_rate)?.to_string())
    }

    fn cover_art_url(&self, id: &str, size: Option<u32>) -> Result<String> {
        Ok(self.client.cover_art_url(id, size)?.to_string())
    }
}
