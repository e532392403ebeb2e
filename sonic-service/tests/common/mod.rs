#![allow(dead_code)]

use async_trait::async_trait;
use sonic_common::models::{
    Album, Genre, Indexes, MusicDirectory, MusicFolder, Playlist, SearchCriteria, SearchResult,
};
use sonic_service::{MusicService, Result, ServiceError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory service counting how often it was asked.
#[derive(Clone, Default)]
pub struct FakeService {
    pub name: &'static str,
    pub calls: Arc<AtomicUsize>,
    pub fail: Arc<AtomicBool>,
}

impl FakeService {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn hit(&self, kind: &'static str, id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            Err(ServiceError::NotFound {
                kind,
                id: id.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MusicService for FakeService {
    async fn ping(&self) -> Result<()> {
        self.hit("ping", "")
    }

    async fn is_license_valid(&self) -> Result<bool> {
        self.hit("license", "").map(|_| true)
    }

    async fn music_folders(&self, _refresh: bool) -> Result<Vec<MusicFolder>> {
        self.hit("music folders", "")?;
        Ok(vec![MusicFolder {
            id: self.calls().to_string(),
            name: self.name.to_string(),
        }])
    }

    async fn indexes(&self, music_folder_id: Option<&str>, _refresh: bool) -> Result<Indexes> {
        self.hit("indexes", music_folder_id.unwrap_or_default())?;
        Ok(Indexes {
            last_modified: self.calls() as i64,
            ..Default::default()
        })
    }

    async fn music_directory(&self, id: &str, _refresh: bool) -> Result<MusicDirectory> {
        self.hit("directory", id)?;
        Ok(MusicDirectory {
            id: id.to_string(),
            name: format!("{} {}", self.name, self.calls()),
            ..Default::default()
        })
    }

    async fn album(&self, id: &str, _refresh: bool) -> Result<Album> {
        self.hit("album", id)?;
        Ok(Album {
            id: id.to_string(),
            name: self.name.to_string(),
            ..Default::default()
        })
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        self.hit("search", &criteria.query)?;
        Ok(SearchResult::default())
    }

    async fn playlists(&self, _refresh: bool) -> Result<Vec<Playlist>> {
        self.hit("playlists", "")?;
        Ok(Vec::new())
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        self.hit("playlist", id)?;
        Ok(Playlist {
            id: id.to_string(),
            name: format!("{} {}", self.name, self.calls()),
            ..Default::default()
        })
    }

    async fn genres(&self, _refresh: bool) -> Result<Vec<Genre>> {
        self.hit("genres", "")?;
        Ok(Vec::new())
    }

    fn stream_url(&self, id: &str, _max_bit_rate: Option<u32>) -> Result<String> {
        Ok(format!("fake://{}/{}", self.name, id))
    }

    fn cover_art_url(&self, id: &str, size: Option<u32>) -> Result<String> {
        Ok(format!("fake://{}/cover/{}?size={:?}", self.name, id, size))
    }
}
