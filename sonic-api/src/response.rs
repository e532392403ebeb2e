use crate::error::SubsonicError;
use crate::{ApiError, Result};
use serde::Deserialize;
use sonic_common::models::{
    Album, Genre, Indexes, License, MusicDirectory, MusicFolder, Playlist, SearchResult,
};

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "subsonic-response")]
    response: Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Failed,
}

/// `<subsonic-response>` in its json form.
///
/// Only one of the optional payloads is present for a given endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: Status,
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub error: Option<SubsonicError>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub music_folders: Option<MusicFolders>,
    #[serde(default)]
    pub indexes: Option<Indexes>,
    #[serde(default)]
    pub directory: Option<MusicDirectory>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub search_result3: Option<SearchResult>,
    #[serde(default)]
    pub playlists: Option<Playlists>,
    #[serde(default)]
    pub playlist: Option<Playlist>,
    #[serde(default)]
    pub genres: Option<Genres>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MusicFolders {
    #[serde(default, rename = "musicFolder")]
    pub music_folders: Vec<MusicFolder>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Playlists {
    #[serde(default, rename = "playlist")]
    pub playlists: Vec<Playlist>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Genres {
    #[serde(default, rename = "genre")]
    pub genres: Vec<Genre>,
}

/// Decodes a response body, turning `status="failed"` into [ApiError::ServerError].
pub fn parse(body: &[u8]) -> Result<Response> {
    let Envelope { response } = serde_json::from_slice(body)?;
    match response.status {
        Status::Ok => Ok(response),
        Status::Failed => Err(match response.error {
            Some(error) => error.into(),
            None => ApiError::InvalidResponse("failed response without error element"),
        }),
    }
}
