use crate::response::{self, Response};
use crate::{ApiError, ClientConfiguration, Result};
use once_cell::sync::OnceCell;
use reqwest::Url;
use sonic_common::models::{
    Album, Genre, Indexes, License, MusicDirectory, MusicFolder, Playlist, SearchCriteria,
    SearchResult,
};
use std::time::Duration;
use uuid::Uuid;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

pub struct SubsonicApiClient {
    config: ClientConfiguration,
    // built on first request, so constructing a client never fails
    client: OnceCell<reqwest::Client>,
}

impl SubsonicApiClient {
    pub fn new(config: ClientConfiguration) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    fn client(&self) -> Result<&reqwest::Client> {
        self.client
            .get_or_try_init(|| {
                reqwest::Client::builder()
                    .connect_timeout(CONNECT_TIMEOUT)
                    .timeout(READ_TIMEOUT)
                    .danger_accept_invalid_certs(self.config.allow_self_signed_certificate)
                    .build()
            })
            .map_err(ApiError::from)
    }

    fn auth_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("u", self.config.username.clone()),
            ("c", self.config.client_id.clone()),
            (
                "v",
                self.config
                    .minimal_protocol_version
                    .rest_api_version()
                    .to_string(),
            ),
            ("f", "json".to_string()),
        ];

        if self.config.use_token_auth() {
            let salt = Uuid::new_v4().simple().to_string();
            let token = md5::compute(format!("{}{}", self.config.password, salt));
            params.push(("t", format!("{token:x}")));
            params.push(("s", salt));
        } else {
            params.push(("p", format!("enc:{}", hex::encode(&self.config.password))));
        }
        params
    }

    /// Full url of a REST `method` with authentication and `params` appended.
    pub fn request_url(&self, method: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!(
            "{}/rest/{}.view",
            self.config.base_url.trim_end_matches('/'),
            method
        );
        let auth = self.auth_params();
        Url::parse_with_params(
            &base,
            auth.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .chain(params.iter().map(|(k, v)| (*k, v.as_str()))),
        )
        .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Response> {
        let url = self.request_url(method, params)?;
        if self.config.debug {
            log::debug!("GET {}/rest/{}.view {:?}", self.config.base_url, method, params);
        }

        let body = self
            .client()?
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        response::parse(&body)
    }

    pub async fn ping(&self) -> Result<()> {
        self.call("ping", &[]).await.map(|_| ())
    }

    pub async fn get_license(&self) -> Result<License> {
        self.call("getLicense", &[])
            .await?
            .license
            .ok_or(ApiError::InvalidResponse("missing license"))
    }

    pub async fn get_music_folders(&self) -> Result<Vec<MusicFolder>> {
        Ok(self
            .call("getMusicFolders", &[])
            .await?
            .music_folders
            .unwrap_or_default()
            .music_folders)
    }

    pub async fn get_indexes(&self, music_folder_id: Option<&str>) -> Result<Indexes> {
        let mut params = Vec::new();
        if let Some(id) = music_folder_id {
            params.push(("musicFolderId", id.to_string()));
        }
        Ok(self
            .call("getIndexes", &params)
            .await?
            .indexes
            .unwrap_or_default())
    }

    pub async fn get_music_directory(&self, id: &str) -> Result<MusicDirectory> {
        self.call("getMusicDirectory", &[("id", id.to_string())])
            .await?
            .directory
            .ok_or(ApiError::InvalidResponse("missing directory"))
    }

    pub async fn get_album(&self, id: &str) -> Result<Album> {
        self.call("getAlbum", &[("id", id.to_string())])
            .await?
            .album
            .ok_or(ApiError::InvalidResponse("missing album"))
    }

    pub async fn search3(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let params = [
            ("query", criteria.query.clone()),
            ("artistCount", criteria.artist_count.to_string()),
            ("albumCount", criteria.album_count.to_string()),
            ("songCount", criteria.song_count.to_string()),
        ];
        Ok(self
            .call("search3", &params)
            .await?
            .search_result3
            .unwrap_or_default())
    }

    pub async fn get_playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self
            .call("getPlaylists", &[])
            .await?
            .playlists
            .unwrap_or_default()
            .playlists)
    }

    pub async fn get_playlist(&self, id: &str) -> Result<Playlist> {
        self.call("getPlaylist", &[("id", id.to_string())])
            .await?
            .playlist
            .ok_or(ApiError::InvalidResponse("missing playlist"))
    }

    pub async fn get_genres(&self) -> Result<Vec<Genre>> {
        Ok(self
            .call("getGenres", &[])
            .await?
            .genres
            .unwrap_or_default()
            .genres)
    }

    pub fn stream_url(&self, id: &str, max_bit_rate: Option<u32>) -> Result<Url> {
        let mut params = vec![("id", id.to_string())];
        if let Some(bit_rate) = max_bit_rate {
            params.push(("maxBitRate", bit_rate.to_string()));
        }
        self.request_url("stream", &params)
    }

    pub fn cover_art_url(&self, id: &str, size: Option<u32>) -> Result<Url> {
        let mut params = vec![("id", id.to_string())];
        if let Some(size) = size {
            params.push(("size", size.to_string()));
        }
        self.request_url("getCoverArt", &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiVersion;
    use std::collections::HashMap;

    fn config(version: ApiVersion, ldap: bool) -> ClientConfiguration {
        ClientConfiguration {
            base_url: "https://music.example.com/".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            minimal_protocol_version: version,
            client_id: "sonic".to_string(),
            allow_self_signed_certificate: false,
            enable_ldap_user_support: ldap,
            debug: false,
        }
    }

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn hex_password_below_token_version() {
        let client = SubsonicApiClient::new(config(ApiVersion::V1_7_0, false));
        let url = client
            .request_url("getMusicDirectory", &[("id", "10".to_string())])
            .unwrap();

        assert_eq!(url.path(), "/rest/getMusicDirectory.view");
        let query = query(&url);
        assert_eq!(query["u"], "alice");
        assert_eq!(query["c"], "sonic");
        assert_eq!(query["v"], "1.7.0");
        assert_eq!(query["f"], "json");
        assert_eq!(query["p"], "enc:736563726574");
        assert_eq!(query["id"], "10");
        assert!(!query.contains_key("t"));
    }

    #[test]
    fn token_auth_from_1_13() {
        let client = SubsonicApiClient::new(config(ApiVersion::V1_13_0, false));
        let url = client.request_url("ping", &[]).unwrap();
        let query = query(&url);

        let salt = &query["s"];
        let expected = format!("{:x}", md5::compute(format!("secret{salt}")));
        assert_eq!(query["t"], expected);
        assert!(!query.contains_key("p"));
    }

    #[test]
    fn ldap_forces_password_auth() {
        let client = SubsonicApiClient::new(config(ApiVersion::V1_16_0, true));
        let url = client.request_url("ping", &[]).unwrap();
        let query = query(&url);
        assert_eq!(query["p"], "enc:736563726574");
        assert!(!query.contains_key("t"));
    }

    #[test]
    fn stream_url_with_bit_rate() {
        let client = SubsonicApiClient::new(config(ApiVersion::V1_7_0, false));
        let url = client.stream_url("657", Some(320)).unwrap();
        assert_eq!(url.path(), "/rest/stream.view");
        let query = query(&url);
        assert_eq!(query["id"], "657");
        assert_eq!(query["maxBitRate"], "320");
    }

    #[test]
    fn cover_art_url_with_size() {
        let client = SubsonicApiClient::new(config(ApiVersion::V1_7_0, false));
        let url = client.cover_art_url("al-11", Some(300)).unwrap();
        assert_eq!(url.path(), "/rest/getCoverArt.view");
        let query = query(&url);
        assert_eq!(query["id"], "al-11");
        assert_eq!(query["size"], "300");
        assert_eq!(query["u"], "alice");

        let url = client.cover_art_url("al-11", None).unwrap();
        assert!(!self::query(&url).contains_key("size"));
    }

    #[test]
    fn invalid_base_url() {
        let mut config = config(ApiVersion::V1_7_0, false);
        config.base_url = "not a url".to_string();
        let client = SubsonicApiClient::new(config);
        assert!(matches!(
            client.request_url("ping", &[]),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
