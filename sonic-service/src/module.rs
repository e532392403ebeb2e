//! Composition of the music services for the currently selected server.
//!
//! Everything here only reads settings and wires objects together: no
//! network or disk access happens until a service is actually used, so
//! composition cannot fail.

use crate::services::{CachedMusicService, OfflineMusicService, RestMusicService};
use crate::MusicService;
use sonic_api::{ApiVersion, ClientConfiguration, SubsonicApiClient};
use sonic_cache::ScopedCacheStore;
use sonic_common::constants::{
    instance_key, PREFERENCES_KEY_ALLOW_SELF_SIGNED_CERTIFICATE, PREFERENCES_KEY_LDAP_SUPPORT,
    PREFERENCES_KEY_PASSWORD, PREFERENCES_KEY_SERVER_INSTANCE, PREFERENCES_KEY_SERVER_URL,
    PREFERENCES_KEY_USERNAME, REST_CLIENT_ID, REST_PROTOCOL_VERSION,
};
use sonic_common::SettingsProvider;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_SERVER_INSTANCE: u32 = 1;
/// Identity shared by every instance without a configured url.
pub const UNKNOWN_SERVER_ID: &str = "not-exists";
pub const PLACEHOLDER_BASE_URL: &str = "http://localhost";

/// Stable identity of a configured server, used to namespace cached data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerId(String);

impl ServerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_SERVER_ID
    }
}

impl AsRef<str> for ServerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ServerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the selected server instance, `1` if unset or out of range.
pub fn server_instance<S>(settings: &S) -> u32
where
    S: SettingsProvider + ?Sized,
{
    let instance = settings.get_int(
        PREFERENCES_KEY_SERVER_INSTANCE,
        DEFAULT_SERVER_INSTANCE.into(),
    );
    u32::try_from(instance)
        .ok()
        .filter(|i| *i >= 1)
        .unwrap_or(DEFAULT_SERVER_INSTANCE)
}

pub fn resolve_server_identity<S>(settings: &S, instance: u32) -> ServerId
where
    S: SettingsProvider + ?Sized,
{
    match settings.get_string(&instance_key(PREFERENCES_KEY_SERVER_URL, instance)) {
        Some(url) => {
            let hash = string_hash(&format!("{url}{instance}"));
            ServerId(hash.unsigned_abs().to_string())
        }
        None => ServerId(UNKNOWN_SERVER_ID.to_string()),
    }
}

/// 32-bit polynomial hash over utf-16 code units.
///
/// The result must stay identical across releases and platforms.
fn string_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c.into()))
}

/// Builds the client configuration of `instance`.
///
/// Missing url, username or password is not an error: a placeholder pointing
/// to `http://localhost` with empty credentials is returned instead, and
/// requests fail once the client is used.
pub fn build_client_configuration<S>(
    settings: &S,
    instance: u32,
    debug: bool,
) -> ClientConfiguration
where
    S: SettingsProvider + ?Sized,
{
    let server_url = settings.get_string(&instance_key(PREFERENCES_KEY_SERVER_URL, instance));
    let username = settings.get_string(&instance_key(PREFERENCES_KEY_USERNAME, instance));
    let password = settings.get_string(&instance_key(PREFERENCES_KEY_PASSWORD, instance));
    let allow_self_signed_certificate = settings.get_bool(
        &instance_key(PREFERENCES_KEY_ALLOW_SELF_SIGNED_CERTIFICATE, instance),
        false,
    );
    let enable_ldap_user_support =
        settings.get_bool(&instance_key(PREFERENCES_KEY_LDAP_SUPPORT, instance), false);

    let minimal_protocol_version = ApiVersion::from_api_version(REST_PROTOCOL_VERSION)
        .unwrap_or_else(|e| {
            log::warn!("{}, falling back to {}", e, ApiVersion::V1_1_0);
            ApiVersion::V1_1_0
        });

    let (base_url, username, password) = match (server_url, username, password) {
        (Some(url), Some(username), Some(password)) => (url, username, password),
        _ => {
            log::info!(
                "Server credentials are not available for instance {}",
                instance
            );
            (PLACEHOLDER_BASE_URL.to_string(), String::new(), String::new())
        }
    };

    ClientConfiguration {
        base_url,
        username,
        password,
        minimal_protocol_version,
        client_id: REST_CLIENT_ID.to_string(),
        allow_self_signed_certificate,
        enable_ldap_user_support,
        debug,
    }
}

/// Online binding: the REST service wrapped by the caching decorator.
pub fn online_music_service(
    client: SubsonicApiClient,
    store: Arc<ScopedCacheStore>,
) -> Arc<dyn MusicService> {
    Arc::new(CachedMusicService::new(RestMusicService::new(client), store))
}

/// Offline binding: answers from `store` only.
pub fn offline_music_service(store: Arc<ScopedCacheStore>) -> Arc<dyn MusicService> {
    Arc::new(OfflineMusicService::new(store))
}

/// Composition root of the music services.
///
/// Settings are read again on every [compose](Self::compose), so switching
/// the server instance takes effect on the next composition.
pub struct MusicServiceModule {
    settings: Arc<dyn SettingsProvider>,
    storage: PathBuf,
    debug: bool,
}

impl MusicServiceModule {
    pub fn new<P>(settings: Arc<dyn SettingsProvider>, storage: P, debug: bool) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            settings,
            storage: storage.into(),
            debug,
        }
    }

    pub fn storage(&self) -> &Path {
        &self.storage
    }

    /// Client configuration of the currently selected instance.
    pub fn client_configuration(&self) -> ClientConfiguration {
        let settings = self.settings.as_ref();
        build_client_configuration(settings, server_instance(settings), self.debug)
    }

    pub fn compose(&self) -> MusicServices {
        let settings = self.settings.as_ref();
        let instance = server_instance(settings);

        let server_id = resolve_server_identity(settings, instance);
        let store = Arc::new(ScopedCacheStore::new(
            &self.storage,
            server_id.as_str(),
            self.debug,
        ));

        let config = build_client_configuration(settings, instance, self.debug);
        let client = SubsonicApiClient::new(config);

        log::debug!(
            "Composed music services for instance {} ({})",
            instance,
            server_id
        );
        MusicServices {
            instance,
            server_id,
            online: online_music_service(client, store.clone()),
            offline: offline_music_service(store.clone()),
            store,
        }
    }
}

/// The two bindings of one composition, sharing the same cache store.
pub struct MusicServices {
    instance: u32,
    server_id: ServerId,
    store: Arc<ScopedCacheStore>,
    online: Arc<dyn MusicService>,
    offline: Arc<dyn MusicService>,
}

impl MusicServices {
    pub fn instance(&self) -> u32 {
        self.instance
    }

    pub fn server_id(&self) -> &ServerId {
        &self.server_id
    }

    pub fn store(&self) -> &Arc<ScopedCacheStore> {
        &self.store
    }

    pub fn online(&self) -> Arc<dyn MusicService> {
        self.online.clone()
    }

    pub fn offline(&self) -> Arc<dyn MusicService> {
        self.offline.clone()
    }

    /// Picks the binding matching the caller's connectivity state.
    pub fn select(&self, offline: bool) -> Arc<dyn MusicService> {
        if offline {
            self.offline()
        } else {
            self.online()
        }
    }
}
