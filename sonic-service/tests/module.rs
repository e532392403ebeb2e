mod common;

use common::FakeService;
use sonic_api::ApiVersion;
use sonic_common::{MemorySettings, SettingsProvider};
use sonic_service::module::{
    build_client_configuration, resolve_server_identity, server_instance, MusicServiceModule,
    PLACEHOLDER_BASE_URL, UNKNOWN_SERVER_ID,
};
use sonic_service::services::CachedMusicService;
use sonic_service::{MusicService, Result, ServiceError};
use std::sync::Arc;

fn configured(url: &str, instance: u32) -> MemorySettings {
    let settings = MemorySettings::new();
    settings.set("serverId", instance);
    settings.set(format!("serverUrl{instance}"), url);
    settings.set(format!("username{instance}"), "alice");
    settings.set(format!("password{instance}"), "secret");
    settings
}

#[test]
fn nothing_configured() {
    let settings = MemorySettings::new();
    let instance = server_instance(&settings);
    assert_eq!(instance, 1);

    let server_id = resolve_server_identity(&settings, instance);
    assert_eq!(server_id.as_str(), UNKNOWN_SERVER_ID);
    assert!(server_id.is_unknown());

    let config = build_client_configuration(&settings, instance, false);
    assert_eq!(config.base_url, "http://localhost");
    assert_eq!(config.username, "");
    assert_eq!(config.password, "");
    assert_eq!(config.minimal_protocol_version, ApiVersion::V1_7_0);
    assert_eq!(config.client_id, "sonic");
    assert!(!config.allow_self_signed_certificate);
    assert!(!config.enable_ldap_user_support);
}

#[test]
fn fully_configured_instance() {
    let settings = configured("https://music.example.com", 1);

    let config = build_client_configuration(&settings, 1, true);
    assert_eq!(config.base_url, "https://music.example.com");
    assert_eq!(config.username, "alice");
    assert_eq!(config.password, "secret");
    assert_eq!(config.minimal_protocol_version, ApiVersion::V1_7_0);
    assert_eq!(config.client_id, "sonic");
    assert!(config.debug);

    let server_id = resolve_server_identity(&settings, 1);
    assert_eq!(server_id.as_str(), "908558580");
    assert_eq!(resolve_server_identity(&settings, 1), server_id);
    assert_eq!(build_client_configuration(&settings, 1, true), config);
}

#[test]
fn sentinel_regardless_of_instance() {
    let settings = MemorySettings::new();
    settings.set("username3", "alice");
    for instance in [1, 2, 3, 42] {
        assert_eq!(
            resolve_server_identity(&settings, instance).as_str(),
            UNKNOWN_SERVER_ID
        );
    }
}

#[test]
fn identity_depends_on_url_and_instance() {
    let a = configured("https://music.example.com", 1);
    let b = configured("https://other.example.com", 1);
    assert_ne!(
        resolve_server_identity(&a, 1),
        resolve_server_identity(&b, 1)
    );
    assert_eq!(resolve_server_identity(&b, 1).as_str(), "631178241");

    let c = configured("https://music.example.com", 2);
    assert_eq!(resolve_server_identity(&c, 2).as_str(), "908558579");
}

#[test]
fn placeholder_iff_credentials_incomplete() {
    let keys = ["serverUrl1", "username1", "password1"];
    for mask in 0..8u8 {
        let settings = MemorySettings::new();
        for (i, key) in keys.iter().enumerate() {
            if mask & (1 << i) != 0 {
                settings.set(*key, format!("value-{i}"));
            }
        }
        settings.set("allowSSCertificate1", true);
        settings.set("enableLdapSupport1", true);

        let config = build_client_configuration(&settings, 1, false);
        if mask == 0b111 {
            assert_eq!(config.base_url, "value-0");
            assert_eq!(config.username, "value-1");
            assert_eq!(config.password, "value-2");
        } else {
            assert_eq!(config.base_url, PLACEHOLDER_BASE_URL);
            assert_eq!(config.username, "");
            assert_eq!(config.password, "");
        }
        // flags are kept even for the placeholder
        assert!(config.allow_self_signed_certificate);
        assert!(config.enable_ldap_user_support);
        assert_eq!(config.minimal_protocol_version, ApiVersion::V1_7_0);
    }
}

#[test]
fn unrelated_write_keeps_identity() {
    let settings = configured("https://music.example.com", 1);
    let before = resolve_server_identity(&settings, 1);
    settings.set("theme", "dark");
    settings.set("serverUrl2", "https://other.example.com");
    assert_eq!(resolve_server_identity(&settings, 1), before);
}

#[test]
fn invalid_instance_defaults_to_one() {
    let settings = MemorySettings::new();
    for value in [0i64, -3, i64::MAX] {
        settings.set("serverId", value);
        assert_eq!(server_instance(&settings), 1);
    }
    settings.set("serverId", "2");
    assert_eq!(server_instance(&settings), 1);
    settings.set("serverId", 2i64);
    assert_eq!(server_instance(&settings), 2);
}

#[test]
fn compose_follows_instance_switch() -> Result<()> {
    let storage = tempfile::tempdir().expect("tempdir");
    let settings = Arc::new(configured("https://music.example.com", 1));
    settings.set("serverUrl2", "https://other.example.com");
    let module = MusicServiceModule::new(settings.clone(), storage.path(), false);

    let first = module.compose();
    assert_eq!(first.instance(), 1);
    assert_eq!(first.server_id().as_str(), "908558580");

    settings.set("serverId", 2u32);
    let second = module.compose();
    assert_eq!(second.instance(), 2);
    assert_eq!(second.server_id().as_str(), "631178242");
    assert_ne!(first.store().path(), second.store().path());

    // instance 2 has no credentials: still composes, on the placeholder
    let url = second.online().stream_url("657", None)?;
    assert!(url.starts_with("http://localhost/rest/stream.view"));

    Ok(())
}

#[tokio::test]
async fn compositions_for_different_servers_are_isolated() -> Result<()> {
    let storage = tempfile::tempdir().expect("tempdir");
    let a = MusicServiceModule::new(
        Arc::new(configured("https://music.example.com", 1)),
        storage.path(),
        false,
    )
    .compose();
    let b = MusicServiceModule::new(
        Arc::new(configured("https://other.example.com", 1)),
        storage.path(),
        false,
    )
    .compose();

    let browsed = CachedMusicService::new(FakeService::new("a"), a.store().clone())
        .music_folders(false)
        .await?;

    assert_eq!(a.offline().music_folders(false).await?, browsed);
    assert!(b.offline().music_folders(false).await?.is_empty());

    a.store().store("shared-key", &"a")?;
    b.store().store("shared-key", &"b")?;
    assert_eq!(a.store().load::<String>("shared-key").as_deref(), Some("a"));
    assert_eq!(b.store().load::<String>("shared-key").as_deref(), Some("b"));

    Ok(())
}

#[tokio::test]
async fn select_binding() -> Result<()> {
    let storage = tempfile::tempdir().expect("tempdir");
    let settings: Arc<dyn SettingsProvider> = Arc::new(MemorySettings::new());
    let services = MusicServiceModule::new(settings, storage.path(), true).compose();

    assert!(services.server_id().is_unknown());
    assert!(matches!(
        services.select(true).stream_url("657", None),
        Err(ServiceError::Offline(_))
    ));
    assert!(services.select(false).stream_url("657", None).is_ok());

    let cover = services.select(false).cover_art_url("al-11", Some(300))?;
    assert!(cover.starts_with("http://localhost/rest/getCoverArt.view"));
    assert!(cover.contains("size=300"));
    assert!(matches!(
        services.select(true).cover_art_url("al-11", Some(300)),
        Err(ServiceError::Offline(_))
    ));
    services.select(true).ping().await?;

    Ok(())
}
