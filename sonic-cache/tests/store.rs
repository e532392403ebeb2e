use sonic_cache::{CacheError, ScopedCacheStore};
use std::collections::HashMap;

#[test]
fn store_and_load() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    let store = ScopedCacheStore::new(storage.path(), "908558580", true);

    assert_eq!(store.load::<Vec<String>>("music_folders"), None);
    store.store("music_folders", &vec!["Music".to_string(), "Podcasts".to_string()])?;
    assert_eq!(
        store.load::<Vec<String>>("music_folders"),
        Some(vec!["Music".to_string(), "Podcasts".to_string()])
    );

    store.store("music_folders", &vec!["Music".to_string()])?;
    assert_eq!(
        store.load::<Vec<String>>("music_folders"),
        Some(vec!["Music".to_string()])
    );

    Ok(())
}

#[test]
fn namespaces_are_isolated() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    let first = ScopedCacheStore::new(storage.path(), "908558580", false);
    let second = ScopedCacheStore::new(storage.path(), "631178241", false);

    first.store("indexes/all", &1u32)?;
    second.store("indexes/all", &2u32)?;

    assert_eq!(first.load::<u32>("indexes/all"), Some(1));
    assert_eq!(second.load::<u32>("indexes/all"), Some(2));

    second.clear()?;
    assert_eq!(second.load::<u32>("indexes/all"), None);
    assert_eq!(first.load::<u32>("indexes/all"), Some(1));

    Ok(())
}

#[test]
fn same_identity_shares_entries() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    ScopedCacheStore::new(storage.path(), "not-exists", false).store("genres", &"rock")?;

    let store = ScopedCacheStore::new(storage.path(), "not-exists", false);
    assert_eq!(store.load::<String>("genres").as_deref(), Some("rock"));

    Ok(())
}

#[test]
fn keys_roundtrip_through_file_names() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    let store = ScopedCacheStore::new(storage.path(), "1", false);
    assert!(store.keys()?.is_empty());

    for key in ["directory/10", "album/../11", "", "検索"] {
        store.store(key, &key)?;
    }

    let mut keys = store.keys()?;
    keys.sort();
    assert_eq!(keys, vec!["", "album/../11", "directory/10", "検索"]);
    assert_eq!(store.load::<String>("album/../11").as_deref(), Some("album/../11"));

    Ok(())
}

#[test]
fn remove_entry() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    let store = ScopedCacheStore::new(storage.path(), "1", false);
    store.store("playlist/15", &HashMap::from([("name", "Some random songs")]))?;

    assert!(store.remove("playlist/15")?);
    assert!(!store.remove("playlist/15")?);
    assert_eq!(store.load::<HashMap<String, String>>("playlist/15"), None);

    Ok(())
}

#[test]
fn corrupt_entry_is_absent() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    let store = ScopedCacheStore::new(storage.path(), "1", false);
    store.store("genres", &vec![1, 2, 3])?;

    assert_eq!(store.load::<String>("genres"), None);

    Ok(())
}

#[test]
fn long_keys_are_stored() -> Result<(), CacheError> {
    let storage = tempfile::tempdir()?;
    let store = ScopedCacheStore::new(storage.path(), "1", false);
    let key = format!("directory/{}", "a".repeat(190));
    assert_eq!(key.len(), 200);

    store.store(&key, &"v")?;
    store.store("album/1", &"w")?;
    assert_eq!(store.load::<String>(&key).as_deref(), Some("v"));

    let mut keys = store.keys()?;
    keys.sort();
    assert_eq!(keys, vec!["album/1".to_string(), key.clone()]);

    assert!(store.remove(&key)?);
    assert_eq!(store.load::<String>(&key), None);
    assert_eq!(store.keys()?, vec!["album/1".to_string()]);

    Ok(())
}
