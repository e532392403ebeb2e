use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use sonic_common::TomlSettings;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("moe", "mmf", "sonic"));

const SETTINGS_FILE: &str = "settings.toml";

fn resolve_root(
    name: &str,
    overridden: Option<OsString>,
    platform: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let root = match (overridden, platform) {
        (Some(root), _) => PathBuf::from(root),
        (None, Some(root)) => root.to_path_buf(),
        (None, None) => {
            anyhow::bail!("Failed to determine {} root, set it explicitly", name)
        }
    };

    if root.exists() {
        log::debug!("{} root: {:?}", name, root);
    } else {
        log::debug!("{} root does not exist: {:?}", name, root);
    }
    Ok(root)
}

pub(crate) fn config_root() -> anyhow::Result<PathBuf> {
    resolve_root(
        "Config",
        std::env::var_os("SONIC_ROOT"),
        PROJECT_DIRS.as_ref().map(|d| d.config_dir()),
    )
}

pub(crate) fn cache_root() -> anyhow::Result<PathBuf> {
    resolve_root(
        "Cache",
        std::env::var_os("SONIC_CACHE"),
        PROJECT_DIRS.as_ref().map(|d| d.cache_dir()),
    )
}

pub(crate) fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

pub(crate) fn load_settings() -> anyhow::Result<TomlSettings> {
    let path = settings_path(&config_root()?);
    Ok(TomlSettings::open(path)?)
}
