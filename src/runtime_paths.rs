use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{DATA_ROOT_ENV, DEFAULT_DATA_DIR_NAME, PREFERENCES_FILE, SETTINGS_FILE, STEAM_DIR_ENV};

fn non_blank_env_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

/// Directory holding preferences, settings and logs.
pub fn default_data_root() -> PathBuf {
    if let Some(root) = non_blank_env_path(DATA_ROOT_ENV) {
        return root;
    }

    home::home_dir()
        .map(|home| home.join(DEFAULT_DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn resolve_data_root(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(default_data_root)
}

pub fn preferences_path(data_root: &Path) -> PathBuf {
    data_root.join(PREFERENCES_FILE)
}

pub fn settings_path(data_root: &Path) -> PathBuf {
    data_root.join(SETTINGS_FILE)
}

/// Explicit Steam directory requested through the environment.
pub fn steam_dir_override() -> Option<PathBuf> {
    non_blank_env_path(STEAM_DIR_ENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_data_root_prefers_cli_override() {
        let root = resolve_data_root(Some(PathBuf::from("/tmp/launcher-data")));
        assert_eq!(root, PathBuf::from("/tmp/launcher-data"));
    }

    #[test]
    fn data_files_live_directly_under_root() {
        let root = Path::new("/data");
        assert_eq!(preferences_path(root), root.join("launcher_data.json"));
        assert_eq!(settings_path(root), root.join("launcher_settings.json"));
    }
}
