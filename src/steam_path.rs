use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{runtime_paths, steam_registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    EnvOverride,
    Registry,
    Fallback,
}

impl RootSource {
    fn label(self) -> &'static str {
        match self {
            Self::EnvOverride => "environment override",
            Self::Registry => "registry",
            Self::Fallback => "fallback location",
        }
    }
}

/// Conventional Steam locations probed when neither the environment nor the registry answers.
pub fn fallback_steam_candidates(home_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(program_files) = env::var("ProgramFiles(x86)") {
        if !program_files.trim().is_empty() {
            candidates.push(PathBuf::from(program_files.trim()).join("Steam"));
        }
    }
    if let Some(home) = home_dir {
        candidates.push(home.join("Steam"));
    }
    if cfg!(windows) {
        candidates.push(PathBuf::from(r"C:\Steam"));
        candidates.push(PathBuf::from(r"D:\Steam"));
    } else if let Some(home) = home_dir {
        candidates.push(home.join(".local").join("share").join("Steam"));
        candidates.push(home.join(".steam").join("steam"));
        candidates.push(
            home.join("Library")
                .join("Application Support")
                .join("Steam"),
        );
    }

    candidates
}

/// Returns the first candidate that is an existing directory.
pub fn resolve_distribution_root_from<I, F, L>(candidates: I, is_dir: F, log: L) -> Option<PathBuf>
where
    I: IntoIterator<Item = (RootSource, PathBuf)>,
    F: Fn(&Path) -> bool,
    L: Fn(&str),
{
    for (source, candidate) in candidates {
        if is_dir(&candidate) {
            log(&format!(
                "steam directory resolved from {}: {}",
                source.label(),
                candidate.display()
            ));
            return Some(candidate);
        }
        if source != RootSource::Fallback {
            log(&format!(
                "ignoring steam directory from {} that does not exist: {}",
                source.label(),
                candidate.display()
            ));
        }
    }
    log("steam directory not found");
    None
}

/// Locates the Steam install directory: environment override, registry, then fallbacks.
pub fn resolve_distribution_root<L>(log: L) -> Option<PathBuf>
where
    L: Fn(&str),
{
    let mut candidates = Vec::new();
    if let Some(path) = runtime_paths::steam_dir_override() {
        candidates.push((RootSource::EnvOverride, path));
    }
    if let Some(path) = steam_registry::query_steam_install_path(&log) {
        candidates.push((RootSource::Registry, path));
    }
    let home = home::home_dir();
    candidates.extend(
        fallback_steam_candidates(home.as_deref())
            .into_iter()
            .map(|path| (RootSource::Fallback, path)),
    );

    resolve_distribution_root_from(candidates, Path::is_dir, log)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs};

    use super::*;

    #[test]
    fn registry_path_is_rejected_when_missing_on_disk() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let fallback = temp.path().join("Steam");
        fs::create_dir_all(&fallback).expect("create fallback dir");
        let messages = RefCell::new(Vec::new());

        let resolved = resolve_distribution_root_from(
            [
                (RootSource::Registry, temp.path().join("gone")),
                (RootSource::Fallback, fallback.clone()),
            ],
            Path::is_dir,
            |message| messages.borrow_mut().push(message.to_string()),
        );

        assert_eq!(resolved, Some(fallback));
        assert!(messages.borrow()[0].contains("does not exist"));
    }

    #[test]
    fn first_existing_candidate_wins() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let registry = temp.path().join("registry-steam");
        let fallback = temp.path().join("Steam");
        fs::create_dir_all(&registry).expect("create registry dir");
        fs::create_dir_all(&fallback).expect("create fallback dir");

        let resolved = resolve_distribution_root_from(
            [
                (RootSource::Registry, registry.clone()),
                (RootSource::Fallback, fallback),
            ],
            Path::is_dir,
            |_| {},
        );

        assert_eq!(resolved, Some(registry));
    }

    #[test]
    fn returns_none_when_nothing_exists() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let resolved = resolve_distribution_root_from(
            [
                (RootSource::Fallback, temp.path().join("a")),
                (RootSource::Fallback, temp.path().join("b")),
            ],
            Path::is_dir,
            |_| {},
        );
        assert_eq!(resolved, None);
    }

    #[test]
    fn fallback_candidates_include_home_steam_dir() {
        let home = Path::new("/home/player");
        let candidates = fallback_steam_candidates(Some(home));
        assert!(candidates.contains(&home.join("Steam")));
    }
}
