use std::path::{Path, PathBuf};

use crate::{
    library_folders, steam_path, InstallationPaths, LauncherError, GAME_DIR_NAME,
    GAME_EXECUTABLE_NAME,
};

pub fn game_install_dir(library_root: &Path) -> PathBuf {
    library_root
        .join("steamapps")
        .join("common")
        .join(GAME_DIR_NAME)
}

pub fn conventional_executable_path(library_root: &Path) -> PathBuf {
    game_install_dir(library_root).join(GAME_EXECUTABLE_NAME)
}

pub(crate) fn resolve_executable_with<F, G, L>(
    distribution_root: Option<&Path>,
    is_file: F,
    list_libraries: G,
    log: L,
) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
    G: FnOnce(&Path) -> Vec<PathBuf>,
    L: Fn(&str),
{
    let root = distribution_root?;

    let standard = conventional_executable_path(root);
    if is_file(&standard) {
        return Some(standard);
    }

    for library in list_libraries(root) {
        let candidate = conventional_executable_path(&library);
        if is_file(&candidate) {
            log(&format!(
                "game executable found in steam library {}",
                library.display()
            ));
            return Some(candidate);
        }
    }

    log(&format!(
        "game executable not found under {} or its libraries",
        root.display()
    ));
    None
}

/// Finds the game executable under the Steam directory or any library it lists.
pub fn resolve_executable<L>(distribution_root: Option<&Path>, log: L) -> Option<PathBuf>
where
    L: Fn(&str) + Copy,
{
    resolve_executable_with(
        distribution_root,
        Path::is_file,
        |root| library_folders::read_library_folders(root, log),
        log,
    )
}

pub fn is_game_executable_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(GAME_EXECUTABLE_NAME))
}

/// Steam directory implied by an executable sitting at
/// `<root>/steamapps/common/GarrysMod/gmod.exe`.
pub fn derive_root_from_executable(executable: &Path) -> Option<PathBuf> {
    let game_dir = executable.parent()?;
    let common = game_dir.parent()?;
    let steamapps = common.parent()?;
    let matches = |dir: &Path, expected: &str| {
        dir.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(expected))
    };
    if matches(game_dir, GAME_DIR_NAME) && matches(common, "common") && matches(steamapps, "steamapps")
    {
        return steamapps.parent().map(Path::to_path_buf);
    }
    None
}

impl InstallationPaths {
    /// Recomputes both paths from scratch.
    pub(crate) fn resolve<L>(log: L) -> Self
    where
        L: Fn(&str) + Copy,
    {
        let distribution_root = steam_path::resolve_distribution_root(log);
        let executable_path = resolve_executable(distribution_root.as_deref(), log);
        Self {
            distribution_root,
            executable_path,
        }
    }

    /// Accepts a user-picked executable; on rejection `self` is left untouched.
    pub(crate) fn apply_manual_override(&mut self, candidate: &Path) -> Result<(), LauncherError> {
        if !is_game_executable_name(candidate) {
            return Err(LauncherError::ValidationFailed(format!(
                "{} is not {}",
                candidate.display(),
                GAME_EXECUTABLE_NAME
            )));
        }

        // Stored overrides must survive a different working directory.
        let candidate = std::path::absolute(candidate).map_err(|error| {
            LauncherError::ValidationFailed(format!("{}: {error}", candidate.display()))
        })?;
        let distribution_root =
            derive_root_from_executable(&candidate).or_else(|| self.distribution_root.clone());
        *self = Self {
            distribution_root,
            executable_path: Some(candidate),
        };
        Ok(())
    }

    /// Folder holding installed addons, next to the resolved executable when known.
    pub(crate) fn addons_dir(&self) -> Option<PathBuf> {
        let game_dir = match &self.executable_path {
            Some(executable) => executable.parent()?.to_path_buf(),
            None => game_install_dir(self.distribution_root.as_deref()?),
        };
        Some(game_dir.join("garrysmod").join("addons"))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs};

    use super::*;

    fn install_game(library_root: &Path) -> PathBuf {
        let executable = conventional_executable_path(library_root);
        fs::create_dir_all(executable.parent().expect("executable parent")).expect("create game dir");
        fs::write(&executable, b"").expect("write executable");
        executable
    }

    #[test]
    fn missing_root_skips_all_probes() {
        let probes = Cell::new(0);
        let resolved = resolve_executable_with(
            None,
            |_| {
                probes.set(probes.get() + 1);
                true
            },
            |_| {
                probes.set(probes.get() + 1);
                Vec::new()
            },
            |_| {},
        );
        assert_eq!(resolved, None);
        assert_eq!(probes.get(), 0);
    }

    #[test]
    fn finds_executable_in_conventional_location() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let executable = install_game(temp.path());
        assert_eq!(resolve_executable(Some(temp.path()), |_| {}), Some(executable));
    }

    #[test]
    fn finds_executable_in_secondary_library() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let steam_root = temp.path().join("Steam");
        let library = temp.path().join("SteamLibrary");
        let steamapps = steam_root.join("steamapps");
        fs::create_dir_all(&steamapps).expect("create steamapps");
        fs::write(
            steamapps.join("libraryfolders.vdf"),
            format!(
                "\"libraryfolders\"\n{{\n\t\"1\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n}}\n",
                library.display()
            ),
        )
        .expect("write manifest");
        let executable = install_game(&library);

        assert_eq!(resolve_executable(Some(&steam_root), |_| {}), Some(executable));
    }

    #[test]
    fn returns_none_when_no_library_has_the_game() {
        let temp = tempfile::tempdir().expect("create temp dir");
        assert_eq!(resolve_executable(Some(temp.path()), |_| {}), None);
    }

    #[test]
    fn manual_override_accepts_case_variant() {
        let mut paths = InstallationPaths::default();
        let picked = Path::new("/games/Steam/steamapps/common/GarrysMod/GMOD.EXE");

        paths
            .apply_manual_override(picked)
            .expect("case variant should be accepted");

        assert_eq!(paths.executable_path.as_deref(), Some(picked));
        assert_eq!(paths.distribution_root, Some(PathBuf::from("/games/Steam")));
    }

    #[test]
    fn manual_override_rejects_other_file_names_and_keeps_state() {
        let original = InstallationPaths {
            distribution_root: Some(PathBuf::from("/steam")),
            executable_path: Some(PathBuf::from("/steam/steamapps/common/GarrysMod/gmod.exe")),
        };
        let mut paths = original.clone();

        let result = paths.apply_manual_override(Path::new("/downloads/gmod_launcher.exe"));

        assert!(matches!(result, Err(LauncherError::ValidationFailed(_))));
        assert_eq!(paths, original);
    }

    #[test]
    fn manual_override_outside_steam_layout_keeps_resolved_root() {
        let mut paths = InstallationPaths {
            distribution_root: Some(PathBuf::from("/steam")),
            executable_path: None,
        };
        paths
            .apply_manual_override(Path::new("/portable/gmod/gmod.exe"))
            .expect("override accepted");
        assert_eq!(paths.distribution_root, Some(PathBuf::from("/steam")));
    }

    #[test]
    fn relative_manual_override_is_stored_absolute() {
        let mut paths = InstallationPaths::default();
        let relative = Path::new("GarrysMod").join("gmod.exe");

        paths
            .apply_manual_override(&relative)
            .expect("relative override accepted");

        let stored = paths.executable_path.expect("executable stored");
        assert!(stored.is_absolute());
        assert_eq!(
            stored,
            std::env::current_dir().expect("current dir").join(&relative)
        );
    }

    #[test]
    fn addons_dir_follows_executable_location() {
        let paths = InstallationPaths {
            distribution_root: Some(PathBuf::from("/steam")),
            executable_path: Some(PathBuf::from("/portable/gmod/gmod.exe")),
        };
        assert_eq!(
            paths.addons_dir(),
            Some(PathBuf::from("/portable/gmod/garrysmod/addons"))
        );

        let root_only = InstallationPaths {
            distribution_root: Some(PathBuf::from("/steam")),
            executable_path: None,
        };
        assert_eq!(
            root_only.addons_dir(),
            Some(PathBuf::from("/steam/steamapps/common/GarrysMod/garrysmod/addons"))
        );
    }
}
