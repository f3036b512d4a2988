use std::path::{Path, PathBuf};

use crate::{
    addons, append_discovery_log, append_launch_log, append_launcher_warning,
    launch_plan::{build_installer_args, build_launch_args},
    launch_settings::{self, LaunchSettings},
    preferences_store::{self, FavoriteToggle},
    process_control::{self, ProcessHandle},
    runtime_paths,
    server_catalog::{self, ServerEntry},
    InstallationPaths, LaunchRequest, LauncherError, PreferencesData, ProcessStatus, ServerRecord,
    GAME_EXECUTABLE_NAME,
};

/// Everything one launcher run knows: resolved paths, preferences and the tracked game.
///
/// Owned by the coordinator; the core modules only ever receive pieces of it.
#[derive(Debug)]
pub struct LauncherSession {
    data_root: PathBuf,
    pub(crate) paths: InstallationPaths,
    pub(crate) preferences: PreferencesData,
    pub(crate) settings: LaunchSettings,
    game: Option<ProcessHandle>,
}

impl LauncherSession {
    pub fn open(data_root: PathBuf) -> Self {
        let preferences = preferences_store::load_preferences(&runtime_paths::preferences_path(&data_root));
        let settings = launch_settings::load_launch_settings(&runtime_paths::settings_path(&data_root));
        let mut session = Self {
            data_root,
            paths: InstallationPaths::default(),
            preferences,
            settings,
            game: None,
        };
        session.refresh_paths();
        session
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    fn preferences_path(&self) -> PathBuf {
        runtime_paths::preferences_path(&self.data_root)
    }

    /// Re-resolves both install paths, then re-applies a saved manual executable choice.
    pub fn refresh_paths(&mut self) {
        let mut paths = InstallationPaths::resolve(append_discovery_log);

        if let Some(saved) = self.settings.executable_override.clone() {
            if !saved.is_file() {
                append_launcher_warning(&format!(
                    "saved {} override {} no longer exists; ignoring it",
                    GAME_EXECUTABLE_NAME,
                    saved.display()
                ));
            } else if let Err(error) = paths.apply_manual_override(&saved) {
                append_launcher_warning(&format!("saved executable override rejected: {error}"));
            }
        }

        self.paths = paths;
    }

    /// Validates and remembers a user-picked executable. Rejection leaves the session unchanged.
    pub fn set_manual_executable(&mut self, candidate: &Path) -> Result<(), LauncherError> {
        self.paths.apply_manual_override(candidate)?;
        self.settings.executable_override = self.paths.executable_path.clone();
        self.save_settings()
    }

    pub fn save_settings(&self) -> Result<(), LauncherError> {
        launch_settings::save_launch_settings(
            &runtime_paths::settings_path(&self.data_root),
            &self.settings,
        )
    }

    fn mutate_preferences<R, F>(&mut self, mutate: F) -> R
    where
        F: FnOnce(&mut PreferencesData) -> R,
    {
        let path = self.preferences_path();
        self.preferences = preferences_store::load_preferences(&path);
        let result = mutate(&mut self.preferences);
        preferences_store::save_preferences(&path, &self.preferences);
        result
    }

    pub fn listing(&self) -> Vec<ServerEntry> {
        server_catalog::merged_listing(&self.preferences)
    }

    /// Known server for `address`, or a placeholder row when it is not listed anywhere.
    pub fn server_for_address(&self, address: &str) -> ServerRecord {
        server_catalog::find_by_address(&self.listing(), address)
            .map(|entry| entry.record.clone())
            .unwrap_or_else(|| ServerRecord::unknown(address.trim()))
    }

    pub fn toggle_favorite(&mut self, record: &ServerRecord) -> FavoriteToggle {
        self.mutate_preferences(|preferences| preferences.toggle_favorite(record))
    }

    pub fn add_custom_server(
        &mut self,
        host: &str,
        port: Option<u16>,
    ) -> Result<ServerRecord, LauncherError> {
        self.mutate_preferences(|preferences| preferences.add_custom_server(host, port))
    }

    pub fn remove_custom_server(&mut self, address: &str) -> bool {
        self.mutate_preferences(|preferences| preferences.remove_custom_server(address))
    }

    pub fn is_game_tracked(&self) -> bool {
        self.game.is_some()
    }

    pub fn tracked_game(&self) -> Option<&ProcessHandle> {
        self.game.as_ref()
    }

    /// Starts the game, optionally connecting to `target`. Returns the new process id.
    pub fn launch_game(
        &mut self,
        target: Option<&ServerRecord>,
        extra_args: Option<String>,
        console_mode: bool,
    ) -> Result<u32, LauncherError> {
        if self.game.is_some() {
            return Err(LauncherError::InvalidRequest(
                "the game is already running".to_string(),
            ));
        }

        if let Some(record) = target {
            self.mutate_preferences(|preferences| preferences.append_history(record));
        }

        let executable_path = self
            .paths
            .executable_path
            .clone()
            .ok_or_else(|| LauncherError::NotFound(GAME_EXECUTABLE_NAME.to_string()))?;

        let request = LaunchRequest {
            executable_path,
            target_address: target.map(|record| record.address.clone()),
            extra_args,
            console_mode,
        };
        let args = build_launch_args(&request)?;
        let handle = process_control::launch(&args)?;
        let pid = handle.pid();
        self.game = Some(handle);
        Ok(pid)
    }

    /// Status of the tracked game, if any. The handle is released once it has exited.
    pub fn poll_game(&mut self) -> Option<ProcessStatus> {
        let handle = self.game.as_mut()?;
        let status = process_control::poll(handle);
        if let ProcessStatus::ExitedWithCode(_) = status {
            self.game = None;
        }
        Some(status)
    }

    /// Hands a workshop item to steamcmd without waiting for it. Returns the installer pid.
    pub fn install_workshop_item(&self, item_id: &str) -> Result<u32, LauncherError> {
        let root = self
            .paths
            .distribution_root
            .as_deref()
            .ok_or_else(|| LauncherError::NotFound("Steam directory".to_string()))?;
        let args = build_installer_args(root, item_id)?;
        let pid = process_control::spawn_detached(&args)?;
        append_launch_log(&format!("workshop item {} queued with steamcmd", item_id.trim()));
        Ok(pid)
    }

    pub fn installed_addons(&self) -> Option<(PathBuf, Vec<String>)> {
        let dir = self.paths.addons_dir()?;
        let names = addons::list_installed_addons(&dir, append_launcher_warning);
        Some((dir, names))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn session_in(data_root: &Path) -> LauncherSession {
        LauncherSession {
            data_root: data_root.to_path_buf(),
            paths: InstallationPaths::default(),
            preferences: PreferencesData::default(),
            settings: LaunchSettings::default(),
            game: None,
        }
    }

    #[test]
    fn mutations_are_persisted_immediately() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut session = session_in(temp.path());

        let added = session
            .add_custom_server("192.168.1.20", None)
            .expect("add custom server");
        assert_eq!(session.toggle_favorite(&added), FavoriteToggle::Added);

        let stored = preferences_store::load_preferences(&runtime_paths::preferences_path(temp.path()));
        assert_eq!(stored.custom_servers, vec![added.clone()]);
        assert_eq!(stored.favorites, vec![added]);
    }

    #[test]
    fn mutations_start_from_the_file_on_disk() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = runtime_paths::preferences_path(temp.path());
        let mut other_instance = PreferencesData::default();
        other_instance
            .add_custom_server("10.1.1.1", None)
            .expect("add server");
        preferences_store::write_preferences(&path, &other_instance).expect("seed preferences");

        let mut session = session_in(temp.path());
        session.add_custom_server("10.2.2.2", None).expect("add server");

        assert_eq!(session.preferences.custom_servers.len(), 2);
    }

    #[test]
    fn launch_without_executable_is_not_found_but_records_history() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut session = session_in(temp.path());
        let target = session.server_for_address("ttt.example.com:27015");

        let result = session.launch_game(Some(&target), None, false);

        assert!(matches!(result, Err(LauncherError::NotFound(_))));
        assert_eq!(session.preferences.history, vec![target]);
        assert!(!session.is_game_tracked());
    }

    #[test]
    fn server_for_unknown_address_is_a_placeholder() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let session = session_in(temp.path());
        let record = session.server_for_address(" 203.0.113.7:27015 ");
        assert_eq!(record, ServerRecord::unknown("203.0.113.7:27015"));
    }

    #[test]
    fn rejected_manual_executable_keeps_paths_and_settings() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut session = session_in(temp.path());
        session.paths.executable_path = Some(PathBuf::from("/steam/gmod.exe"));

        let result = session.set_manual_executable(Path::new("/tmp/hl2.exe"));

        assert!(matches!(result, Err(LauncherError::ValidationFailed(_))));
        assert_eq!(session.paths.executable_path, Some(PathBuf::from("/steam/gmod.exe")));
        assert_eq!(session.settings.executable_override, None);
        assert!(!runtime_paths::settings_path(temp.path()).exists());
    }

    #[test]
    fn accepted_manual_executable_is_saved() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut session = session_in(temp.path());
        let executable = temp.path().join("GarrysMod").join("gmod.exe");
        fs::create_dir_all(executable.parent().expect("parent")).expect("create game dir");
        fs::write(&executable, b"").expect("write executable");

        session
            .set_manual_executable(&executable)
            .expect("override accepted");

        let settings = launch_settings::load_launch_settings(&runtime_paths::settings_path(temp.path()));
        assert_eq!(settings.executable_override, Some(executable));
    }

    #[test]
    fn relative_manual_executable_is_saved_absolute() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut session = session_in(temp.path());

        session
            .set_manual_executable(Path::new("GarrysMod/gmod.exe"))
            .expect("override accepted");

        let settings = launch_settings::load_launch_settings(&runtime_paths::settings_path(temp.path()));
        let saved = settings.executable_override.expect("override saved");
        assert!(saved.is_absolute());
        assert!(saved.ends_with("GarrysMod/gmod.exe"));
        assert_eq!(session.paths.executable_path, Some(saved));
    }

    #[test]
    fn install_requires_steam_directory() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let session = session_in(temp.path());
        assert!(matches!(
            session.install_workshop_item("104691717"),
            Err(LauncherError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn tracked_game_is_released_after_exit() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut session = session_in(temp.path());
        session.paths.executable_path = Some(PathBuf::from("true"));

        session.launch_game(None, None, false).expect("launch true");
        assert!(matches!(
            session.launch_game(None, None, false),
            Err(LauncherError::InvalidRequest(_))
        ));

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        let status = loop {
            match session.poll_game() {
                Some(ProcessStatus::Running) if std::time::Instant::now() < deadline => {
                    std::thread::sleep(std::time::Duration::from_millis(20));
                }
                other => break other,
            }
        };

        assert_eq!(status, Some(ProcessStatus::ExitedWithCode(Some(0))));
        assert!(!session.is_game_tracked());
        assert_eq!(session.poll_game(), None);
    }
}
