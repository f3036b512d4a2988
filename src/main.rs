mod addons;
mod app_constants;
mod app_error;
mod app_runtime;
mod app_types;
mod cli;
mod external_open;
mod game_path;
mod launch_plan;
mod launch_settings;
mod launcher_session;
mod library_folders;
mod logging;
mod preferences_store;
mod process_control;
mod runtime_paths;
mod server_catalog;
mod steam_path;
mod steam_registry;

pub(crate) use app_constants::*;
pub(crate) use app_error::LauncherError;
pub(crate) use app_types::{
    InstallationPaths, LaunchRequest, PreferencesData, ProcessStatus, ServerRecord,
};
pub(crate) use logging::{
    append_discovery_log, append_launch_log, append_launch_warning, append_launcher_log,
    append_launcher_warning, append_prefs_log,
};

fn main() {
    std::process::exit(app_runtime::run());
}
