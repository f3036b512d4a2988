use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use chrono::Local;
use log::{Level, LevelFilter};

use crate::LAUNCHER_LOG_FILE;

static LOG_FILE_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn resolve_launcher_log_path(data_root: &Path) -> PathBuf {
    data_root.join("logs").join(LAUNCHER_LOG_FILE)
}

/// Installs the `log` backend and enables the append-only log file under `data_root`.
pub fn init(data_root: &Path, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .format_timestamp_millis()
    .try_init();

    let _ = LOG_FILE_PATH.set(resolve_launcher_log_path(data_root));
}

fn format_log_line(level: Level, scope: &str, message: &str) -> String {
    format!(
        "[{}] [{}] [{}] {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        scope,
        message
    )
}

fn file_accepts(level: Level, max_level: LevelFilter) -> bool {
    level <= max_level
}

fn append_log_line(path: &Path, line: &str) {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}

fn append_scoped_log(level: Level, scope: &str, message: &str) {
    log::log!(target: "gmod_launcher", level, "[{scope}] {message}");
    if !file_accepts(level, log::max_level()) {
        return;
    }
    if let Some(path) = LOG_FILE_PATH.get() {
        append_log_line(path, &format_log_line(level, scope, message));
    }
}

pub fn append_launcher_log(message: &str) {
    append_scoped_log(Level::Info, "launcher", message);
}

pub fn append_launcher_warning(message: &str) {
    append_scoped_log(Level::Warn, "launcher", message);
}

/// Steam directory and executable probing; only shown with `--verbose`.
pub fn append_discovery_log(message: &str) {
    append_scoped_log(Level::Debug, "discovery", message);
}

pub fn append_launch_log(message: &str) {
    append_scoped_log(Level::Info, "launch", message);
}

pub fn append_launch_warning(message: &str) {
    append_scoped_log(Level::Warn, "launch", message);
}

/// Preference and settings problems: unreadable files, dropped entries, failed saves.
pub fn append_prefs_log(message: &str) {
    append_scoped_log(Level::Warn, "prefs", message);
}
