use std::{
    fs,
    io::Write,
    path::Path,
};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::{
    append_prefs_log, LauncherError, PreferencesData, ServerRecord, DEFAULT_SERVER_PORT,
    HISTORY_LIMIT,
};

const FAVORITES_FIELD: &str = "favorites";
const CUSTOM_SERVERS_FIELD: &str = "custom_servers";
const HISTORY_FIELD: &str = "history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn record_from_value(value: &Value) -> Option<ServerRecord> {
    let items = value.as_array()?;
    let [name, players, map, ping, address] = items.as_slice() else {
        return None;
    };
    Some(ServerRecord::new(
        scalar_to_string(name)?,
        scalar_to_string(players)?,
        scalar_to_string(map)?,
        scalar_to_string(ping)?,
        scalar_to_string(address)?,
    ))
}

fn records_from_field<L>(root: &Value, field: &str, log: &L) -> Vec<ServerRecord>
where
    L: Fn(&str),
{
    let Some(value) = root.get(field) else {
        log(&format!("preferences field '{field}' is missing; using empty list"));
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        log(&format!("preferences field '{field}' is not a list; using empty list"));
        return Vec::new();
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match record_from_value(entry) {
            Some(record) => records.push(record),
            None => log(&format!(
                "dropping malformed entry #{index} in preferences field '{field}'"
            )),
        }
    }
    records
}

fn dedupe_by_address(records: Vec<ServerRecord>) -> Vec<ServerRecord> {
    let mut unique: Vec<ServerRecord> = Vec::with_capacity(records.len());
    for record in records {
        if !unique.iter().any(|existing| existing.address == record.address) {
            unique.push(record);
        }
    }
    unique
}

/// Parses a preferences document; anything unusable degrades to empty lists.
pub fn parse_preferences<L>(raw: &str, log: L) -> PreferencesData
where
    L: Fn(&str),
{
    let root: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            log(&format!("failed to parse preferences: {error}; using defaults"));
            return PreferencesData::default();
        }
    };
    if !root.is_object() {
        log("preferences document has non-object root; using defaults");
        return PreferencesData::default();
    }

    let mut data = PreferencesData {
        favorites: dedupe_by_address(records_from_field(&root, FAVORITES_FIELD, &log)),
        custom_servers: records_from_field(&root, CUSTOM_SERVERS_FIELD, &log),
        history: records_from_field(&root, HISTORY_FIELD, &log),
    };
    data.trim_history();
    data
}

/// Reads the preferences file. Never fails: absence or corruption yields defaults.
pub fn load_preferences(path: &Path) -> PreferencesData {
    match fs::read_to_string(path) {
        Ok(raw) => parse_preferences(&raw, |message| {
            append_prefs_log(&format!("{}: {}", path.display(), message))
        }),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => PreferencesData::default(),
        Err(error) => {
            append_prefs_log(&format!(
                "failed to read preferences {}: {}; using defaults",
                path.display(),
                error
            ));
            PreferencesData::default()
        }
    }
}

/// Replaces `path` with `contents` through a uniquely named temp file in the same directory.
pub(crate) fn replace_file_contents(path: &Path, contents: &str) -> Result<(), LauncherError> {
    let persistence_error = |reason: String| LauncherError::PersistenceFailed {
        path: path.to_path_buf(),
        reason,
    };

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .map_err(|error| persistence_error(format!("create directory: {error}")))?;

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|error| persistence_error(format!("create temp file: {error}")))?;
    temp.write_all(contents.as_bytes())
        .map_err(|error| persistence_error(format!("write: {error}")))?;
    temp.persist(path)
        .map_err(|error| persistence_error(format!("replace: {}", error.error)))?;
    Ok(())
}

pub(crate) fn write_preferences(path: &Path, data: &PreferencesData) -> Result<(), LauncherError> {
    let serialized =
        serde_json::to_string_pretty(data).map_err(|error| LauncherError::PersistenceFailed {
            path: path.to_path_buf(),
            reason: format!("serialize: {error}"),
        })?;
    // Last writer wins when two launchers save at once.
    replace_file_contents(path, &serialized)
}

/// Overwrites the preferences file. Failures are logged and swallowed.
pub fn save_preferences(path: &Path, data: &PreferencesData) {
    if let Err(error) = write_preferences(path, data) {
        append_prefs_log(&error.to_string());
    }
}

impl PreferencesData {
    pub(crate) fn is_favorite(&self, address: &str) -> bool {
        self.favorites.iter().any(|record| record.address == address)
    }

    /// Adds the record to favorites, or removes every favorite sharing its address.
    pub(crate) fn toggle_favorite(&mut self, record: &ServerRecord) -> FavoriteToggle {
        if self.is_favorite(&record.address) {
            self.favorites
                .retain(|favorite| favorite.address != record.address);
            FavoriteToggle::Removed
        } else {
            self.favorites.push(record.clone());
            FavoriteToggle::Added
        }
    }

    /// Appends unless an identical record is already present. Returns whether it was added.
    pub(crate) fn append_history(&mut self, record: &ServerRecord) -> bool {
        if self.history.contains(record) {
            return false;
        }
        self.history.push(record.clone());
        self.trim_history();
        true
    }

    fn trim_history(&mut self) {
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    pub(crate) fn add_custom_server(
        &mut self,
        host: &str,
        port: Option<u16>,
    ) -> Result<ServerRecord, LauncherError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(LauncherError::ValidationFailed(
                "server host must not be empty".to_string(),
            ));
        }
        let address = format!("{}:{}", host, port.unwrap_or(DEFAULT_SERVER_PORT));
        let record = ServerRecord::new(
            format!("Custom server {}", self.custom_servers.len() + 1),
            "0/0",
            "?",
            "?",
            address,
        );
        self.custom_servers.push(record.clone());
        Ok(record)
    }

    pub(crate) fn remove_custom_server(&mut self, address: &str) -> bool {
        let before = self.custom_servers.len();
        self.custom_servers.retain(|record| record.address != address);
        self.custom_servers.len() != before
    }
}
