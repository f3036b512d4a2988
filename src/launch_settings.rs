use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    append_prefs_log, preferences_store::replace_file_contents, LauncherError,
    DEFAULT_LAUNCH_OPTIONS,
};

const LAUNCH_OPTIONS_FIELD: &str = "launch_options";
const CONSOLE_FIELD: &str = "console";
const EXECUTABLE_OVERRIDE_FIELD: &str = "executable_override";

fn empty_state_object() -> Value {
    Value::Object(Map::new())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub launch_options: String,
    pub console: bool,
    pub executable_override: Option<PathBuf>,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            launch_options: DEFAULT_LAUNCH_OPTIONS.to_string(),
            console: false,
            executable_override: None,
        }
    }
}

impl LaunchSettings {
    fn from_state(state: &Value) -> Self {
        let defaults = Self::default();
        Self {
            launch_options: state
                .get(LAUNCH_OPTIONS_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.launch_options),
            console: state
                .get(CONSOLE_FIELD)
                .and_then(Value::as_bool)
                .unwrap_or(defaults.console),
            executable_override: state
                .get(EXECUTABLE_OVERRIDE_FIELD)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }

    fn write_into(&self, object: &mut Map<String, Value>) {
        object.insert(
            LAUNCH_OPTIONS_FIELD.to_string(),
            Value::String(self.launch_options.clone()),
        );
        object.insert(CONSOLE_FIELD.to_string(), Value::Bool(self.console));
        match &self.executable_override {
            Some(path) => {
                object.insert(
                    EXECUTABLE_OVERRIDE_FIELD.to_string(),
                    Value::String(path.to_string_lossy().to_string()),
                );
            }
            None => {
                object.remove(EXECUTABLE_OVERRIDE_FIELD);
            }
        }
    }
}

fn read_state(path: &Path) -> Result<Value, std::io::Error> {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Ok(value),
            Err(error) => {
                append_prefs_log(&format!(
                    "failed to parse launch settings {}: {}. resetting state file",
                    path.display(),
                    error
                ));
                Ok(empty_state_object())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(empty_state_object()),
        Err(error) => Err(error),
    }
}

/// Takes the object out of a state document, starting over when the root is anything else.
fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn load_launch_settings(path: &Path) -> LaunchSettings {
    match read_state(path) {
        Ok(state) => LaunchSettings::from_state(&state),
        Err(error) => {
            append_prefs_log(&format!(
                "failed to read launch settings {}: {}; using defaults",
                path.display(),
                error
            ));
            LaunchSettings::default()
        }
    }
}

/// Writes the settings, keeping any unrelated keys already in the file.
pub fn save_launch_settings(path: &Path, settings: &LaunchSettings) -> Result<(), LauncherError> {
    let persistence_error = |reason: String| LauncherError::PersistenceFailed {
        path: path.to_path_buf(),
        reason,
    };

    let state = read_state(path).map_err(|error| persistence_error(format!("read: {error}")))?;
    if !state.is_object() {
        append_prefs_log(&format!(
            "launch settings {} has non-object root; resetting state file",
            path.display()
        ));
    }
    let mut object = into_object(state);
    settings.write_into(&mut object);

    let serialized = serde_json::to_string_pretty(&Value::Object(object))
        .map_err(|error| persistence_error(format!("serialize: {error}")))?;
    replace_file_contents(path, &serialized)
}
