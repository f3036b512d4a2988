use std::path::PathBuf;

use thiserror::Error;

/// Failures the launcher core can report. None of them is fatal to the launcher itself.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to persist {}: {reason}", .path.display())]
    PersistenceFailed { path: PathBuf, reason: String },

    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid launch request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::LauncherError;

    #[test]
    fn spawn_error_message_names_the_command() {
        let error = LauncherError::Spawn {
            command: "/g/gmod.exe -console".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to start /g/gmod.exe -console: no such file"
        );
    }
}
