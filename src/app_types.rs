use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Steam install directory and the game executable found under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InstallationPaths {
    pub(crate) distribution_root: Option<PathBuf>,
    pub(crate) executable_path: Option<PathBuf>,
}

type ServerTuple = (String, String, String, String, String);

/// One server row. Persisted as a 5-element array: name, players, map, ping, address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ServerTuple", into = "ServerTuple")]
pub(crate) struct ServerRecord {
    pub(crate) display_name: String,
    pub(crate) player_count: String,
    pub(crate) map_name: String,
    pub(crate) ping_ms: String,
    pub(crate) address: String,
}

impl ServerRecord {
    pub(crate) fn new(
        display_name: impl Into<String>,
        player_count: impl Into<String>,
        map_name: impl Into<String>,
        ping_ms: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            player_count: player_count.into(),
            map_name: map_name.into(),
            ping_ms: ping_ms.into(),
            address: address.into(),
        }
    }

    /// A row for an address nobody has described yet.
    pub(crate) fn unknown(address: impl Into<String>) -> Self {
        let address = address.into();
        Self::new(address.clone(), "0/0", "?", "?", address)
    }
}

impl From<ServerTuple> for ServerRecord {
    fn from((display_name, player_count, map_name, ping_ms, address): ServerTuple) -> Self {
        Self {
            display_name,
            player_count,
            map_name,
            ping_ms,
            address,
        }
    }
}

impl From<ServerRecord> for ServerTuple {
    fn from(record: ServerRecord) -> Self {
        (
            record.display_name,
            record.player_count,
            record.map_name,
            record.ping_ms,
            record.address,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PreferencesData {
    pub(crate) favorites: Vec<ServerRecord>,
    pub(crate) custom_servers: Vec<ServerRecord>,
    pub(crate) history: Vec<ServerRecord>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LaunchRequest {
    pub(crate) executable_path: PathBuf,
    pub(crate) target_address: Option<String>,
    pub(crate) extra_args: Option<String>,
    pub(crate) console_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessStatus {
    Running,
    /// `None` when the process was terminated without an exit code (e.g. by a signal).
    ExitedWithCode(Option<i32>),
}
