use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gmod-launcher",
    version,
    about = "Garry's Mod launcher: finds the game, keeps server favorites and starts it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Directory for preferences, settings and logs")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Show the resolved Steam directory and game executable")]
    Status,

    #[command(about = "Re-run installation discovery")]
    Refresh,

    #[command(about = "List favorites, placeholder servers and custom servers")]
    Servers {
        #[arg(long, help = "Only show servers whose name, map or address contains this text")]
        filter: Option<String>,
    },

    #[command(about = "Start the game")]
    Launch {
        #[arg(long, help = "Server address (host:port) to join on startup")]
        connect: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Extra launch options; defaults to the saved ones")]
        options: Option<String>,

        #[arg(long, help = "Start with the developer console (-console)")]
        console: bool,

        #[arg(long, help = "Return right after starting instead of waiting for the game to exit")]
        detach: bool,
    },

    #[command(about = "Start the game and join a server")]
    Connect {
        #[arg(help = "Server address (host:port)")]
        address: String,

        #[arg(long, help = "Return right after starting instead of waiting for the game to exit")]
        detach: bool,
    },

    #[command(about = "Add a server to favorites, or remove it if already there")]
    Favorite {
        #[arg(help = "Server address (host:port)")]
        address: String,
    },

    #[command(about = "Add a custom server entry")]
    AddServer {
        #[arg(help = "Server host name or IP")]
        host: String,

        #[arg(long, help = "Server port (default 27015)")]
        port: Option<u16>,
    },

    #[command(about = "Remove a custom server entry")]
    RemoveServer {
        #[arg(help = "Server address (host:port)")]
        address: String,
    },

    #[command(about = "Use a specific gmod.exe instead of the discovered one")]
    SelectExe {
        #[arg(help = "Path to gmod.exe")]
        path: PathBuf,
    },

    #[command(about = "List installed addons")]
    Addons {
        #[arg(long, help = "Open the addons folder in the file manager")]
        open: bool,
    },

    #[command(about = "Download a Steam Workshop item with steamcmd")]
    InstallItem {
        #[arg(help = "Numeric workshop item id")]
        id: String,
    },

    #[command(about = "Open the Garry's Mod workshop in the browser")]
    Workshop,

    #[command(about = "Show or change saved launch settings")]
    Settings {
        #[arg(long, allow_hyphen_values = true, help = "Default extra launch options")]
        options: Option<String>,

        #[arg(long, value_enum, help = "Launch with the developer console by default")]
        console: Option<Toggle>,

        #[arg(long, help = "Forget the manually selected executable")]
        clear_exe: bool,
    },
}
