//! Command-line argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};

/// Caw command-line tool, talking to the platform through Faz.
#[derive(Parser, Debug, Clone)]
#[command(name = "caw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Faz service URL to connect to.
    #[arg(long, env = "CAW_FAZ_ADDR", default_value = "ws://localhost:50000")]
    pub faz: String,

    /// Log in as the given username.
    #[arg(short, long, env = "CAW_USER")]
    pub user: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Deadline for each call to Faz, in seconds.
    #[arg(long, env = "CAW_DEADLINE_SECS", default_value_t = 10)]
    pub deadline_secs: u64,

    /// Connection timeout, in seconds.
    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Hook all Caw functions to the Faz layer.
    HookAll,

    /// Unhook all Caw functions from the Faz layer.
    UnhookAll,

    /// Register the given username.
    Register {
        /// Username to register.
        username: String,
    },

    /// Start following the given username.
    Follow {
        /// User to follow.
        username: String,
    },

    /// Show the logged-in user's following and followers.
    Profile,

    /// Post a new caw.
    Caw {
        /// Text of the caw.
        text: String,

        /// Post as a reply to the given caw id.
        #[arg(short, long)]
        reply: Option<String>,
    },

    /// Read the caw thread starting at the given id.
    Read {
        /// Caw id.
        id: String,
    },
}
