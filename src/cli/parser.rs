use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rGeologger
/// CLI application to watch your position and keep the last known fix in SQLite
#[derive(Parser)]
#[command(
    name = "rgeologger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple location logger: watch your position behind a permission and keep the last known fix in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Inspect or change the location permission
    Permission {
        #[arg(long = "status", help = "Show the current permission state")]
        status: bool,

        #[arg(
            long = "request",
            help = "Ask for the permission (prompts only while undetermined)"
        )]
        request: bool,

        #[arg(long = "grant", conflicts_with = "revoke", help = "Grant location access")]
        grant: bool,

        #[arg(long = "revoke", help = "Deny location access")]
        revoke: bool,
    },

    /// Start a tracking session fed by `latitude,longitude` lines
    Track {
        #[arg(
            long,
            value_name = "FILE",
            help = "CSV feed of fixes (reads stdin when omitted)"
        )]
        feed: Option<PathBuf>,
    },

    /// Show the last known location
    Last {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// List recorded fixes, newest first
    List {
        #[arg(long, short = 'n', help = "Show at most N fixes")]
        limit: Option<usize>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
