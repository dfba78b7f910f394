use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "courtside", about = "Courtside club management client")]
pub struct Cli {
    /// API base URL.
    #[arg(
        long,
        global = true,
        env = "COURTSIDE_SERVER",
        default_value = "http://127.0.0.1:3100"
    )]
    pub server: String,

    /// Where the session is stored. Defaults to the user data directory.
    #[arg(long, global = true, env = "COURTSIDE_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session.
    Login {
        /// Username or email address.
        username: String,

        #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session.
    Logout,

    /// Show the stored session without contacting the server.
    Status,

    /// Show the signed-in profile.
    Whoami,

    /// Staff records.
    Staff {
        #[command(subcommand)]
        command: ListCommand,
    },

    /// Equipment inventory.
    Inventory {
        #[command(subcommand)]
        command: ListCommand,
    },

    /// Print version information.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    List,
}
