use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rsms", about = "Terminal bulk SMS campaign client")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in to the gateway and persist the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Remove the persisted session
    Logout,
    /// Send a message to one or more recipients, one call at a time
    Send {
        /// Sender identity id
        #[arg(short, long)]
        sender: String,
        /// Destination country code (e.g. EG)
        #[arg(long)]
        country: String,
        /// Message body
        #[arg(short, long)]
        message: String,
        /// Recipients, comma or newline separated
        #[arg(short, long, conflicts_with = "recipients_file")]
        recipients: Option<String>,
        /// File containing recipients, comma or newline separated
        #[arg(long, required_unless_present = "recipients")]
        recipients_file: Option<PathBuf>,
    },
    /// List the account's message history
    Messages,
    /// Refresh sender identity balances from the gateway
    Balance,
}
