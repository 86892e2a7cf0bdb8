//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roofsync_core::NewProperty;

/// roofsync - rooftop solar survey records with document sync
#[derive(Parser, Debug)]
#[command(name = "roofsync", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ROOFSYNC_CONFIG")]
    pub config: Option<String>,

    /// Directory holding local data (overrides store.data_dir)
    #[arg(long, global = true, env = "ROOFSYNC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a surveyed property
    Add(AddArgs),
    /// List properties, newest first
    List {
        /// Print the stored JSON document instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one property
    Show {
        /// Property id
        id: String,
    },
    /// Delete a property
    Delete {
        /// Property id
        id: String,
    },
    /// Portfolio totals
    Summary,
    /// Write a CSV report for one property
    Export {
        /// Property id
        id: String,
        /// Output file (defaults to Solar_Report_<address>.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace local data with the remote document
    Pull,
    /// Replace the remote document with local data
    Push,
    /// Show configuration, credential, and local data status
    Status,
    /// Manage the access token
    Token {
        /// Token action
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Manage the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Survey fields for `add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Street address
    #[arg(long)]
    pub address: String,
    /// Postal code
    #[arg(long)]
    pub zip: String,
    /// Total roof area in sq ft
    #[arg(long)]
    pub roof_area: f64,
    /// Owner e-mail
    #[arg(long)]
    pub email: String,
    /// Owner phone number
    #[arg(long)]
    pub phone: String,
}

impl From<AddArgs> for NewProperty {
    fn from(args: AddArgs) -> Self {
        NewProperty {
            address: args.address,
            zip: args.zip,
            roof_area: args.roof_area,
            email: args.email,
            phone: args.phone,
        }
    }
}

/// `token` subcommands.
#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Store an access token
    Set {
        /// The token
        token: String,
    },
    /// Remove the stored token
    Clear,
    /// Show the stored token, masked
    Show,
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Write a default config file
    Init {
        /// Where to write (defaults to the resolved config path)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}
