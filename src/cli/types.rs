//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{boot, link, login, profile, register, share};

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(name = "inspect")]
#[command(about = "Inspect - news annotation client core", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .inspect/config.yaml and .inspect/local.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cold-start the client and report where navigation ends up
    Boot(boot::BootArgs),

    /// Deliver a share-sheet item to a running client
    Share(share::ShareArgs),

    /// Inspect how a URL would be handled
    Link(link::LinkArgs),

    /// Sign in and persist the session
    Login(login::LoginArgs),

    /// Create an account and sign in
    Register(register::RegisterArgs),

    /// Sign out and forget the persisted session
    Logout,

    /// Show a user profile
    Profile(profile::ProfileArgs),
}
