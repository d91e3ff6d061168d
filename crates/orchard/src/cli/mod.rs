//! CLI definition and command handling

pub mod commands;

use clap::{Parser, Subcommand};

use commands::{BetaCommand, CheckCommand, InitCommand, ReleaseCommand};

/// Orchard - Declarative App Store and TestFlight publishing
#[derive(Debug, Parser)]
#[command(name = "orchard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a starter project file
    Init(InitCommand),

    /// Load and validate the project file
    Check(CheckCommand),

    /// Publish App Store metadata and submit for review
    Release(ReleaseCommand),

    /// Publish TestFlight configuration and submit for beta review
    Beta(BetaCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Check(ref cmd) => cmd.execute(&self),
            Commands::Release(ref cmd) => cmd.execute(&self),
            Commands::Beta(ref cmd) => cmd.execute(&self),
        }
    }
}
