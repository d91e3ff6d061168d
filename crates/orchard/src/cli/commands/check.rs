//! Check command: load and validate the project file

use std::path::PathBuf;

use clap::Args;
use console::style;

use crate::cli::Cli;

use super::load_project;

/// Load and validate the project file
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Path to the project file; searched for in the working directory when
    /// omitted
    #[arg(short = 'f', long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let project = load_project(&self.config)?;

        if !cli.quiet {
            println!(
                "{} Project file is valid ({} app(s))",
                style("✓").green().bold(),
                project.apps.len()
            );
            for (name, app) in &project.apps {
                println!(
                    "  {} {} — {} store locale(s), {} version locale(s), {} beta group(s)",
                    style(name).bold(),
                    style(&app.bundle_id).dim(),
                    app.localizations.len(),
                    app.versions.localizations.len(),
                    app.testflight.beta_groups.len()
                );
            }
        }
        Ok(())
    }
}
