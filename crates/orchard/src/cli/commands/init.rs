//! Init command: generate a starter project file

use std::path::PathBuf;

use clap::Args;
use console::style;

use crate::cli::Cli;

/// A commented starter project file.
const STARTER_TEMPLATE: &str = r#"# Orchard project file, generated by orchard init.
# Check this file into your repository so changes to your apps' store
# configuration are versioned alongside the code.
#
# Credentials are read from the environment at publish time:
#   ASC_KEY_ID, ASC_ISSUER_ID, ASC_PRIVATE_KEY_PATH

MyApp:
  bundleId: com.example.myapp
  primaryLocale: en-US
  localizations:
    en-US:
      name: My App
      subtitle: Everything in one place
  versions:
    platform: iOS
    copyright: 2026 Example Corp.
    localizations:
      en-US:
        description: A longer description of what the app does.
        keywords: productivity,tasks
        whatsNew: Bug fixes and performance improvements.
        screenshotSets:
          APP_IPHONE_65:
            - path: screenshots/iphone65/home.png
  testflight:
    localizations:
      en-US:
        description: What beta testers should know.
        feedbackEmail: beta@example.com
    betaGroups:
      - name: External Testers
        feedbackEnabled: true
        testers:
          - email: tester@example.com
            firstName: Test
            lastName: Er
"#;

/// Generate a starter project file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Path of the project file to create
    #[arg(short = 'f', long, default_value = ".orchard.yml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        if self.config.exists() && !self.force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                self.config.display()
            );
        }

        std::fs::write(&self.config, STARTER_TEMPLATE)?;

        if !cli.quiet {
            println!(
                "{} Wrote {}",
                style("✓").green().bold(),
                style(self.config.display()).bold()
            );
            println!("Edit it to fit your apps, then run {}.", style("orchard check").bold());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use orchard_core::config::load_project_reader;

    #[test]
    fn test_starter_template_is_a_valid_project() {
        let project = load_project_reader(super::STARTER_TEMPLATE.as_bytes()).unwrap();
        let app = project.apps.get("MyApp").unwrap();
        assert_eq!(app.bundle_id, "com.example.myapp");
        assert_eq!(app.testflight.beta_groups.len(), 1);
    }
}
