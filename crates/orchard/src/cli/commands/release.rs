//! Release command: publish App Store metadata and submit for review

use clap::Args;
use console::style;
use orchard_pipeline::{AppStorePublishStep, EnvStep, GitVersionStep, Step};

use crate::cli::Cli;

use super::{run_with_deadline, PublishArgs};

/// Publish App Store metadata and submit for review
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    #[command(flatten)]
    pub args: PublishArgs,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(cli))
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut ctx = self.args.build_context()?;

        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(EnvStep),
            Box::new(GitVersionStep::default()),
            Box::new(AppStorePublishStep::default()),
        ];

        run_with_deadline(self.args.timeout, &steps, &mut ctx).await?;

        if !cli.quiet {
            println!(
                "{} Published {} app(s) at version {}",
                style("✓").green().bold(),
                ctx.project.apps.len(),
                style(&ctx.version).bold()
            );
        }
        Ok(())
    }
}
