//! Beta command: publish TestFlight configuration

use clap::Args;
use console::style;
use orchard_pipeline::{EnvStep, GitVersionStep, Step, TestflightPublishStep};

use crate::cli::Cli;

use super::{run_with_deadline, PublishArgs};

/// Publish TestFlight configuration and submit for beta review
#[derive(Debug, Args)]
pub struct BetaCommand {
    #[command(flatten)]
    pub args: PublishArgs,
}

impl BetaCommand {
    /// Execute the beta command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(cli))
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut ctx = self.args.build_context()?;

        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(EnvStep),
            Box::new(GitVersionStep::default()),
            Box::new(TestflightPublishStep::default()),
        ];

        run_with_deadline(self.args.timeout, &steps, &mut ctx).await?;

        if !cli.quiet {
            println!(
                "{} Published TestFlight configuration for {} app(s) at version {}",
                style("✓").green().bold(),
                ctx.project.apps.len(),
                style(&ctx.version).bold()
            );
        }
        Ok(())
    }
}
