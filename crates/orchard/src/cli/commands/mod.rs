//! CLI commands

mod beta;
mod check;
mod init;
mod release;

pub use beta::BetaCommand;
pub use check::CheckCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use orchard_core::{config, Context};
use orchard_pipeline::{run_steps, Step};

/// Flags shared by the publishing commands
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Apps to publish; all configured apps when omitted
    pub apps: Vec<String>,

    /// Path to the project file; searched for in the working directory when
    /// omitted
    #[arg(short = 'f', long)]
    pub config: Option<PathBuf>,

    /// Version to publish instead of the latest git tag
    #[arg(long, value_name = "VERSION")]
    pub set_version: Option<String>,

    /// Do not submit for review after syncing
    #[arg(long)]
    pub skip_submit: bool,

    /// Do not update territory availability or price schedules
    #[arg(long)]
    pub skip_update_pricing: bool,

    /// Only create the version and submit, without touching metadata
    #[arg(long)]
    pub skip_update_metadata: bool,

    /// Maximum concurrent API calls
    #[arg(long, default_value_t = default_processes())]
    pub max_processes: usize,

    /// Abort publishing after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

fn default_processes() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl PublishArgs {
    /// Load the project and build the run context from these flags
    pub fn build_context(&self) -> anyhow::Result<Context> {
        let mut project = load_project(&self.config)?;

        let selected = project.apps_matching(&self.apps, true);
        if selected.is_empty() {
            anyhow::bail!("no configured apps match the requested names");
        }
        project.apps.retain(|name, _| selected.contains(name));

        let mut ctx = Context::new(project);
        ctx.version = self.set_version.clone().unwrap_or_default();
        ctx.max_processes = self.max_processes;
        ctx.skip_submit = self.skip_submit;
        ctx.skip_update_pricing = self.skip_update_pricing;
        ctx.skip_update_metadata = self.skip_update_metadata;
        Ok(ctx)
    }
}

/// Load a project from an explicit path or by searching the working
/// directory
pub(crate) fn load_project(config_path: &Option<PathBuf>) -> anyhow::Result<config::Project> {
    match config_path {
        Some(path) => Ok(config::load_project(path)?),
        None => {
            let cwd = std::env::current_dir()?;
            let (project, path) = config::load_project_from_dir(&cwd)?;
            tracing::debug!(path = %path.display(), "using project file");
            Ok(project)
        }
    }
}

/// Run the pipeline, bounded by the caller's deadline when one was given.
/// The sync core itself defines no timeout.
pub(crate) async fn run_with_deadline(
    timeout_secs: Option<u64>,
    steps: &[Box<dyn Step>],
    ctx: &mut Context,
) -> anyhow::Result<()> {
    match timeout_secs {
        Some(secs) => {
            tokio::time::timeout(Duration::from_secs(secs), run_steps(steps, ctx))
                .await
                .map_err(|_| anyhow::anyhow!("publishing timed out after {secs} seconds"))??;
        }
        None => run_steps(steps, ctx).await?,
    }
    Ok(())
}
