//! Version discovery from git tags

use std::path::PathBuf;

use async_trait::async_trait;
use orchard_core::{git, Context};
use tracing::{info, warn};

use crate::{PipelineError, Result, Step};

/// Fills in the release version from the repository's latest semver tag.
///
/// Skipped when a version was already provided on the command line.
#[derive(Debug, Default)]
pub struct GitVersionStep {
    repo_path: Option<PathBuf>,
}

impl GitVersionStep {
    /// Look up tags in a specific repository instead of the working directory
    pub fn with_repo_path(repo_path: PathBuf) -> Self {
        Self {
            repo_path: Some(repo_path),
        }
    }
}

#[async_trait]
impl Step for GitVersionStep {
    fn name(&self) -> &str {
        "determining version from git"
    }

    async fn run(&self, ctx: &mut Context) -> Result<()> {
        if !ctx.version.is_empty() {
            return Err(PipelineError::skip("version provided explicitly"));
        }

        let repo_path = match &self.repo_path {
            Some(path) => path.clone(),
            None => std::env::current_dir().map_err(orchard_core::CoreError::Io)?,
        };

        match git::is_dirty(&repo_path) {
            Ok(true) => warn!("worktree has uncommitted changes"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "could not determine worktree state"),
        }

        let version = git::latest_version_tag(&repo_path)?;
        info!(version, "using version from latest tag");
        ctx.version = version;
        Ok(())
    }
}
