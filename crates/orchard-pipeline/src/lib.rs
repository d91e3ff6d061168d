//! The Orchard publishing pipeline.
//!
//! A release is an ordered sequence of named steps run against one shared
//! [`Context`]: resolve credentials, determine the version, then publish.
//! A step may decline to run by returning [`PipelineError::Skip`], which is
//! logged and does not fail the pipeline; any other error stops the run.

pub mod env;
pub mod git_version;
pub mod store;
pub mod testflight;

use async_trait::async_trait;
use orchard_core::Context;
use thiserror::Error;
use tracing::info;

pub use env::EnvStep;
pub use git_version::GitVersionStep;
pub use store::AppStorePublishStep;
pub use testflight::TestflightPublishStep;

/// Result type for pipeline steps
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors surfaced by pipeline steps
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The step chose not to run; logged, never fatal
    #[error("skipped: {0}")]
    Skip(String),

    /// Core errors (configuration, git, environment)
    #[error(transparent)]
    Core(#[from] orchard_core::CoreError),

    /// Catalog service errors
    #[error(transparent)]
    Connect(#[from] orchard_connect::ConnectError),
}

impl PipelineError {
    /// Create a skip with a reason
    pub fn skip<S: Into<String>>(reason: S) -> Self {
        Self::Skip(reason.into())
    }
}

/// One named pipeline step
#[async_trait]
pub trait Step: Send + Sync {
    /// Human-readable step name for logs
    fn name(&self) -> &str;

    /// Run the step against the shared context
    async fn run(&self, ctx: &mut Context) -> Result<()>;
}

/// Run steps in order, stopping at the first failure.
///
/// A [`PipelineError::Skip`] from a step is reported and the pipeline
/// continues with the next step.
pub async fn run_steps(steps: &[Box<dyn Step>], ctx: &mut Context) -> Result<()> {
    for step in steps {
        info!(step = step.name(), "running");
        match step.run(ctx).await {
            Ok(()) => {}
            Err(PipelineError::Skip(reason)) => {
                info!(step = step.name(), reason, "skipped");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard_core::config::Project;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStep {
        name: &'static str,
        counter: Arc<AtomicUsize>,
        outcome: fn() -> Result<()>,
    }

    #[async_trait]
    impl Step for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        async fn run(&self, _ctx: &mut Context) -> Result<()> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn step(
        name: &'static str,
        counter: &Arc<AtomicUsize>,
        outcome: fn() -> Result<()>,
    ) -> Box<dyn Step> {
        Box::new(CountingStep {
            name,
            counter: Arc::clone(counter),
            outcome,
        })
    }

    #[tokio::test]
    async fn test_skip_does_not_stop_the_pipeline() {
        let counter = Arc::new(AtomicUsize::new(0));
        let steps = vec![
            step("first", &counter, || Ok(())),
            step("second", &counter, || {
                Err(PipelineError::skip("nothing to do"))
            }),
            step("third", &counter, || Ok(())),
        ];

        let mut ctx = Context::new(Project::default());
        run_steps(&steps, &mut ctx).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_error_stops_the_pipeline() {
        let counter = Arc::new(AtomicUsize::new(0));
        let steps = vec![
            step("first", &counter, || Ok(())),
            step("second", &counter, || {
                Err(orchard_core::CoreError::other("broken").into())
            }),
            step("third", &counter, || Ok(())),
        ];

        let mut ctx = Context::new(Project::default());
        assert!(run_steps(&steps, &mut ctx).await.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
