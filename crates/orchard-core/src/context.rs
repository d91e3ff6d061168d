//! Per-run state threaded through every pipeline step

use crate::config::Project;
use crate::error::{CoreError, Result};

/// App Store Connect API credentials, resolved from the environment
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Key identifier from the API keys page
    pub key_id: String,

    /// Issuer identifier for the team
    pub issuer_id: String,

    /// Private key content in PEM format
    pub private_key: String,
}

/// State for a single release run.
///
/// Built once by the CLI, filled in by early pipeline steps (credentials,
/// version), and read by the publish steps. The project configuration is
/// read-only for the duration of the run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Parsed project configuration
    pub project: Project,

    /// Version string being released, e.g. "1.4.2"
    pub version: String,

    /// API credentials, set by the env step
    pub credentials: Option<Credentials>,

    /// Maximum concurrent remote calls per task group; zero means unbounded
    pub max_processes: usize,

    /// Skip the final submission for review
    pub skip_submit: bool,

    /// Skip territory availability and price schedule updates
    pub skip_update_pricing: bool,

    /// Skip metadata updates, only creating the version and submitting
    pub skip_update_metadata: bool,
}

impl Context {
    /// Create a context for the given project
    pub fn new(project: Project) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    /// The resolved credentials, or an error if the env step has not run
    pub fn credentials(&self) -> Result<&Credentials> {
        self.credentials
            .as_ref()
            .ok_or_else(|| CoreError::other("credentials have not been loaded"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_missing() {
        let ctx = Context::new(Project::default());
        assert!(ctx.credentials().is_err());
    }

    #[test]
    fn test_credentials_present() {
        let mut ctx = Context::new(Project::default());
        ctx.credentials = Some(Credentials {
            key_id: "KEY".to_string(),
            issuer_id: "ISSUER".to_string(),
            private_key: "PEM".to_string(),
        });
        assert_eq!(ctx.credentials().unwrap().key_id, "KEY");
    }
}
