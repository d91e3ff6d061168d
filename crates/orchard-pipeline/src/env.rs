//! Credential resolution from the environment

use async_trait::async_trait;
use orchard_core::{Context, CoreError, Credentials};
use tracing::debug;

use crate::{Result, Step};

/// Environment variable holding the API key identifier
const ENV_KEY_ID: &str = "ASC_KEY_ID";
/// Environment variable holding the issuer identifier
const ENV_ISSUER_ID: &str = "ASC_ISSUER_ID";
/// Environment variable holding the path to the .p8 private key
const ENV_PRIVATE_KEY_PATH: &str = "ASC_PRIVATE_KEY_PATH";

/// Resolves App Store Connect credentials from the environment
#[derive(Debug, Default)]
pub struct EnvStep;

#[async_trait]
impl Step for EnvStep {
    fn name(&self) -> &str {
        "loading environment variables"
    }

    async fn run(&self, ctx: &mut Context) -> Result<()> {
        let key_id = required_env(ENV_KEY_ID)?;
        let issuer_id = required_env(ENV_ISSUER_ID)?;
        let key_path = required_env(ENV_PRIVATE_KEY_PATH)?;

        let private_key = std::fs::read_to_string(&key_path).map_err(CoreError::Io)?;
        debug!(key_path, "loaded private key");

        ctx.credentials = Some(Credentials {
            key_id,
            issuer_id,
            private_key,
        });
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(CoreError::MissingEnvVar(name.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard_core::config::Project;

    // Environment mutation is process-global, so both scenarios share one
    // test body instead of racing each other.
    #[tokio::test]
    async fn test_env_step() {
        let temp = tempfile::TempDir::new().unwrap();
        let key_path = temp.path().join("AuthKey_TEST.p8");
        std::fs::write(&key_path, "PEM CONTENT").unwrap();

        std::env::set_var(ENV_KEY_ID, "KEY");
        std::env::set_var(ENV_ISSUER_ID, "ISSUER");
        std::env::set_var(ENV_PRIVATE_KEY_PATH, key_path.to_str().unwrap());

        let mut ctx = Context::new(Project::default());
        EnvStep.run(&mut ctx).await.unwrap();

        let credentials = ctx.credentials().unwrap();
        assert_eq!(credentials.key_id, "KEY");
        assert_eq!(credentials.issuer_id, "ISSUER");
        assert_eq!(credentials.private_key, "PEM CONTENT");

        // A missing variable is a named error.
        std::env::remove_var(ENV_KEY_ID);
        let mut ctx = Context::new(Project::default());
        let err = EnvStep.run(&mut ctx).await.unwrap_err();
        assert!(err.to_string().contains(ENV_KEY_ID));

        std::env::remove_var(ENV_ISSUER_ID);
        std::env::remove_var(ENV_PRIVATE_KEY_PATH);
    }
}
