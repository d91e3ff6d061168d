//! Configuration validation

use tracing::warn;

use crate::error::{ConfigError, Result};

use super::types::Project;

/// Validate a project configuration.
///
/// Structural problems that would make every sync operation fail are errors.
/// Entries that would merely be skipped during sync (a beta group without a
/// name, a tester without an email) are reported as warnings here so they
/// surface before a release is attempted.
pub fn validate_project(project: &Project) -> Result<()> {
    if project.apps.is_empty() {
        return Err(ConfigError::MissingField("apps".to_string()).into());
    }

    for (name, app) in &project.apps {
        if app.bundle_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("{name}.bundleId"),
                message: "bundle identifier must not be empty".to_string(),
            }
            .into());
        }

        if let Some(categories) = &app.categories {
            if categories.primary_subcategories.len() > 2 {
                return Err(ConfigError::InvalidValue {
                    field: format!("{name}.categories.primarySubcategories"),
                    message: "at most two subcategories are allowed".to_string(),
                }
                .into());
            }
            if categories.secondary_subcategories.len() > 2 {
                return Err(ConfigError::InvalidValue {
                    field: format!("{name}.categories.secondarySubcategories"),
                    message: "at most two subcategories are allowed".to_string(),
                }
                .into());
            }
        }

        for locale in app.localizations.keys() {
            if locale.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("{name}.localizations"),
                    message: "locale keys must not be empty".to_string(),
                }
                .into());
            }
        }

        for group in &app.testflight.beta_groups {
            if group.name.is_empty() {
                warn!(app = %name, "beta group has no name and will be skipped during sync");
            }
            for tester in &group.testers {
                if tester.email.is_empty() {
                    warn!(
                        app = %name,
                        group = %group.name,
                        "beta tester has no email and will be skipped during sync"
                    );
                }
            }
        }
        for tester in &app.testflight.beta_testers {
            if tester.email.is_empty() {
                warn!(app = %name, "beta tester has no email and will be skipped during sync");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{App, BetaGroup, Categories};
    use std::collections::BTreeMap;

    fn valid_project() -> Project {
        let mut apps = BTreeMap::new();
        apps.insert(
            "MyApp".to_string(),
            App {
                bundle_id: "com.example.myapp".to_string(),
                ..App::default()
            },
        );
        Project { apps }
    }

    #[test]
    fn test_valid_project_passes() {
        assert!(validate_project(&valid_project()).is_ok());
    }

    #[test]
    fn test_empty_project_fails() {
        assert!(validate_project(&Project::default()).is_err());
    }

    #[test]
    fn test_missing_bundle_id_fails() {
        let mut project = valid_project();
        project.apps.get_mut("MyApp").unwrap().bundle_id = String::new();
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn test_too_many_subcategories_fails() {
        let mut project = valid_project();
        project.apps.get_mut("MyApp").unwrap().categories = Some(Categories {
            primary: "GAMES".to_string(),
            primary_subcategories: vec![
                "GAMES_ACTION".to_string(),
                "GAMES_ARCADE".to_string(),
                "GAMES_BOARD".to_string(),
            ],
            ..Categories::default()
        });
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn test_unnamed_beta_group_is_not_an_error() {
        let mut project = valid_project();
        project
            .apps
            .get_mut("MyApp")
            .unwrap()
            .testflight
            .beta_groups
            .push(BetaGroup::default());
        assert!(validate_project(&project).is_ok());
    }
}
