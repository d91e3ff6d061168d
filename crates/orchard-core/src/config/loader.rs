//! Configuration loading

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::types::Project;
use super::validation::validate_project;

/// File names probed when searching for a project file
const CONFIG_FILE_NAMES: &[&str] = &[
    ".orchard.yml",
    ".orchard.yaml",
    "orchard.yml",
    "orchard.yaml",
];

/// Load and validate a project file
pub fn load_project(path: &Path) -> Result<Project> {
    info!(path = %path.display(), "loading project file");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let project = parse_project(&content)?;

    debug!(path = %path.display(), apps = project.apps.len(), "project loaded and validated");
    Ok(project)
}

/// Load and validate a project from any reader
pub fn load_project_reader<R: Read>(mut reader: R) -> Result<Project> {
    let mut content = String::new();
    reader.read_to_string(&mut content).map_err(ConfigError::Io)?;
    parse_project(&content)
}

fn parse_project(content: &str) -> Result<Project> {
    let project: Project = serde_yaml::from_str(content).map_err(ConfigError::Yaml)?;
    validate_project(&project)?;
    Ok(project)
}

/// Render a project back to YAML
pub fn render_project(project: &Project) -> Result<String> {
    let yaml = serde_yaml::to_string(project).map_err(ConfigError::Yaml)?;
    Ok(yaml)
}

/// Find a project file in the given directory.
///
/// Checks each well-known name in order; the first match wins. Unlike
/// general-purpose tools there is no parent-directory walk: the project file
/// is expected to sit next to the repository root the release runs from.
pub fn find_project(dir: &Path) -> Option<PathBuf> {
    debug!(dir = %dir.display(), "searching for project file");

    for name in CONFIG_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.exists() {
            info!(path = %candidate.display(), "found project file");
            return Some(candidate);
        }
    }

    debug!("no project file found");
    None
}

/// Load a project from a directory, using the first well-known file name
pub fn load_project_from_dir(dir: &Path) -> Result<(Project, PathBuf)> {
    let path = find_project(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
    let project = load_project(&path)?;
    Ok((project, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"
MyApp:
  bundleId: com.example.myapp
  versions:
    platform: iOS
"#;

    #[test]
    fn test_load_valid_project() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".orchard.yml");
        std::fs::write(&path, VALID).unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.apps.len(), 1);
    }

    #[test]
    fn test_load_missing_project() {
        let err = load_project(Path::new("testdata/doesnotexist.yml"));
        assert!(err.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".orchard.yml");
        std::fs::write(&path, "apps: [not: {valid").unwrap();

        assert!(load_project(&path).is_err());
    }

    #[test]
    fn test_rendered_project_reloads() {
        let project = load_project_reader(VALID.as_bytes()).unwrap();
        let rendered = render_project(&project).unwrap();
        let reloaded = load_project_reader(rendered.as_bytes()).unwrap();
        assert_eq!(project, reloaded);
    }

    #[test]
    fn test_broken_reader() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken"))
            }
        }

        assert!(load_project_reader(FailingReader).is_err());
    }

    #[test]
    fn test_find_project_prefers_hidden_file() {
        let temp = TempDir::new().unwrap();
        let hidden = temp.path().join(".orchard.yml");
        let plain = temp.path().join("orchard.yml");
        std::fs::write(&hidden, VALID).unwrap();
        std::fs::write(&plain, VALID).unwrap();

        assert_eq!(find_project(temp.path()).unwrap(), hidden);
    }

    #[test]
    fn test_load_project_from_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("orchard.yaml"), VALID).unwrap();

        let (project, path) = load_project_from_dir(temp.path()).unwrap();
        assert_eq!(project.apps.len(), 1);
        assert!(path.ends_with("orchard.yaml"));
    }
}
