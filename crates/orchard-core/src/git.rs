//! Git tag introspection for version discovery

use std::path::Path;

use git2::{Repository, StatusOptions};
use tracing::debug;

use crate::error::{GitError, Result};

/// The highest semantic version tagged in the repository.
///
/// Tags may carry a leading `v`; the returned string never does.
pub fn latest_version_tag(repo_path: &Path) -> Result<String> {
    let repo = Repository::discover(repo_path)
        .map_err(|_| GitError::NotARepository(repo_path.to_path_buf()))?;

    let tags = repo.tag_names(None).map_err(GitError::Git2)?;

    let mut latest: Option<semver::Version> = None;
    for tag in tags.iter().flatten() {
        let candidate = tag.strip_prefix('v').unwrap_or(tag);
        if let Ok(version) = semver::Version::parse(candidate) {
            debug!(tag, "found version tag");
            if latest.as_ref().map_or(true, |current| version > *current) {
                latest = Some(version);
            }
        }
    }

    latest
        .map(|v| v.to_string())
        .ok_or_else(|| GitError::NoVersionTags.into())
}

/// Whether the worktree has uncommitted tracked changes
pub fn is_dirty(repo_path: &Path) -> Result<bool> {
    let repo = Repository::discover(repo_path)
        .map_err(|_| GitError::NotARepository(repo_path.to_path_buf()))?;

    let mut options = StatusOptions::new();
    options.include_untracked(false).include_ignored(false);

    let statuses = repo.statuses(Some(&mut options)).map_err(GitError::Git2)?;
    Ok(!statuses.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo_with_tags(tags: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        let sig = repo.signature().unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        let commit_id = repo
            .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
        let commit = repo.find_object(commit_id, None).unwrap();

        for tag in tags {
            repo.tag_lightweight(tag, &commit, false).unwrap();
        }

        temp
    }

    #[test]
    fn test_latest_version_tag() {
        let temp = init_repo_with_tags(&["v1.0.0", "v1.2.0", "v1.1.3", "not-a-version"]);
        assert_eq!(latest_version_tag(temp.path()).unwrap(), "1.2.0");
    }

    #[test]
    fn test_bare_version_tags() {
        let temp = init_repo_with_tags(&["0.3.1", "0.10.0"]);
        assert_eq!(latest_version_tag(temp.path()).unwrap(), "0.10.0");
    }

    #[test]
    fn test_no_version_tags() {
        let temp = init_repo_with_tags(&[]);
        assert!(latest_version_tag(temp.path()).is_err());
    }

    #[test]
    fn test_not_a_repository() {
        let temp = TempDir::new().unwrap();
        assert!(latest_version_tag(temp.path()).is_err());
    }
}
