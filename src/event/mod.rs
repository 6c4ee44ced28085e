//! event
//!
//! The CI event that triggered this run.
//!
//! # Sources
//!
//! The event context is constructed once at process start from the standard
//! CI environment and, for pull request events, the event payload file:
//!
//! - `GITHUB_EVENT_NAME` - event kind ("push", "pull_request", ...)
//! - `GITHUB_REF` - the ref the workflow runs on (`refs/heads/...` or
//!   `refs/tags/...`)
//! - `GITHUB_REPOSITORY` - "owner/repo"
//! - `GITHUB_SHA` - the commit the workflow runs against
//! - `GITHUB_EVENT_PATH` - path to the JSON payload
//!   (`pull_request.base.ref`, `pull_request.head.ref`)
//!
//! The context is immutable after construction. A push to a tag ref, or any
//! event kind the gate does not handle, maps to [`EventKind::Other`]: a
//! deliberate "nothing to validate" state in which the active branch is
//! recorded as the integration branch.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::config::BranchConfig;

/// Errors constructing the event context. These are fatal: they describe a
/// broken CI environment, not a policy outcome.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("required environment variable '{0}' is not set")]
    MissingVar(&'static str),

    #[error("GITHUB_REPOSITORY '{0}' is not in 'owner/repo' form")]
    InvalidRepository(String),

    #[error("failed to read event payload '{path}': {source}")]
    PayloadRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse event payload: {0}")]
    PayloadParse(String),

    #[error("pull_request event payload has no pull_request object")]
    MissingPullRequest,
}

/// The kind of event the gate reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A push to a branch ref
    Push,
    /// A pull request event
    PullRequest,
    /// Anything else, including pushes to tag refs
    Other,
}

/// The repository the event belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// Parse an "owner/repo" slug.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidRepository` if the slug does not split
    /// into exactly two non-empty parts.
    pub fn parse(slug: &str) -> Result<Self, EventError> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(EventError::InvalidRepository(slug.to_string())),
        }
    }
}

/// The base and head of the pull request under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// The branch the PR wants to merge into
    pub base: String,
    /// The branch carrying the changes
    pub head: String,
}

/// Immutable context for the triggering event.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// What kind of event this is
    pub kind: EventKind,
    /// The branch the workflow runs on. For pull requests this is the head
    /// branch; for [`EventKind::Other`] it is recorded as the integration
    /// branch.
    pub branch: String,
    /// The repository under review
    pub repository: RepoId,
    /// The commit the workflow runs against
    pub sha: String,
    /// Present only for pull request events
    pub pull_request: Option<PullRequestRef>,
}

/// Payload shape for pull request events. Only the refs are read.
#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    base: RefPayload,
    head: RefPayload,
}

#[derive(Debug, Deserialize)]
struct RefPayload {
    #[serde(rename = "ref")]
    ref_name: String,
}

impl EventContext {
    /// Build the event context from the CI environment.
    ///
    /// # Errors
    ///
    /// Returns `EventError` when a required variable is missing or the
    /// pull request payload cannot be read or parsed.
    pub fn from_env(config: &BranchConfig) -> Result<Self, EventError> {
        let event_name = require_var("GITHUB_EVENT_NAME")?;
        let repository = RepoId::parse(&require_var("GITHUB_REPOSITORY")?)?;
        let sha = require_var("GITHUB_SHA")?;

        match event_name.as_str() {
            "push" => {
                let git_ref = require_var("GITHUB_REF")?;
                match branch_from_ref(&git_ref) {
                    Some(branch) => Ok(Self {
                        kind: EventKind::Push,
                        branch: branch.to_string(),
                        repository,
                        sha,
                        pull_request: None,
                    }),
                    // Tag pushes carry nothing for the gate to validate.
                    None => Ok(Self::other(config, repository, sha)),
                }
            }
            "pull_request" => {
                let payload_path = PathBuf::from(require_var("GITHUB_EVENT_PATH")?);
                let pr = read_pull_request(&payload_path)?;
                Ok(Self {
                    kind: EventKind::PullRequest,
                    branch: pr.head.clone(),
                    repository,
                    sha,
                    pull_request: Some(pr),
                })
            }
            _ => Ok(Self::other(config, repository, sha)),
        }
    }

    fn other(config: &BranchConfig, repository: RepoId, sha: String) -> Self {
        Self {
            kind: EventKind::Other,
            branch: config.develop.clone(),
            repository,
            sha,
            pull_request: None,
        }
    }
}

fn require_var(name: &'static str) -> Result<String, EventError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(EventError::MissingVar(name))
}

/// Extract a branch name from a push ref, or `None` for non-branch refs.
fn branch_from_ref(git_ref: &str) -> Option<&str> {
    git_ref.strip_prefix("refs/heads/")
}

/// Read the base/head refs from a pull request event payload file.
fn read_pull_request(path: &Path) -> Result<PullRequestRef, EventError> {
    let contents = fs::read_to_string(path).map_err(|source| EventError::PayloadRead {
        path: path.to_path_buf(),
        source,
    })?;

    let payload: EventPayload =
        serde_json::from_str(&contents).map_err(|e| EventError::PayloadParse(e.to_string()))?;

    let pr = payload.pull_request.ok_or(EventError::MissingPullRequest)?;

    Ok(PullRequestRef {
        base: pr.base.ref_name,
        head: pr.head.ref_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn repo_id_parses_owner_and_repo() {
        let id = RepoId::parse("octocat/hello-world").unwrap();
        assert_eq!(id.owner, "octocat");
        assert_eq!(id.repo, "hello-world");
    }

    #[test]
    fn repo_id_rejects_malformed_slugs() {
        assert!(RepoId::parse("no-slash").is_err());
        assert!(RepoId::parse("/repo").is_err());
        assert!(RepoId::parse("owner/").is_err());
    }

    #[test]
    fn branch_refs_resolve_to_branch_names() {
        assert_eq!(branch_from_ref("refs/heads/main"), Some("main"));
        assert_eq!(
            branch_from_ref("refs/heads/feature/login"),
            Some("feature/login")
        );
    }

    #[test]
    fn tag_refs_are_not_branches() {
        assert_eq!(branch_from_ref("refs/tags/v1.0.0"), None);
        assert_eq!(branch_from_ref("refs/pull/7/merge"), None);
    }

    #[test]
    fn payload_parsing_extracts_base_and_head() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pull_request": {{"base": {{"ref": "develop"}}, "head": {{"ref": "feature/x"}}}}}}"#
        )
        .unwrap();

        let pr = read_pull_request(file.path()).unwrap();
        assert_eq!(pr.base, "develop");
        assert_eq!(pr.head, "feature/x");
    }

    #[test]
    fn payload_without_pull_request_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"action": "opened"}}"#).unwrap();

        assert!(matches!(
            read_pull_request(file.path()),
            Err(EventError::MissingPullRequest)
        ));
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            read_pull_request(file.path()),
            Err(EventError::PayloadParse(_))
        ));
    }
}
