//! forge::traits
//!
//! Forge trait definition for interacting with the remote hosting service.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` to handle API errors gracefully. The gate
//! never retries a forge call: idempotency comes from existence checks
//! before each create, so a re-run after a partial failure converges.
//!
//! # Example
//!
//! ```ignore
//! use gitflow_gate::forge::{Forge, CreatePrRequest};
//!
//! async fn open_follow_up(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     let pr = forge
//!         .create_pr(CreatePrRequest {
//!             head: "bugfix/post-v2.0.0".to_string(),
//!             base: "develop".to_string(),
//!             title: "Post-release 2.0.0".to_string(),
//!             body: None,
//!         })
//!         .await?;
//!     println!("Created PR #{}: {}", pr.number, pr.url);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from forge operations.
///
/// Authentication and authorization failures are fatal to the run and
/// propagate unchanged; they are environment problems, not policy outcomes.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// A remote branch and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Branch name (without the `refs/heads/` prefix)
    pub name: String,
    /// SHA of the commit the branch points at
    pub commit_sha: String,
}

/// A remote tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name (without the `refs/tags/` prefix)
    pub name: String,
}

/// Request to create a pull request.
#[derive(Debug, Clone)]
pub struct CreatePrRequest {
    /// Head branch name (the branch with changes)
    pub head: String,
    /// Base branch name (the branch to merge into)
    pub base: String,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
}

/// Pull request information returned from the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR URL (web URL for viewing)
    pub url: String,
    /// Head branch name
    pub head: String,
    /// Base branch name
    pub base: String,
    /// PR title
    pub title: String,
}

/// The Forge trait for interacting with the remote hosting service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. The gate treats
/// `AuthRequired` / `AuthFailed` as fatal and does not retry anything.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// List the repository's branches with their current commits.
    async fn list_branches(&self) -> Result<Vec<Branch>, ForgeError>;

    /// List the repository's tags.
    async fn list_tags(&self) -> Result<Vec<Tag>, ForgeError>;

    /// Create an annotated tag object against a commit.
    ///
    /// Returns the SHA of the created tag object. The tag only becomes
    /// reachable once [`create_ref`](Self::create_ref) is called for it.
    async fn create_tag_object(
        &self,
        tag: &str,
        message: &str,
        commit_sha: &str,
    ) -> Result<String, ForgeError>;

    /// Create a fully qualified ref (`refs/tags/...` or `refs/heads/...`)
    /// pointing at the given SHA.
    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<(), ForgeError>;

    /// Find an open pull request with the given base and head, if any.
    ///
    /// Used for idempotent PR creation: at most one open follow-up PR may
    /// exist for a given base/head pairing.
    async fn find_open_pr(&self, base: &str, head: &str)
        -> Result<Option<PullRequest>, ForgeError>;

    /// Create a new pull request.
    ///
    /// # Errors
    ///
    /// - `AuthRequired` if no authentication is configured
    /// - `AuthFailed` if the token is invalid or lacks permissions
    /// - `ApiError` with status 422 if validation fails (e.g., head doesn't exist)
    async fn create_pr(&self, request: CreatePrRequest) -> Result<PullRequest, ForgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forge_error_display() {
        assert_eq!(
            format!("{}", ForgeError::AuthRequired),
            "authentication required"
        );
        assert_eq!(
            format!("{}", ForgeError::AuthFailed("expired token".into())),
            "authentication failed: expired token"
        );
        assert_eq!(
            format!("{}", ForgeError::NotFound("branch 'main'".into())),
            "not found: branch 'main'"
        );
        assert_eq!(format!("{}", ForgeError::RateLimited), "rate limited");
        assert_eq!(
            format!(
                "{}",
                ForgeError::ApiError {
                    status: 422,
                    message: "Validation failed".into()
                }
            ),
            "API error: 422 - Validation failed"
        );
        assert_eq!(
            format!("{}", ForgeError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
    }
}
