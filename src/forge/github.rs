//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Authentication
//!
//! A static bearer token (the CI job's `GITHUB_TOKEN`). A missing token is
//! only an error once a call is attempted: validation-only runs never touch
//! the network.
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation returns
//! `ForgeError::RateLimited` when limits are hit and does not retry.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use super::traits::{Branch, CreatePrRequest, Forge, ForgeError, PullRequest, Tag};
use crate::event::RepoId;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "gitflow-gate";

/// GitHub's maximum page size; one page is queried per listing call.
const PER_PAGE: u32 = 100;

/// GitHub forge implementation.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Bearer token, if the environment provided one
    token: Option<String>,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("has_token", &self.token.is_some())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubForge {
    /// Create a new GitHub forge for a repository.
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token; `None` defers the auth failure to first use
    /// * `repository` - Owner and repo name
    pub fn new(token: Option<String>, repository: &RepoId) -> Self {
        Self::with_api_base(token, repository, DEFAULT_API_BASE)
    }

    /// Create a GitHub forge with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations (and tests against a
    /// local mock server).
    pub fn with_api_base(
        token: Option<String>,
        repository: &RepoId,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token,
            owner: repository.owner.clone(),
            repo: repository.repo.clone(),
            api_base: api_base.into(),
        }
    }

    /// Build common headers for API requests.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::AuthRequired` if no token is configured.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let token = self.token.as_ref().ok_or(ForgeError::AuthRequired)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ForgeError::AuthFailed("token contains invalid characters".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        // Extract permission headers before consuming the response body.
        // GitHub Apps use X-Accepted-GitHub-Permissions, classic OAuth uses
        // X-Accepted-OAuth-Scopes.
        let headers = response.headers();
        let required_permissions = headers
            .get("X-Accepted-GitHub-Permissions")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let required_scopes = headers
            .get("X-Accepted-OAuth-Scopes")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Try to get error message from body
        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN => {
                let mut err_msg = format!("Permission denied: {}", message);
                if let Some(perms) = required_permissions {
                    if !perms.is_empty() {
                        err_msg.push_str(&format!(" [required: {}]", perms));
                    }
                } else if let Some(scopes) = required_scopes {
                    if !scopes.is_empty() {
                        err_msg.push_str(&format!(" [required scopes: {}]", scopes));
                    }
                }
                ForgeError::AuthFailed(err_msg)
            }
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ForgeError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        self.handle_response(response).await
    }

    async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ForgeError> {
        let response = self
            .client
            .post(url)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list_branches(&self) -> Result<Vec<Branch>, ForgeError> {
        let url = format!("{}?per_page={}", self.repo_url("branches"), PER_PAGE);
        let branches: Vec<GitHubBranch> = self.get_json(&url).await?;
        Ok(branches.into_iter().map(Into::into).collect())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ForgeError> {
        let url = format!("{}?per_page={}", self.repo_url("tags"), PER_PAGE);
        let tags: Vec<GitHubTag> = self.get_json(&url).await?;
        Ok(tags.into_iter().map(|t| Tag { name: t.name }).collect())
    }

    async fn create_tag_object(
        &self,
        tag: &str,
        message: &str,
        commit_sha: &str,
    ) -> Result<String, ForgeError> {
        let url = self.repo_url("git/tags");
        let body = CreateTagBody {
            tag,
            message,
            object: commit_sha,
            object_type: "commit",
        };
        let created: GitHubObject = self.post_json(&url, &body).await?;
        Ok(created.sha)
    }

    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<(), ForgeError> {
        let url = self.repo_url("git/refs");
        let body = CreateRefBody {
            git_ref: ref_name,
            sha,
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response, status).await
        }
    }

    async fn find_open_pr(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Option<PullRequest>, ForgeError> {
        // GitHub requires owner:branch format for the head filter.
        let url = format!(
            "{}?state=open&base={}&head={}:{}",
            self.repo_url("pulls"),
            base,
            self.owner,
            head
        );
        let prs: Vec<GitHubPullRequest> = self.get_json(&url).await?;
        Ok(prs.into_iter().next().map(Into::into))
    }

    async fn create_pr(&self, request: CreatePrRequest) -> Result<PullRequest, ForgeError> {
        let url = self.repo_url("pulls");
        let body = CreatePrBody {
            head: &request.head,
            base: &request.base,
            title: &request.title,
            body: request.body.as_deref(),
        };
        let pr: GitHubPullRequest = self.post_json(&url, &body).await?;
        Ok(pr.into())
    }
}

// ============================================================================
// Request/response body types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitHubBranch {
    name: String,
    commit: GitHubCommitRef,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitRef {
    sha: String,
}

impl From<GitHubBranch> for Branch {
    fn from(b: GitHubBranch) -> Self {
        Branch {
            name: b.name,
            commit_sha: b.commit.sha,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GitHubTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GitHubObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateTagBody<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRefBody<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePrBody<'a> {
    head: &'a str,
    base: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GitHubPullRequest {
    number: u64,
    html_url: String,
    title: String,
    head: GitHubPrRef,
    base: GitHubPrRef,
}

#[derive(Debug, Deserialize)]
struct GitHubPrRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

impl From<GitHubPullRequest> for PullRequest {
    fn from(pr: GitHubPullRequest) -> Self {
        PullRequest {
            number: pr.number,
            url: pr.html_url,
            head: pr.head.ref_name,
            base: pr.base.ref_name,
            title: pr.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoId {
        RepoId {
            owner: "octocat".to_string(),
            repo: "hello-world".to_string(),
        }
    }

    #[test]
    fn forge_name_is_github() {
        assert_eq!(GitHubForge::new(None, &repo()).name(), "github");
    }

    #[test]
    fn repo_url_includes_owner_and_repo() {
        let forge = GitHubForge::new(Some("t".into()), &repo());
        assert_eq!(
            forge.repo_url("pulls"),
            "https://api.github.com/repos/octocat/hello-world/pulls"
        );
    }

    #[test]
    fn missing_token_is_auth_required() {
        let forge = GitHubForge::new(None, &repo());
        assert!(matches!(forge.headers(), Err(ForgeError::AuthRequired)));
    }

    #[test]
    fn debug_does_not_leak_the_token() {
        let forge = GitHubForge::new(Some("ghp_secret".into()), &repo());
        let rendered = format!("{:?}", forge);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("has_token: true"));
    }

    #[test]
    fn branch_response_maps_to_domain_type() {
        let raw: GitHubBranch = serde_json::from_str(
            r#"{"name": "main", "commit": {"sha": "abc123", "url": "ignored"}}"#,
        )
        .unwrap();
        let branch: Branch = raw.into();
        assert_eq!(branch.name, "main");
        assert_eq!(branch.commit_sha, "abc123");
    }
}
