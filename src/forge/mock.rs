//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge keeps branches, tags, tag objects, and PRs in memory and
//! allows configuring failure scenarios per operation. `create_ref` mutates
//! the in-memory listings, so idempotence of the post-release sequence can
//! be asserted by running it twice and counting what exists afterwards.
//!
//! # Example
//!
//! ```
//! use gitflow_gate::forge::mock::MockForge;
//! use gitflow_gate::forge::Forge;
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new().with_branch("main", "abc123");
//!
//! let branches = forge.list_branches().await.unwrap();
//! assert_eq!(branches[0].name, "main");
//!
//! forge.create_ref("refs/heads/topic", "abc123").await.unwrap();
//! assert_eq!(forge.branch_names(), vec!["main", "topic"]);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{Branch, CreatePrRequest, Forge, ForgeError, PullRequest, Tag};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

/// A created (possibly unreachable) tag object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagObject {
    pub tag: String,
    pub message: String,
    pub commit_sha: String,
    pub sha: String,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    branches: Vec<Branch>,
    tags: Vec<Tag>,
    tag_objects: Vec<TagObject>,
    prs: Vec<PullRequest>,
    next_pr_number: u64,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    ListBranches(ForgeError),
    ListTags(ForgeError),
    CreateTagObject(ForgeError),
    CreateRef(ForgeError),
    FindOpenPr(ForgeError),
    CreatePr(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    ListBranches,
    ListTags,
    CreateTagObject {
        tag: String,
        commit_sha: String,
    },
    CreateRef {
        ref_name: String,
        sha: String,
    },
    FindOpenPr {
        base: String,
        head: String,
    },
    CreatePr {
        head: String,
        base: String,
        title: String,
    },
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                next_pr_number: 1,
                ..Default::default()
            })),
        }
    }

    /// Add a pre-existing branch.
    pub fn with_branch(self, name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.branches.push(Branch {
                name: name.into(),
                commit_sha: commit_sha.into(),
            });
        }
        self
    }

    /// Add a pre-existing tag.
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.tags.push(Tag { name: name.into() });
        }
        self
    }

    /// Add a pre-existing open pull request.
    pub fn with_open_pr(self, base: impl Into<String>, head: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let number = inner.next_pr_number;
            inner.next_pr_number += 1;
            let pr = PullRequest {
                number,
                url: format!("https://example.test/pull/{}", number),
                head: head.into(),
                base: base.into(),
                title: format!("PR #{}", number),
            };
            inner.prs.push(pr);
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Current branch names (for test verification).
    pub fn branch_names(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.branches.iter().map(|b| b.name.clone()).collect()
    }

    /// Look up a branch's commit (for test verification).
    pub fn branch_sha(&self, name: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .branches
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.commit_sha.clone())
    }

    /// Current tag names (for test verification).
    pub fn tag_names(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.tags.iter().map(|t| t.name.clone()).collect()
    }

    /// All created tag objects, reachable or not (for test verification).
    pub fn tag_objects(&self) -> Vec<TagObject> {
        let inner = self.inner.lock().unwrap();
        inner.tag_objects.clone()
    }

    /// All pull requests (for test verification).
    pub fn all_prs(&self) -> Vec<PullRequest> {
        let inner = self.inner.lock().unwrap();
        inner.prs.clone()
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if the named operation is configured to fail.
    fn check_fail(&self, op: &str) -> Option<ForgeError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::ListBranches(e)) if op == "list_branches" => Some(e.clone()),
            Some(FailOn::ListTags(e)) if op == "list_tags" => Some(e.clone()),
            Some(FailOn::CreateTagObject(e)) if op == "create_tag_object" => Some(e.clone()),
            Some(FailOn::CreateRef(e)) if op == "create_ref" => Some(e.clone()),
            Some(FailOn::FindOpenPr(e)) if op == "find_open_pr" => Some(e.clone()),
            Some(FailOn::CreatePr(e)) if op == "create_pr" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_branches(&self) -> Result<Vec<Branch>, ForgeError> {
        self.record(MockOperation::ListBranches);
        if let Some(e) = self.check_fail("list_branches") {
            return Err(e);
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner.branches.clone())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ForgeError> {
        self.record(MockOperation::ListTags);
        if let Some(e) = self.check_fail("list_tags") {
            return Err(e);
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner.tags.clone())
    }

    async fn create_tag_object(
        &self,
        tag: &str,
        message: &str,
        commit_sha: &str,
    ) -> Result<String, ForgeError> {
        self.record(MockOperation::CreateTagObject {
            tag: tag.to_string(),
            commit_sha: commit_sha.to_string(),
        });
        if let Some(e) = self.check_fail("create_tag_object") {
            return Err(e);
        }

        let mut inner = self.inner.lock().unwrap();
        let sha = format!("tagobj-{}-{}", tag, inner.tag_objects.len());
        inner.tag_objects.push(TagObject {
            tag: tag.to_string(),
            message: message.to_string(),
            commit_sha: commit_sha.to_string(),
            sha: sha.clone(),
        });
        Ok(sha)
    }

    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<(), ForgeError> {
        self.record(MockOperation::CreateRef {
            ref_name: ref_name.to_string(),
            sha: sha.to_string(),
        });
        if let Some(e) = self.check_fail("create_ref") {
            return Err(e);
        }

        let mut inner = self.inner.lock().unwrap();
        if let Some(tag) = ref_name.strip_prefix("refs/tags/") {
            if inner.tags.iter().any(|t| t.name == tag) {
                return Err(ForgeError::ApiError {
                    status: 422,
                    message: "Reference already exists".to_string(),
                });
            }
            inner.tags.push(Tag {
                name: tag.to_string(),
            });
            Ok(())
        } else if let Some(branch) = ref_name.strip_prefix("refs/heads/") {
            if inner.branches.iter().any(|b| b.name == branch) {
                return Err(ForgeError::ApiError {
                    status: 422,
                    message: "Reference already exists".to_string(),
                });
            }
            inner.branches.push(Branch {
                name: branch.to_string(),
                commit_sha: sha.to_string(),
            });
            Ok(())
        } else {
            Err(ForgeError::ApiError {
                status: 422,
                message: format!("unsupported ref '{}'", ref_name),
            })
        }
    }

    async fn find_open_pr(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Option<PullRequest>, ForgeError> {
        self.record(MockOperation::FindOpenPr {
            base: base.to_string(),
            head: head.to_string(),
        });
        if let Some(e) = self.check_fail("find_open_pr") {
            return Err(e);
        }

        let inner = self.inner.lock().unwrap();
        Ok(inner
            .prs
            .iter()
            .find(|pr| pr.base == base && pr.head == head)
            .cloned())
    }

    async fn create_pr(&self, request: CreatePrRequest) -> Result<PullRequest, ForgeError> {
        self.record(MockOperation::CreatePr {
            head: request.head.clone(),
            base: request.base.clone(),
            title: request.title.clone(),
        });
        if let Some(e) = self.check_fail("create_pr") {
            return Err(e);
        }

        let mut inner = self.inner.lock().unwrap();
        let number = inner.next_pr_number;
        inner.next_pr_number += 1;
        let pr = PullRequest {
            number,
            url: format!("https://example.test/pull/{}", number),
            head: request.head,
            base: request.base,
            title: request.title,
        };
        inner.prs.push(pr.clone());
        Ok(pr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forge_name_is_mock() {
        assert_eq!(MockForge::new().name(), "mock");
    }

    #[tokio::test]
    async fn create_ref_adds_a_tag() {
        let forge = MockForge::new();
        forge.create_ref("refs/tags/v1.0.0", "abc").await.unwrap();
        assert_eq!(forge.tag_names(), vec!["v1.0.0"]);
    }

    #[tokio::test]
    async fn create_ref_adds_a_branch_with_its_sha() {
        let forge = MockForge::new();
        forge.create_ref("refs/heads/topic", "abc").await.unwrap();
        assert_eq!(forge.branch_sha("topic").unwrap(), "abc");
    }

    #[tokio::test]
    async fn duplicate_ref_is_rejected() {
        let forge = MockForge::new().with_tag("v1.0.0");
        let err = forge
            .create_ref("refs/tags/v1.0.0", "abc")
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ApiError { status: 422, .. }));
    }

    #[tokio::test]
    async fn fail_on_applies_only_to_the_configured_operation() {
        let forge = MockForge::new().fail_on(FailOn::CreatePr(ForgeError::RateLimited));

        assert!(forge.list_branches().await.is_ok());
        let err = forge
            .create_pr(CreatePrRequest {
                head: "h".to_string(),
                base: "b".to_string(),
                title: "t".to_string(),
                body: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::RateLimited));

        forge.clear_fail_on();
        assert!(forge
            .create_pr(CreatePrRequest {
                head: "h".to_string(),
                base: "b".to_string(),
                title: "t".to_string(),
                body: None,
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn operations_are_recorded() {
        let forge = MockForge::new();
        forge.list_tags().await.unwrap();
        forge.find_open_pr("develop", "topic").await.unwrap();

        assert_eq!(
            forge.operations(),
            vec![
                MockOperation::ListTags,
                MockOperation::FindOpenPr {
                    base: "develop".to_string(),
                    head: "topic".to_string()
                }
            ]
        );
    }
}
