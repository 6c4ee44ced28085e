//! End-to-end validation scenarios driven through the engine.
//!
//! These exercise the validation state machine against the in-memory
//! MockForge: pull request review outcomes, push handling, and the no-op
//! terminal state for events the gate does not handle.

use gitflow_gate::core::config::BranchConfig;
use gitflow_gate::core::verdict::Violation;
use gitflow_gate::engine;
use gitflow_gate::event::{EventContext, EventKind, PullRequestRef, RepoId};
use gitflow_gate::forge::mock::MockForge;
use gitflow_gate::ui::output::Verbosity;

fn repo() -> RepoId {
    RepoId {
        owner: "octocat".to_string(),
        repo: "hello-world".to_string(),
    }
}

fn pull_request_event(base: &str, head: &str) -> EventContext {
    EventContext {
        kind: EventKind::PullRequest,
        branch: head.to_string(),
        repository: repo(),
        sha: "abc123".to_string(),
        pull_request: Some(PullRequestRef {
            base: base.to_string(),
            head: head.to_string(),
        }),
    }
}

fn push_event(branch: &str) -> EventContext {
    EventContext {
        kind: EventKind::Push,
        branch: branch.to_string(),
        repository: repo(),
        sha: "abc123".to_string(),
        pull_request: None,
    }
}

#[tokio::test]
async fn feature_pr_into_develop_passes() {
    let forge = MockForge::new();
    let verdict = engine::run(
        &pull_request_event("develop", "feature/login"),
        &BranchConfig::default(),
        &forge,
        Verbosity::Quiet,
    )
    .await
    .unwrap();

    assert!(verdict.passed());
    // Pull request review never touches the forge.
    assert!(forge.operations().is_empty());
}

#[tokio::test]
async fn hotfix_pr_into_develop_is_rejected() {
    // Scenario: hotfix must target trunk or a support branch, not develop.
    let forge = MockForge::new();
    let verdict = engine::run(
        &pull_request_event("develop", "hotfix/2.0.1"),
        &BranchConfig::default(),
        &forge,
        Verbosity::Quiet,
    )
    .await
    .unwrap();

    assert!(!verdict.passed());
    match &verdict.violations()[0] {
        Violation::UnacceptableBase { base, head, .. } => {
            assert_eq!(base, "develop");
            assert_eq!(head, "hotfix/2.0.1");
        }
        other => panic!("unexpected violation: {:?}", other),
    }
}

#[tokio::test]
async fn hotfix_pr_into_support_branch_passes() {
    let forge = MockForge::new();
    let verdict = engine::run(
        &pull_request_event("support/1.x", "hotfix/1.0.9"),
        &BranchConfig::default(),
        &forge,
        Verbosity::Quiet,
    )
    .await
    .unwrap();

    assert!(verdict.passed());
}

#[tokio::test]
async fn release_name_mismatch_fails_independent_of_base() {
    // Scenario: release/9.9.9 with declared version 9.9.8, base is correct.
    let config = BranchConfig {
        release_version: Some("9.9.8".to_string()),
        ..BranchConfig::default()
    };
    let forge = MockForge::new();
    let verdict = engine::run(
        &pull_request_event("main", "release/9.9.9"),
        &config,
        &forge,
        Verbosity::Quiet,
    )
    .await
    .unwrap();

    assert!(!verdict.passed());
    assert_eq!(verdict.violations().len(), 1);
    match &verdict.violations()[0] {
        Violation::ReleaseNameMismatch { branch, expected } => {
            assert_eq!(branch, "release/9.9.9");
            assert_eq!(expected, "9.9.8");
        }
        other => panic!("unexpected violation: {:?}", other),
    }
}

#[tokio::test]
async fn push_to_unconventional_branch_fails_naming() {
    let forge = MockForge::new();
    let verdict = engine::run(
        &push_event("random-work"),
        &BranchConfig::default(),
        &forge,
        Verbosity::Quiet,
    )
    .await
    .unwrap();

    assert!(!verdict.passed());
    assert!(forge.operations().is_empty());
}

#[tokio::test]
async fn push_to_feature_branch_passes_without_post_release() {
    let config = BranchConfig {
        release_version: Some("2.0.0".to_string()),
        ..BranchConfig::default()
    };
    let forge = MockForge::new();
    let verdict = engine::run(&push_event("feature/login"), &config, &forge, Verbosity::Quiet)
        .await
        .unwrap();

    assert!(verdict.passed());
    // Only a trunk push may reach the post-release sequence.
    assert!(forge.operations().is_empty());
}

#[tokio::test]
async fn trunk_push_without_release_version_skips_post_release() {
    let forge = MockForge::new().with_branch("main", "abc123");
    let verdict = engine::run(
        &push_event("main"),
        &BranchConfig::default(),
        &forge,
        Verbosity::Quiet,
    )
    .await
    .unwrap();

    assert!(verdict.passed());
    assert!(forge.operations().is_empty());
}

#[tokio::test]
async fn other_event_is_a_no_op_success() {
    let config = BranchConfig::default();
    let ctx = EventContext {
        kind: EventKind::Other,
        branch: config.develop.clone(),
        repository: repo(),
        sha: "abc123".to_string(),
        pull_request: None,
    };

    let forge = MockForge::new();
    let verdict = engine::run(&ctx, &config, &forge, Verbosity::Quiet)
        .await
        .unwrap();

    assert!(verdict.passed());
    assert!(forge.operations().is_empty());
}
