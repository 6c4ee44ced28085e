//! engine::post_release
//!
//! The post-release sequence triggered by a push to the trunk branch.
//!
//! # Steps
//!
//! 1. **Tag**: create the release tag (object + ref) unless the tag listing
//!    already shows it. Existence is judged by the tag ref listing, so a
//!    previous run that created the tag object but died before the ref
//!    converges here instead of getting stuck.
//! 2. **Branch**: create the follow-up bugfix branch from the trunk's
//!    current commit unless it already exists. Trunk missing from the
//!    remote listing is a fatal configuration error.
//! 3. **Pull request**: open the follow-up PR (base = integration branch)
//!    unless an open one already exists for that pairing.
//!
//! Strictly sequential; each step is independently idempotent via its
//! existence check, and nothing is retried automatically.

use crate::core::config::BranchConfig;
use crate::event::EventContext;
use crate::forge::{CreatePrRequest, Forge};
use crate::ui::output::{self, Verbosity};

use super::GateError;

/// Run the post-release sequence. A no-op when no release version is
/// declared.
pub async fn run(
    ctx: &EventContext,
    config: &BranchConfig,
    forge: &dyn Forge,
    verbosity: Verbosity,
) -> Result<(), GateError> {
    let (version, tag) = match config.release_version.as_deref().zip(config.release_tag()) {
        Some((version, tag)) => (version, tag),
        None => {
            output::debug("no release version declared; skipping post-release", verbosity);
            return Ok(());
        }
    };

    let follow_up = follow_up_branch(config, &tag);
    output::debug(
        format!("running post-release sequence via {}", forge.name()),
        verbosity,
    );

    ensure_tag(ctx, forge, &tag, version, verbosity).await?;
    ensure_branch(config, forge, &follow_up, verbosity).await?;
    ensure_pull_request(config, forge, &follow_up, version, verbosity).await?;

    Ok(())
}

/// The follow-up branch name: bugfix prefix + "post-" + tag name.
pub fn follow_up_branch(config: &BranchConfig, tag: &str) -> String {
    format!("{}post-{}", config.bugfix_prefix, tag)
}

/// Step 1: tag the released commit unless the tag ref already exists.
async fn ensure_tag(
    ctx: &EventContext,
    forge: &dyn Forge,
    tag: &str,
    version: &str,
    verbosity: Verbosity,
) -> Result<(), GateError> {
    let tags = forge.list_tags().await?;
    if tags.iter().any(|t| t.name == tag) {
        output::print(format!("tag '{}' already exists, skipping", tag), verbosity);
        return Ok(());
    }

    let message = format!("Release {}", version);
    let tag_sha = forge.create_tag_object(tag, &message, &ctx.sha).await?;
    forge
        .create_ref(&format!("refs/tags/{}", tag), &tag_sha)
        .await?;

    output::print(
        format!("created tag '{}' at {}", tag, ctx.sha),
        verbosity,
    );
    Ok(())
}

/// Step 2: create the follow-up branch from the trunk's current commit
/// unless it already exists.
async fn ensure_branch(
    config: &BranchConfig,
    forge: &dyn Forge,
    follow_up: &str,
    verbosity: Verbosity,
) -> Result<(), GateError> {
    let branches = forge.list_branches().await?;
    if branches.iter().any(|b| b.name == follow_up) {
        output::print(
            format!("branch '{}' already exists, skipping", follow_up),
            verbosity,
        );
        return Ok(());
    }

    let trunk_sha = branches
        .iter()
        .find(|b| b.name == config.trunk)
        .map(|b| b.commit_sha.clone())
        .ok_or_else(|| GateError::TrunkBranchNotFound(config.trunk.clone()))?;

    forge
        .create_ref(&format!("refs/heads/{}", follow_up), &trunk_sha)
        .await?;

    output::print(
        format!("created branch '{}' from {}", follow_up, trunk_sha),
        verbosity,
    );
    Ok(())
}

/// Step 3: open the follow-up pull request unless one is already open.
async fn ensure_pull_request(
    config: &BranchConfig,
    forge: &dyn Forge,
    follow_up: &str,
    version: &str,
    verbosity: Verbosity,
) -> Result<(), GateError> {
    if let Some(pr) = forge.find_open_pr(&config.develop, follow_up).await? {
        output::print(
            format!("follow-up PR already open: #{} {}", pr.number, pr.url),
            verbosity,
        );
        return Ok(());
    }

    let request = CreatePrRequest {
        head: follow_up.to_string(),
        base: config.develop.clone(),
        title: format!("Merge release {} follow-up into {}", version, config.develop),
        body: Some(format!(
            "Release {} was tagged on '{}'. This pull request carries the \
             post-release branch '{}' back into '{}' so the integration \
             branch picks up the released state and any release fixes.",
            version, config.trunk, follow_up, config.develop
        )),
    };

    let pr = forge.create_pr(request).await?;
    output::print(
        format!("opened follow-up PR #{}: {}", pr.number, pr.url),
        verbosity,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_up_branch_joins_bugfix_prefix_and_tag() {
        let config = BranchConfig::default();
        assert_eq!(follow_up_branch(&config, "v2.0.0"), "bugfix/post-v2.0.0");
    }

    #[test]
    fn follow_up_branch_honors_configured_prefix() {
        let config = BranchConfig {
            bugfix_prefix: "fix/".to_string(),
            ..BranchConfig::default()
        };
        assert_eq!(follow_up_branch(&config, "v1.0.0"), "fix/post-v1.0.0");
    }
}
