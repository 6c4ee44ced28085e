//! engine::validate
//!
//! The validation state machine.
//!
//! # Entry states
//!
//! - **Pull request review**: run the branch-naming check, the base-branch
//!   policy, and the release-name consistency check. All three run
//!   unconditionally so every misconfiguration surfaces in one pass.
//! - **Trunk push**: run the branch-naming check only; if it passes and the
//!   pushed branch is the trunk branch, hand off to the post-release
//!   sequence.
//! - **Other**: nothing to validate; terminal no-op success.
//!
//! The verdict is the run's aggregate outcome; the overall run succeeds iff
//! it is passing and no fatal error occurred.

use crate::core::config::BranchConfig;
use crate::core::policy::{acceptable_bases, is_base_acceptable};
use crate::core::release::name_matches_version;
use crate::core::taxonomy::{classify, follows_convention};
use crate::core::verdict::{Verdict, Violation};
use crate::event::{EventContext, EventKind, PullRequestRef};
use crate::forge::Forge;
use crate::ui::output::{self, Verbosity};

use super::post_release;
use super::GateError;

/// Run the gate for one event. Returns the accumulated verdict; fatal
/// errors (configuration, environment, host API) propagate as `GateError`.
pub async fn run(
    ctx: &EventContext,
    config: &BranchConfig,
    forge: &dyn Forge,
    verbosity: Verbosity,
) -> Result<Verdict, GateError> {
    match ctx.kind {
        EventKind::PullRequest => {
            let verdict = validate_pull_request(ctx, config);
            report(&verdict, verbosity);
            Ok(verdict)
        }
        EventKind::Push => {
            let mut verdict = Verdict::passing();
            check_naming(&ctx.branch, config, &mut verdict);
            report(&verdict, verbosity);

            if verdict.passed() && ctx.branch == config.trunk {
                post_release::run(ctx, config, forge, verbosity).await?;
            }
            Ok(verdict)
        }
        EventKind::Other => {
            output::debug(
                "event carries nothing to validate; treating as success",
                verbosity,
            );
            Ok(Verdict::passing())
        }
    }
}

/// Validate a pull request event: naming, base policy, release consistency.
///
/// Pure with respect to the outside world; all three checks run and their
/// violations accumulate.
pub fn validate_pull_request(ctx: &EventContext, config: &BranchConfig) -> Verdict {
    let mut verdict = Verdict::passing();

    check_naming(&ctx.branch, config, &mut verdict);

    if let Some(pr) = &ctx.pull_request {
        check_base_policy(pr, config, &mut verdict);
    }

    check_release_consistency(&ctx.branch, config, &mut verdict);

    verdict
}

/// The branch must be a long-lived branch or carry a configured prefix.
fn check_naming(branch: &str, config: &BranchConfig, verdict: &mut Verdict) {
    if !follows_convention(branch, config) {
        verdict.record(Violation::BadBranchName {
            branch: branch.to_string(),
        });
    }
}

/// The PR's actual base must be in the acceptable set for the head's kind.
fn check_base_policy(pr: &PullRequestRef, config: &BranchConfig, verdict: &mut Verdict) {
    let kind = classify(&pr.head, config);
    let acceptable = acceptable_bases(kind, &pr.base, config);

    if !is_base_acceptable(&pr.base, &acceptable) {
        verdict.record(Violation::UnacceptableBase {
            base: pr.base.clone(),
            head: pr.head.clone(),
            acceptable,
        });
    }
}

/// Release/hotfix branch names must end with the declared release version.
fn check_release_consistency(branch: &str, config: &BranchConfig, verdict: &mut Verdict) {
    let kind = classify(branch, config);
    if !name_matches_version(branch, kind, config.release_version.as_deref()) {
        verdict.record(Violation::ReleaseNameMismatch {
            branch: branch.to_string(),
            expected: config
                .release_version
                .clone()
                .unwrap_or_default(),
        });
    }
}

fn report(verdict: &Verdict, verbosity: Verbosity) {
    for violation in verdict.violations() {
        output::violation(violation);
    }
    if verdict.passed() {
        output::debug("all branch checks passed", verbosity);
    }
}
