//! core::policy
//!
//! Acceptable base branches for a pull request, per GitFlow.
//!
//! # Rules
//!
//! - Default: the integration branch is the only acceptable base.
//! - Hotfix head: the trunk branch is acceptable, plus the PR's declared
//!   base when that base is itself a support branch (hotfixes may land on a
//!   support line instead of trunk).
//! - Release head: the trunk branch only. No support-branch exception.
//!
//! The three outcomes are mutually exclusive, tested in the order
//! Hotfix, Release, default. A rejected base is a policy violation, not a
//! fatal error; validation continues to the remaining checks.

use std::collections::BTreeSet;

use super::config::BranchConfig;
use super::taxonomy::BranchKind;

/// The set of base branches a pull request from a branch of the given kind
/// may legally target.
///
/// `declared_base` is the base branch the PR actually targets; it only
/// influences the result through the hotfix support-branch exception.
///
/// # Example
///
/// ```
/// use gitflow_gate::core::config::BranchConfig;
/// use gitflow_gate::core::policy::acceptable_bases;
/// use gitflow_gate::core::taxonomy::BranchKind;
///
/// let config = BranchConfig::default();
/// let bases = acceptable_bases(BranchKind::Hotfix, "support/1.x", &config);
/// assert!(bases.contains("main"));
/// assert!(bases.contains("support/1.x"));
/// ```
pub fn acceptable_bases(
    kind: BranchKind,
    declared_base: &str,
    config: &BranchConfig,
) -> BTreeSet<String> {
    let mut bases = BTreeSet::new();

    match kind {
        BranchKind::Hotfix => {
            bases.insert(config.trunk.clone());
            if declared_base.starts_with(&config.support_prefix) {
                bases.insert(declared_base.to_string());
            }
        }
        BranchKind::Release => {
            bases.insert(config.trunk.clone());
        }
        _ => {
            bases.insert(config.develop.clone());
        }
    }

    bases
}

/// Membership test for the actual base against the acceptable set.
pub fn is_base_acceptable(actual_base: &str, acceptable: &BTreeSet<String>) -> bool {
    acceptable.contains(actual_base)
}
