//! core::taxonomy
//!
//! Branch classification into GitFlow kinds.
//!
//! # Rules
//!
//! - Exact equality with the trunk or integration branch name wins over any
//!   prefix match, so a branch literally named "release" is Trunk-adjacent
//!   territory only if configured that way, never misclassified by prefix.
//! - Prefix matching is a plain case-sensitive string-prefix test, tried in
//!   the order feature, bugfix, release, hotfix, support.
//! - Anything else is `Unclassified`.
//!
//! Classification is a total, deterministic function with no side effects.

use std::fmt;

use super::config::BranchConfig;

/// The GitFlow kind of a branch, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// The long-lived production branch
    Trunk,
    /// The long-lived pre-release branch
    Integration,
    /// Short-lived feature branch
    Feature,
    /// Short-lived bugfix branch
    Bugfix,
    /// Release stabilization branch
    Release,
    /// Hotfix branch cut from production
    Hotfix,
    /// Long-term support branch
    Support,
    /// No configured name or prefix matched
    Unclassified,
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BranchKind::Trunk => "trunk",
            BranchKind::Integration => "integration",
            BranchKind::Feature => "feature",
            BranchKind::Bugfix => "bugfix",
            BranchKind::Release => "release",
            BranchKind::Hotfix => "hotfix",
            BranchKind::Support => "support",
            BranchKind::Unclassified => "unclassified",
        };
        write!(f, "{}", name)
    }
}

/// Classify a branch name against the configured names and prefixes.
///
/// # Example
///
/// ```
/// use gitflow_gate::core::config::BranchConfig;
/// use gitflow_gate::core::taxonomy::{classify, BranchKind};
///
/// let config = BranchConfig::default();
/// assert_eq!(classify("main", &config), BranchKind::Trunk);
/// assert_eq!(classify("hotfix/2.0.1", &config), BranchKind::Hotfix);
/// assert_eq!(classify("wip-stuff", &config), BranchKind::Unclassified);
/// ```
pub fn classify(branch: &str, config: &BranchConfig) -> BranchKind {
    // Exact names win over prefix matches.
    if branch == config.trunk {
        return BranchKind::Trunk;
    }
    if branch == config.develop {
        return BranchKind::Integration;
    }

    if branch.starts_with(&config.feature_prefix) {
        BranchKind::Feature
    } else if branch.starts_with(&config.bugfix_prefix) {
        BranchKind::Bugfix
    } else if branch.starts_with(&config.release_prefix) {
        BranchKind::Release
    } else if branch.starts_with(&config.hotfix_prefix) {
        BranchKind::Hotfix
    } else if branch.starts_with(&config.support_prefix) {
        BranchKind::Support
    } else {
        BranchKind::Unclassified
    }
}

/// Check whether a branch name follows the naming convention at all:
/// it must be the trunk or integration branch, or carry one of the five
/// configured prefixes.
pub fn follows_convention(branch: &str, config: &BranchConfig) -> bool {
    classify(branch, config) != BranchKind::Unclassified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BranchConfig {
        BranchConfig::default()
    }

    #[test]
    fn classifies_long_lived_branches_by_exact_name() {
        assert_eq!(classify("main", &config()), BranchKind::Trunk);
        assert_eq!(classify("develop", &config()), BranchKind::Integration);
    }

    #[test]
    fn classifies_by_prefix() {
        let c = config();
        assert_eq!(classify("feature/login", &c), BranchKind::Feature);
        assert_eq!(classify("bugfix/issue-42", &c), BranchKind::Bugfix);
        assert_eq!(classify("release/1.2.0", &c), BranchKind::Release);
        assert_eq!(classify("hotfix/1.2.1", &c), BranchKind::Hotfix);
        assert_eq!(classify("support/1.x", &c), BranchKind::Support);
    }

    #[test]
    fn exact_name_beats_prefix_overlap() {
        // A trunk named exactly like a configured prefix root must not be
        // swallowed by the prefix test.
        let c = BranchConfig {
            trunk: "release/main".to_string(),
            ..BranchConfig::default()
        };
        assert_eq!(classify("release/main", &c), BranchKind::Trunk);
        assert_eq!(classify("release/1.0.0", &c), BranchKind::Release);
    }

    #[test]
    fn unmatched_names_are_unclassified() {
        let c = config();
        assert_eq!(classify("wip", &c), BranchKind::Unclassified);
        assert_eq!(classify("Feature/login", &c), BranchKind::Unclassified);
        assert_eq!(classify("", &c), BranchKind::Unclassified);
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(
            classify("HOTFIX/1.0.1", &config()),
            BranchKind::Unclassified
        );
    }

    #[test]
    fn convention_covers_exact_names_and_prefixes() {
        let c = config();
        assert!(follows_convention("main", &c));
        assert!(follows_convention("develop", &c));
        assert!(follows_convention("support/1.x", &c));
        assert!(!follows_convention("trunk", &c));
    }
}
