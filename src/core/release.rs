//! core::release
//!
//! Release name consistency: a release or hotfix branch must carry the
//! declared release version as its final path segment.
//!
//! The check applies only when a release version was declared and the
//! branch is a release or hotfix branch; in every other case it passes
//! trivially. A branch name without a "/" is still valid input: its last
//! segment is the whole name.

use super::taxonomy::BranchKind;

/// Check that the branch name's trailing path segment equals the declared
/// release version. Returns `true` when the check does not apply.
///
/// # Example
///
/// ```
/// use gitflow_gate::core::release::name_matches_version;
/// use gitflow_gate::core::taxonomy::BranchKind;
///
/// assert!(name_matches_version("release/1.2.0", BranchKind::Release, Some("1.2.0")));
/// assert!(!name_matches_version("release/1.2.0", BranchKind::Release, Some("1.3.0")));
/// // Not applicable: passes trivially
/// assert!(name_matches_version("feature/x", BranchKind::Feature, Some("1.3.0")));
/// ```
pub fn name_matches_version(
    branch: &str,
    kind: BranchKind,
    declared_version: Option<&str>,
) -> bool {
    let version = match declared_version {
        Some(v) if !v.is_empty() => v,
        _ => return true,
    };

    if !matches!(kind, BranchKind::Release | BranchKind::Hotfix) {
        return true;
    }

    last_segment(branch) == version
}

/// The final "/"-separated segment of a branch name, or the whole name if
/// it contains no separator.
fn last_segment(branch: &str) -> &str {
    branch.rsplit('/').next().unwrap_or(branch)
}
