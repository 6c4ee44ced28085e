//! core::verdict
//!
//! The accumulating validation verdict.
//!
//! # Design
//!
//! The verdict starts passing and is flipped to failing by the first
//! recorded violation; it can never flip back. Checks do not short-circuit:
//! every applicable violation is recorded so a misconfigured pull request
//! surfaces all of its problems in one run.
//!
//! Violations are the non-fatal error tier. Fatal errors (missing
//! configuration, unreachable trunk, host API auth failures) never appear
//! here; they abort the run through `engine::GateError` instead.

use std::collections::BTreeSet;

use thiserror::Error;

/// A single policy violation, with enough context for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The branch name matches no configured long-lived name or prefix.
    #[error("branch '{branch}' does not follow the branching convention")]
    BadBranchName { branch: String },

    /// The pull request targets a base branch the policy does not allow.
    #[error(
        "pull request from '{head}' may not target '{base}' (acceptable: {})",
        format_bases(.acceptable)
    )]
    UnacceptableBase {
        base: String,
        head: String,
        acceptable: BTreeSet<String>,
    },

    /// A release/hotfix branch name disagrees with the declared version.
    #[error("branch '{branch}' does not end with the declared release version '{expected}'")]
    ReleaseNameMismatch { branch: String, expected: String },
}

fn format_bases(bases: &BTreeSet<String>) -> String {
    bases
        .iter()
        .map(|b| format!("'{}'", b))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The aggregate validation verdict for one run.
///
/// Monotonic: [`record`](Self::record) can only move it from passing to
/// failing, never back.
#[derive(Debug, Clone, Default)]
pub struct Verdict {
    violations: Vec<Violation>,
}

impl Verdict {
    /// A fresh, passing verdict.
    pub fn passing() -> Self {
        Self::default()
    }

    /// Record a violation, flipping the verdict to failing.
    pub fn record(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// All recorded violations, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}
