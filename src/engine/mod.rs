//! engine
//!
//! Orchestration: the validation state machine and the post-release
//! sequence.
//!
//! # Error tiers
//!
//! Policy violations accumulate in the [`Verdict`](crate::core::verdict::Verdict)
//! and never abort the run. [`GateError`] is the fatal tier: broken
//! configuration or environment, the trunk branch missing from the remote,
//! or a host API failure. Fatal errors propagate to the top level, which
//! alone decides the process exit code.

pub mod post_release;
pub mod validate;

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::event::EventError;
use crate::forge::ForgeError;

/// Fatal errors that abort the run.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Event(#[from] EventError),

    /// The trunk branch could not be found among the remote branches.
    /// A configuration/environment problem, not a policy outcome.
    #[error("trunk branch '{0}' not found among remote branches")]
    TrunkBranchNotFound(String),

    #[error(transparent)]
    Forge(#[from] ForgeError),
}

pub use validate::run;
