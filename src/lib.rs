//! gitflow-gate - A CI policy gate enforcing GitFlow branching discipline
//!
//! gitflow-gate is a single-binary tool meant to run inside a CI pipeline.
//! It classifies the branch the workflow is running on, validates pull
//! request base branches against GitFlow rules, checks that release and
//! hotfix branch names agree with the declared release version, and, on a
//! push to the trunk branch, performs an idempotent post-release sequence
//! (tag, follow-up branch, follow-up pull request) against the host API.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates validation and the post-release sequence
//! - [`core`] - Pure domain logic: config, taxonomy, policy, verdict
//! - [`event`] - The triggering CI event (push / pull request) and its payload
//! - [`forge`] - Abstraction for the remote host API (GitHub v1)
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. Configuration and event context are immutable after construction
//! 2. The validation verdict is monotonic: once failing, never passing again
//! 3. Every remote creation is preceded by an existence check, so re-running
//!    the gate after a partial failure converges instead of duplicating state

pub mod cli;
pub mod core;
pub mod engine;
pub mod event;
pub mod forge;
pub mod ui;
