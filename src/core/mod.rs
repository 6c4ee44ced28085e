//! core
//!
//! Pure domain logic for the gate.
//!
//! # Modules
//!
//! - [`config`] - Immutable branch configuration and its file layer
//! - [`taxonomy`] - Branch classification into GitFlow kinds
//! - [`policy`] - Acceptable base branches per branch kind
//! - [`release`] - Release/hotfix name consistency
//! - [`verdict`] - Accumulating validation verdict
//!
//! # Design Principles
//!
//! - Everything in this layer is a pure function over immutable values
//! - Classification is total: every branch name maps to some kind
//! - The verdict is monotonic: checks can only flip it to failing

pub mod config;
pub mod policy;
pub mod release;
pub mod taxonomy;
pub mod verdict;
