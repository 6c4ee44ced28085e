//! forge
//!
//! Abstraction for the remote hosting service.
//!
//! # Architecture
//!
//! The `Forge` trait defines the host API surface the post-release sequence
//! needs: listing branches and tags, creating tag objects and refs, and
//! finding/creating pull requests. The engine receives a `&dyn Forge` so
//! tests can substitute the in-memory [`mock::MockForge`].
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and request/response types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
