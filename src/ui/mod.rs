//! ui
//!
//! Output utilities for the gate.

pub mod output;
