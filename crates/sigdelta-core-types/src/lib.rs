//! Core types shared across SigDelta crates
//!
//! This crate provides foundational types used by the engine, the
//! persistence adapter and the CLI:
//!
//! - **Versions**: `Version` and `VersionTransition`
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod schema;
pub mod version;

pub use version::{InvalidTransition, Version, VersionParseError, VersionTransition};
