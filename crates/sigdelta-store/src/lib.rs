//! sigdelta Store - file persistence for signature tables and delta chains
//!
//! Provides:
//! - Table files and delta format v0 in JSON or YAML (picked by extension)
//! - Validating loaders for single files and whole delta directories
//! - Atomic writers
//! - Canonical chain digest
//! - `sigdelta.toml` workspace configuration

pub mod config;
pub mod digest;
pub mod errors;
pub mod file_format;
pub mod format_v0;
pub mod loader;
pub mod writer;

// Re-export key types
pub use config::{load_config, load_default_config, LogFormat, SigDeltaConfig};
pub use digest::chain_digest;
pub use errors::Result;
pub use file_format::FileFormat;
pub use format_v0::DeltaFileV0;
pub use loader::{load_chain_dir, load_delta, load_table};
pub use writer::{write_delta, write_table};
