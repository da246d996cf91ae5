//! Manifest and installed-set ingestion: the caller-side collaborator that
//! materializes YAML into the structures `crucible_core` consumes. Out of
//! scope for the core resolver itself (§1).

mod raw;

pub use raw::{load_installed, load_manifest};
