//! Core dependency resolution engine.
//!
//! Pure, synchronous, I/O-free: version parsing and ordering, constraint
//! parsing, platform filtering, manifests, and the resolver itself.
//! Manifest ingestion, package fetching, CLI, configuration and logging
//! setup are external collaborators — see the `crucible` binary crate.

pub mod constraint;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod package;
pub mod platform;
pub mod resolver;
pub mod version;

pub use constraint::{Constraint, Op};
pub use error::{ResolveError, ResolveResult};
pub use manifest::Manifest;
pub use package::{DependencyList, Package};
pub use platform::{default_platform_tags, PlatformSpec};
pub use resolver::{resolve, resolve_str, VerifyBinary};
pub use version::Version;
