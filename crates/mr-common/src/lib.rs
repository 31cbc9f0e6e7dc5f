//! Shared types for the modrules resolver.
//!
//! This crate provides foundational types used by the config and core crates:
//! - Host tool version triples with total ordering
//! - Common error types with stable codes
//! - Schema versioning for serialized payloads and reports

pub mod error;
pub mod schema;
pub mod version;

pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use version::VersionTriple;
