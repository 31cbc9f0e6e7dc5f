//! Static module payload loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the static payload (dependency lists, PCH mode,
//!   version-gated dependencies) and the embedded default payload
//! - Payload file parsing (JSON or TOML) with semantic validation
//! - Payload resolution (explicit path → env → config dir → embedded default)
//! - Payload snapshots with content digests for provenance

pub mod load;
pub mod payload;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use load::{load_payload, parse_payload, PayloadError, PayloadFormat};
pub use payload::{default_payload, payload_schema, GatedDependency, PchMode, StaticPayload};
pub use resolve::{resolve_payload, PayloadPaths, PayloadSource, ResolvedPayload};
pub use snapshot::{payload_digest, PayloadSnapshot};
pub use validate::{validate_payload, ValidationError, ValidationResult};

/// Schema version for payload files.
pub const PAYLOAD_SCHEMA_VERSION: &str = mr_common::SCHEMA_VERSION;
