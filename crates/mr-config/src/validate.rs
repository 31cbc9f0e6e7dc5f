//! Semantic validation for static payloads.
//!
//! Serde already guarantees the shape; these checks cover what the type
//! system cannot: duplicate or empty names, and gated entries that would
//! collide with unconditional ones.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::payload::StaticPayload;

/// A single semantic problem in a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("unsupported schema version: {0}")]
    UnsupportedSchema(String),

    #[error("empty dependency name in {0}")]
    EmptyName(String),

    #[error("duplicate private dependency: {0}")]
    DuplicatePrivate(String),

    #[error("duplicate gated dependency: {0}")]
    DuplicateGated(String),

    #[error("gated dependency {0} is also listed unconditionally")]
    GatedCollision(String),
}

/// Outcome of validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Validate a payload, collecting every problem rather than stopping at the first.
pub fn validate_payload(payload: &StaticPayload) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !mr_common::schema::is_compatible(&payload.schema_version) {
        result.push(ValidationError::UnsupportedSchema(
            payload.schema_version.clone(),
        ));
    }

    if payload.public_dependencies.iter().any(|n| n.trim().is_empty()) {
        result.push(ValidationError::EmptyName("public_dependencies".to_string()));
    }

    let mut seen_private = HashSet::new();
    for name in &payload.private_dependencies {
        if name.trim().is_empty() {
            result.push(ValidationError::EmptyName(
                "private_dependencies".to_string(),
            ));
        } else if !seen_private.insert(name.as_str()) {
            result.push(ValidationError::DuplicatePrivate(name.clone()));
        }
    }

    let mut seen_gated = HashSet::new();
    for gated in &payload.gated_dependencies {
        if gated.name.trim().is_empty() {
            result.push(ValidationError::EmptyName("gated_dependencies".to_string()));
            continue;
        }
        if !seen_gated.insert(gated.name.as_str()) {
            result.push(ValidationError::DuplicateGated(gated.name.clone()));
        }
        if seen_private.contains(gated.name.as_str())
            || payload.public_dependencies.contains(&gated.name)
        {
            result.push(ValidationError::GatedCollision(gated.name.clone()));
        }
    }

    result
}
