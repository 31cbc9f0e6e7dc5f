//! Schema versioning and compatibility.

/// Current schema version for payload files and resolution reports.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Check if a schema version is compatible with current.
pub fn is_compatible(version: &str) -> bool {
    let major_of = |v: &str| {
        v.split('.')
            .next()
            .and_then(|s| s.trim().parse::<u32>().ok())
    };

    match (major_of(SCHEMA_VERSION), major_of(version)) {
        (Some(current), Some(other)) => current == other,
        _ => false,
    }
}
