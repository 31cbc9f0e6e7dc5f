//! Concrete host versions across the supported span.

use mr_config::default_payload;
use mr_core::{
    resolve_module, CompatibilityBucket, DirectiveAction, DirectiveField, DirectiveValue,
    NullIntrospector, StaticIntrospector, VersionTriple, DIRECTIVE_FIELD,
};

const GATED: &str = "EditorFramework";

fn v(major: u32, minor: u32, patch: u32) -> VersionTriple {
    VersionTriple::new(major, minor, patch)
}

#[test]
fn ue_4_27_has_no_directive_and_no_gated_dependency() {
    let resolution = resolve_module(
        v(4, 27, 0),
        &default_payload(),
        &StaticIntrospector::with_directive_surface(),
    );
    assert_eq!(resolution.bucket, CompatibilityBucket::PreDirectiveEra);
    assert!(resolution.configuration.directive_field.is_none());
    assert!(!resolution.configuration.has_dependency(GATED));
    assert!(resolution.supported);
}

#[test]
fn ue_5_1_has_gated_dependency_but_no_directive() {
    let resolution = resolve_module(
        v(5, 1, 0),
        &default_payload(),
        &StaticIntrospector::with_directive_surface(),
    );
    assert_eq!(resolution.bucket, CompatibilityBucket::PreDirectiveEra);
    assert!(resolution.configuration.directive_field.is_none());
    assert!(resolution.configuration.has_dependency(GATED));
}

#[test]
fn ue_5_3_probe_succeeds_when_host_exposes_member() {
    let resolution = resolve_module(
        v(5, 3, 0),
        &default_payload(),
        &StaticIntrospector::with_directive_surface(),
    );
    assert_eq!(resolution.bucket, CompatibilityBucket::ProbedValue);
    assert_eq!(
        resolution.decision.action,
        DirectiveAction::ProbeAndSet("Latest".to_string())
    );
    assert_eq!(
        resolution.configuration.directive_field,
        Some(DirectiveField::new(DIRECTIVE_FIELD, DirectiveValue::Latest))
    );
}

#[test]
fn ue_5_3_probe_failure_leaves_directive_absent() {
    let resolution = resolve_module(v(5, 3, 0), &default_payload(), &NullIntrospector);
    assert_eq!(resolution.bucket, CompatibilityBucket::ProbedValue);
    assert!(resolution.configuration.directive_field.is_none());
    assert!(resolution.configuration.has_dependency(GATED));
}

#[test]
fn ue_5_5_uses_penultimate_not_latest() {
    let resolution = resolve_module(
        v(5, 5, 0),
        &default_payload(),
        &StaticIntrospector::with_directive_surface(),
    );
    assert_eq!(resolution.bucket, CompatibilityBucket::LegacyStableValue);
    assert_eq!(
        resolution.configuration.directive_field.map(|f| f.value),
        Some(DirectiveValue::PenultimateStable)
    );
}

#[test]
fn ue_5_6_and_6_0_use_latest() {
    for version in [v(5, 6, 0), v(6, 0, 0)] {
        let resolution = resolve_module(version, &default_payload(), &NullIntrospector);
        assert_eq!(resolution.bucket, CompatibilityBucket::LatestSentinel, "{}", version);
        assert_eq!(
            resolution.configuration.directive_field.map(|f| f.value),
            Some(DirectiveValue::Latest),
            "{}",
            version
        );
    }
}

#[test]
fn static_payload_is_never_mutated() {
    let payload = default_payload();
    let before = payload.clone();
    for version in [v(4, 26, 0), v(5, 0, 0), v(5, 3, 0), v(5, 5, 0), v(5, 7, 0)] {
        let _ = resolve_module(version, &payload, &StaticIntrospector::with_directive_surface());
    }
    assert_eq!(payload, before);
}

#[test]
fn pch_mode_and_public_set_carried_through() {
    let payload = default_payload();
    let resolution = resolve_module(v(5, 4, 0), &payload, &NullIntrospector);
    assert_eq!(resolution.configuration.pch_mode, payload.pch_mode);
    assert_eq!(
        resolution.configuration.public_dependencies,
        payload.public_dependencies
    );
}
