//! End-to-end resolution for one configuration pass.

use mr_common::VersionTriple;
use mr_config::{payload_digest, StaticPayload};
use serde::Serialize;
use tracing::{info, warn};

use crate::classify::{classify, CompatibilityBucket};
use crate::compose::{compose, ModuleConfiguration};
use crate::policy::{resolve, DirectiveDecision};
use crate::probe::HostIntrospector;
use crate::shims::{is_supported, ApiShims, SUPPORTED_END, SUPPORTED_MIN};

/// Everything decided for one host version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub schema_version: String,
    pub version: VersionTriple,
    pub bucket: CompatibilityBucket,
    pub decision: DirectiveDecision,
    pub configuration: ModuleConfiguration,
    pub shims: ApiShims,
    /// False when the version is outside the supported host span.
    pub supported: bool,
    /// SHA-256 of the payload resolved against; matches `PayloadSnapshot::digest`.
    pub payload_digest: Option<String>,
}

impl Resolution {
    /// Whether the directive ended up set in the configuration.
    pub fn directive_applied(&self) -> bool {
        self.configuration.directive_field.is_some()
    }

    pub fn into_configuration(self) -> ModuleConfiguration {
        self.configuration
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Classify `version`, pick the directive, and compose the configuration.
///
/// Never fails. Versions outside the supported span still resolve; they are
/// only flagged.
pub fn resolve_module<H>(version: VersionTriple, payload: &StaticPayload, host: &H) -> Resolution
where
    H: HostIntrospector + ?Sized,
{
    let supported = is_supported(&version);
    if !supported {
        warn!(
            %version,
            min = %SUPPORTED_MIN,
            end = %SUPPORTED_END,
            "host version outside supported span; resolving anyway"
        );
    }

    let bucket = classify(&version);
    let decision = resolve(bucket);
    let configuration = compose(&decision, &version, payload, host);

    info!(
        %version,
        %bucket,
        module = payload.module_name.as_deref().unwrap_or("<unnamed>"),
        directive = ?configuration.directive_field.as_ref().map(|f| f.value),
        private_dependencies = configuration.private_dependencies.len(),
        "module configuration resolved"
    );

    Resolution {
        schema_version: mr_common::SCHEMA_VERSION.to_string(),
        version,
        bucket,
        decision,
        configuration,
        shims: ApiShims::for_version(&version),
        supported,
        payload_digest: payload_digest(payload).ok(),
    }
}

/// Shorthand for callers that only need the configuration.
pub fn resolve_configuration<H>(
    version: VersionTriple,
    payload: &StaticPayload,
    host: &H,
) -> ModuleConfiguration
where
    H: HostIntrospector + ?Sized,
{
    resolve_module(version, payload, host).into_configuration()
}
