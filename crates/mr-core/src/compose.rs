//! Configuration composition.
//!
//! Merges a directive decision and the version-gated dependencies into a copy
//! of the static payload. Composition only adds: it never drops a payload
//! entry, and running it twice on the same inputs gives the same output.

use mr_common::VersionTriple;
use mr_config::{PchMode, StaticPayload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::trace;

use crate::policy::{DirectiveAction, DirectiveDecision, DirectiveField};
use crate::probe::{probe, HostIntrospector};

/// Final module build configuration handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    pub public_dependencies: BTreeSet<String>,
    /// Declaration order is kept; a name appears at most once.
    pub private_dependencies: Vec<String>,
    pub pch_mode: PchMode,
    /// Absent when the directive does not exist or the probe failed.
    pub directive_field: Option<DirectiveField>,
}

impl ModuleConfiguration {
    pub fn new(pch_mode: PchMode) -> Self {
        Self {
            public_dependencies: BTreeSet::new(),
            private_dependencies: Vec::new(),
            pch_mode,
            directive_field: None,
        }
    }

    /// Unconditional part of a payload, without gated entries or directive.
    pub fn from_payload(payload: &StaticPayload) -> Self {
        let mut config = Self::new(payload.pch_mode);
        config.public_dependencies = payload.public_dependencies.clone();
        for name in &payload.private_dependencies {
            config.push_private(name);
        }
        config
    }

    pub fn with_private<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.push_private(name.as_ref());
        }
        self
    }

    /// Whether `name` is a public or private dependency.
    pub fn has_dependency(&self, name: &str) -> bool {
        self.public_dependencies.contains(name)
            || self.private_dependencies.iter().any(|n| n == name)
    }

    /// Append a private dependency unless it is already listed privately.
    fn push_private(&mut self, name: &str) {
        if !self.private_dependencies.iter().any(|n| n == name) {
            self.private_dependencies.push(name.to_string());
        }
    }
}

/// Build the configuration for `version` from `payload` and `decision`.
///
/// `host` is only consulted for `ProbeAndSet` decisions.
pub fn compose<H>(
    decision: &DirectiveDecision,
    version: &VersionTriple,
    payload: &StaticPayload,
    host: &H,
) -> ModuleConfiguration
where
    H: HostIntrospector + ?Sized,
{
    let mut config = ModuleConfiguration::from_payload(payload);

    for gated in &payload.gated_dependencies {
        if !gated.is_available_for(version) {
            trace!(
                dependency = %gated.name,
                min_major = gated.min_major,
                %version,
                "gated dependency unavailable"
            );
            continue;
        }
        if config.has_dependency(&gated.name) {
            continue;
        }
        config.push_private(&gated.name);
        trace!(dependency = %gated.name, %version, "gated dependency added");
    }

    match &decision.action {
        DirectiveAction::SetStaticValue(value) => {
            config.directive_field = Some(DirectiveField::new(decision.field_name.clone(), *value));
        }
        DirectiveAction::ProbeAndSet(_) => {
            config = probe(decision, config, host);
        }
        DirectiveAction::NoOp => {}
    }

    config
}
