//! Static payload types.
//!
//! The payload is the declarative half of a module's build rules: fixed
//! dependency name lists and a precompiled-header mode. The resolver merges
//! its version-dependent decisions into a copy of it and never mutates it.

use mr_common::VersionTriple;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Precompiled-header usage mode understood by the host build tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PchMode {
    /// Leave the choice to the host tool.
    #[default]
    Default,
    /// Never use precompiled headers.
    NoPchs,
    /// Private PCH only, never a shared one.
    NoSharedPchs,
    /// Always use a shared PCH.
    UseSharedPchs,
    /// Use an explicit private PCH when declared, else a shared one.
    UseExplicitOrSharedPchs,
}

impl PchMode {
    /// Name of the mode as the host tool spells it.
    pub fn host_name(&self) -> &'static str {
        match self {
            PchMode::Default => "Default",
            PchMode::NoPchs => "NoPCHs",
            PchMode::NoSharedPchs => "NoSharedPCHs",
            PchMode::UseSharedPchs => "UseSharedPCHs",
            PchMode::UseExplicitOrSharedPchs => "UseExplicitOrSharedPCHs",
        }
    }
}

impl std::fmt::Display for PchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.host_name())
    }
}

/// A dependency that only exists from a given host major version onward.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct GatedDependency {
    pub name: String,
    pub min_major: u32,
}

impl GatedDependency {
    pub fn new(name: impl Into<String>, min_major: u32) -> Self {
        Self {
            name: name.into(),
            min_major,
        }
    }

    /// Whether this dependency exists for the given host version.
    pub fn is_available_for(&self, version: &VersionTriple) -> bool {
        version.major >= self.min_major
    }
}

/// Declarative module payload the resolver output is merged into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StaticPayload {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Module the payload describes, for diagnostics only.
    #[serde(default)]
    pub module_name: Option<String>,

    #[serde(default)]
    pub public_dependencies: BTreeSet<String>,

    /// Order is preserved into the output; duplicates are rejected on load.
    #[serde(default)]
    pub private_dependencies: Vec<String>,

    #[serde(default)]
    pub pch_mode: PchMode,

    #[serde(default)]
    pub gated_dependencies: Vec<GatedDependency>,
}

fn default_schema_version() -> String {
    crate::PAYLOAD_SCHEMA_VERSION.to_string()
}

impl StaticPayload {
    /// Empty payload with the given PCH mode.
    pub fn new(pch_mode: PchMode) -> Self {
        Self {
            schema_version: default_schema_version(),
            module_name: None,
            public_dependencies: BTreeSet::new(),
            private_dependencies: Vec::new(),
            pch_mode,
            gated_dependencies: Vec::new(),
        }
    }

    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    pub fn with_public<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_dependencies
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_private<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private_dependencies
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_gated(mut self, name: impl Into<String>, min_major: u32) -> Self {
        self.gated_dependencies
            .push(GatedDependency::new(name, min_major));
        self
    }
}

impl Default for StaticPayload {
    fn default() -> Self {
        default_payload()
    }
}

/// Public dependencies of the embedded editor module.
const DEFAULT_PUBLIC: &[&str] = &["Core"];

/// Private dependencies of the embedded editor module, in link order.
const DEFAULT_PRIVATE: &[&str] = &[
    "Projects",
    "InputCore",
    "UnrealEd",
    "ToolMenus",
    "CoreUObject",
    "Engine",
    "Slate",
    "SlateCore",
    "LevelEditor",
    "EditorStyle",
    "ApplicationCore",
    "AppFramework",
    "BlueprintGraph",
    "Kismet",
    "GraphEditor",
    "HTTP",
    "Json",
    "JsonUtilities",
    "AssetRegistry",
    "ContentBrowser",
    "UMG",
    "UMGEditor",
    "StringTableEditor",
];

/// The editor framework module was split out in major version 5.
const EDITOR_FRAMEWORK: (&str, u32) = ("EditorFramework", 5);

/// Payload embedded in the binary, used when no payload file is found.
pub fn default_payload() -> StaticPayload {
    StaticPayload::new(PchMode::UseExplicitOrSharedPchs)
        .with_module_name("LanguageOne")
        .with_public(DEFAULT_PUBLIC.iter().copied())
        .with_private(DEFAULT_PRIVATE.iter().copied())
        .with_gated(EDITOR_FRAMEWORK.0, EDITOR_FRAMEWORK.1)
}

/// JSON Schema describing payload files.
pub fn payload_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(StaticPayload);
    serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
}
