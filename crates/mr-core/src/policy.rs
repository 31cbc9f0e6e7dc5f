//! Directive policy: what to do with the include-order directive per bucket.

use serde::{Deserialize, Serialize};

use crate::classify::CompatibilityBucket;

/// Configuration member the directive is written to.
pub const DIRECTIVE_FIELD: &str = "IncludeOrderVersion";

/// Host enumeration holding the include-order constants.
pub const VERSION_ORDER_ENUM: &str = "EngineIncludeOrderVersion";

/// Value the probe asks the host for in the probed range.
pub const PROBED_VALUE_NAME: &str = "Latest";

/// Values the directive may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectiveValue {
    /// Most capable include order the host defines.
    Latest,
    /// The stable order immediately before `Latest`.
    PenultimateStable,
}

impl DirectiveValue {
    /// Constant name inside [`VERSION_ORDER_ENUM`].
    pub fn name(&self) -> &'static str {
        match self {
            DirectiveValue::Latest => "Latest",
            DirectiveValue::PenultimateStable => "PenultimateStable",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Latest" => Some(DirectiveValue::Latest),
            "PenultimateStable" => Some(DirectiveValue::PenultimateStable),
            _ => None,
        }
    }
}

impl std::fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the directive is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DirectiveAction {
    /// Assign a known value through the stable member name.
    SetStaticValue(DirectiveValue),
    /// Look the named value up on the host and assign it if possible.
    ProbeAndSet(String),
    /// Leave the directive untouched.
    NoOp,
}

/// Decision produced by the policy table for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveDecision {
    pub field_name: String,
    pub action: DirectiveAction,
}

impl DirectiveDecision {
    fn new(action: DirectiveAction) -> Self {
        Self {
            field_name: DIRECTIVE_FIELD.to_string(),
            action,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.action == DirectiveAction::NoOp
    }
}

/// Resolved directive as it appears in the output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveField {
    pub field_name: String,
    pub value: DirectiveValue,
}

impl DirectiveField {
    pub fn new(field_name: impl Into<String>, value: DirectiveValue) -> Self {
        Self {
            field_name: field_name.into(),
            value,
        }
    }
}

/// Decision for a bucket.
pub fn resolve(bucket: CompatibilityBucket) -> DirectiveDecision {
    let action = match bucket {
        CompatibilityBucket::PreDirectiveEra => DirectiveAction::NoOp,
        CompatibilityBucket::LegacyStableValue => {
            DirectiveAction::SetStaticValue(DirectiveValue::PenultimateStable)
        }
        CompatibilityBucket::LatestSentinel => {
            DirectiveAction::SetStaticValue(DirectiveValue::Latest)
        }
        CompatibilityBucket::ProbedValue => {
            DirectiveAction::ProbeAndSet(PROBED_VALUE_NAME.to_string())
        }
    };
    DirectiveDecision::new(action)
}

/// Values a configuration may carry for the directive in a bucket.
pub fn legal_values(bucket: CompatibilityBucket) -> &'static [DirectiveValue] {
    match bucket {
        CompatibilityBucket::PreDirectiveEra => &[],
        CompatibilityBucket::ProbedValue => &[DirectiveValue::Latest],
        CompatibilityBucket::LegacyStableValue => &[DirectiveValue::PenultimateStable],
        CompatibilityBucket::LatestSentinel => &[DirectiveValue::Latest],
    }
}

/// The full table, in classification order, for inspection and reports.
pub fn policy_table() -> Vec<(CompatibilityBucket, DirectiveDecision)> {
    CompatibilityBucket::ALL
        .iter()
        .map(|&bucket| (bucket, resolve(bucket)))
        .collect()
}
