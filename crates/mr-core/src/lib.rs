//! modrules core: host version classification and directive resolution.
//!
//! One pass runs `classify → resolve → compose`:
//!
//! ```text
//! VersionTriple ──classify──▶ CompatibilityBucket ──resolve──▶ DirectiveDecision
//!                                                                    │
//!                       StaticPayload + HostIntrospector ──compose───┘
//!                                                                    ▼
//!                                                          ModuleConfiguration
//! ```
//!
//! Nothing in the pass can fail. The only input the resolver does not
//! control, the host's introspection surface, is queried through
//! [`HostIntrospector`] and every miss degrades to "leave the directive at
//! its default".

pub mod classify;
pub mod compose;
pub mod logging;
pub mod policy;
pub mod probe;
pub mod resolver;
pub mod shims;

pub use classify::{classify, CompatibilityBucket, RangeRule, COMPATIBILITY_TABLE};
pub use compose::{compose, ModuleConfiguration};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use policy::{
    legal_values, policy_table, resolve, DirectiveAction, DirectiveDecision, DirectiveField,
    DirectiveValue, DIRECTIVE_FIELD, VERSION_ORDER_ENUM,
};
pub use probe::{
    probe, try_find_enum_value, try_set_member, EnumTypeInfo, EnumValue, HostIntrospector,
    MemberInfo, NullIntrospector, StaticIntrospector,
};
pub use resolver::{resolve_configuration, resolve_module, Resolution};
pub use shims::{is_supported, ApiShims};

pub use mr_common::VersionTriple;
pub use mr_config::{PchMode, StaticPayload};
