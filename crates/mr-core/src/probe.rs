//! Capability probing against the host's introspection surface.
//!
//! In the probed range the directive member exists on some host builds and
//! not on others, and the include-order enumeration may or may not define
//! the requested constant. Nothing about it can be linked statically, so the
//! probe asks the host by name:
//!
//! ```text
//! find enum type EngineIncludeOrderVersion
//!     |
//!     v [found]
//! find constant <value_name> in it
//!     |
//!     v [found]
//! find member IncludeOrderVersion, check assignable and typed by that enum
//!     |
//!     v [ok]
//! assign
//! ```
//!
//! Any miss, type mismatch or host panic along the way abandons the probe and
//! returns the configuration unchanged. The directive then keeps the host's
//! built-in default, which is always safe.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

use crate::compose::ModuleConfiguration;
use crate::policy::{
    DirectiveAction, DirectiveDecision, DirectiveField, DirectiveValue, DIRECTIVE_FIELD,
    VERSION_ORDER_ENUM,
};

/// A constant found in a host enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub type_name: String,
    pub name: String,
    pub ordinal: i64,
}

/// A host enumeration type and its constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumTypeInfo {
    pub name: String,
    #[serde(default)]
    pub constants: BTreeMap<String, i64>,
}

impl EnumTypeInfo {
    pub fn value(&self, name: &str) -> Option<EnumValue> {
        self.constants.get(name).map(|&ordinal| EnumValue {
            type_name: self.name.clone(),
            name: name.to_string(),
            ordinal,
        })
    }
}

/// A member of the host's configuration object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    /// Name of the member's declared type.
    pub value_type: String,
    pub assignable: bool,
}

/// Name-keyed view of the host tool's types and configuration members.
///
/// Implementations answer "does this exist" and nothing more; the probe
/// decides what to do with the answer. Returning `None` is always allowed.
///
/// A panic inside either method is caught and read as `None`. The process
/// panic hook still runs first, so the default hook prints the usual
/// `thread '...' panicked at ...` line to stderr. Hosts that need a quiet
/// stderr should install their own hook with [`std::panic::set_hook`].
pub trait HostIntrospector {
    /// Look up an enumeration type by name.
    fn find_enum_type(&self, type_name: &str) -> Option<EnumTypeInfo>;

    /// Look up a member of the configuration object by name.
    fn find_member(&self, member_name: &str) -> Option<MemberInfo>;
}

/// Host with nothing to introspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIntrospector;

impl HostIntrospector for NullIntrospector {
    fn find_enum_type(&self, _type_name: &str) -> Option<EnumTypeInfo> {
        None
    }

    fn find_member(&self, _member_name: &str) -> Option<MemberInfo> {
        None
    }
}

/// In-memory introspection directory.
///
/// Hosts can dump their surface to JSON and load it here, or tests can build
/// one with the `with_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticIntrospector {
    #[serde(default)]
    enums: BTreeMap<String, EnumTypeInfo>,
    #[serde(default)]
    members: BTreeMap<String, MemberInfo>,
}

impl StaticIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory exposing the include-order enum and an assignable directive member.
    pub fn with_directive_surface() -> Self {
        Self::new()
            .with_enum(VERSION_ORDER_ENUM, &["Oldest", "PenultimateStable", "Latest"])
            .with_member(DIRECTIVE_FIELD, VERSION_ORDER_ENUM, true)
    }

    /// Register an enumeration; ordinals follow the slice order.
    pub fn with_enum(mut self, type_name: &str, constants: &[&str]) -> Self {
        let constants = constants
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i as i64))
            .collect();
        self.enums.insert(
            type_name.to_string(),
            EnumTypeInfo {
                name: type_name.to_string(),
                constants,
            },
        );
        self
    }

    pub fn with_member(mut self, name: &str, value_type: &str, assignable: bool) -> Self {
        self.members.insert(
            name.to_string(),
            MemberInfo {
                name: name.to_string(),
                value_type: value_type.to_string(),
                assignable,
            },
        );
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl HostIntrospector for StaticIntrospector {
    fn find_enum_type(&self, type_name: &str) -> Option<EnumTypeInfo> {
        self.enums.get(type_name).cloned()
    }

    fn find_member(&self, member_name: &str) -> Option<MemberInfo> {
        self.members.get(member_name).cloned()
    }
}

/// Run a host query, treating a panic as "not found".
fn guarded<T>(what: &str, query: impl FnOnce() -> Option<T>) -> Option<T> {
    panic::catch_unwind(AssertUnwindSafe(query)).unwrap_or_else(|_| {
        debug!(query = what, "host introspection panicked; treating as missing");
        None
    })
}

/// Find `value_name` in the host enumeration `type_name`.
///
/// Total: returns `None` if the type or the constant is missing.
pub fn try_find_enum_value<H>(host: &H, type_name: &str, value_name: &str) -> Option<EnumValue>
where
    H: HostIntrospector + ?Sized,
{
    let enum_type = match guarded("find_enum_type", || host.find_enum_type(type_name)) {
        Some(t) if t.name == type_name => t,
        Some(t) => {
            debug!(
                requested = type_name,
                returned = %t.name,
                "host returned a different enum type"
            );
            return None;
        }
        None => {
            debug!(type_name, "enum type not found");
            return None;
        }
    };

    let value = enum_type.value(value_name);
    if value.is_none() {
        debug!(type_name, value_name, "enum constant not found");
    }
    value
}

/// Assign `value` to the configuration member `member_name`.
///
/// Total: returns `false` and leaves `target` untouched unless the member
/// exists, is assignable, is typed by the value's enumeration, and the value
/// names a known directive value.
pub fn try_set_member<H>(
    host: &H,
    target: &mut ModuleConfiguration,
    member_name: &str,
    value: &EnumValue,
) -> bool
where
    H: HostIntrospector + ?Sized,
{
    let Some(member) = guarded("find_member", || host.find_member(member_name)) else {
        debug!(member_name, "member not found");
        return false;
    };

    if member.name != member_name {
        debug!(
            requested = member_name,
            returned = %member.name,
            "host returned a different member"
        );
        return false;
    }
    if !member.assignable {
        debug!(member_name, "member is read-only");
        return false;
    }
    if member.value_type != value.type_name {
        debug!(
            member_name,
            member_type = %member.value_type,
            value_type = %value.type_name,
            "member type does not match value type"
        );
        return false;
    }
    let Some(directive_value) = DirectiveValue::from_name(&value.name) else {
        debug!(value = %value.name, "enum constant is not a known directive value");
        return false;
    };

    target.directive_field = Some(DirectiveField::new(member_name, directive_value));
    true
}

/// Apply a `ProbeAndSet` decision through the host's introspection surface.
///
/// Other decisions pass through untouched. Never fails: on any miss the
/// configuration comes back exactly as it went in.
pub fn probe<H>(
    decision: &DirectiveDecision,
    target: ModuleConfiguration,
    host: &H,
) -> ModuleConfiguration
where
    H: HostIntrospector + ?Sized,
{
    let DirectiveAction::ProbeAndSet(value_name) = &decision.action else {
        return target;
    };

    let Some(value) = try_find_enum_value(host, VERSION_ORDER_ENUM, value_name) else {
        debug!(field = %decision.field_name, value_name = %value_name, "probe abandoned");
        return target;
    };

    let mut target = target;
    if try_set_member(host, &mut target, &decision.field_name, &value) {
        info!(field = %decision.field_name, value = %value.name, "directive set by probe");
    } else {
        debug!(field = %decision.field_name, value_name = %value_name, "probe abandoned");
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::resolve;
    use crate::CompatibilityBucket;
    use mr_config::PchMode;

    fn empty_config() -> ModuleConfiguration {
        ModuleConfiguration::new(PchMode::Default)
    }

    fn probe_decision(value_name: &str) -> DirectiveDecision {
        DirectiveDecision {
            field_name: DIRECTIVE_FIELD.to_string(),
            action: DirectiveAction::ProbeAndSet(value_name.to_string()),
        }
    }

    #[test]
    fn finds_known_constant() {
        let host = StaticIntrospector::with_directive_surface();
        let value = try_find_enum_value(&host, VERSION_ORDER_ENUM, "Latest").unwrap();
        assert_eq!(value.name, "Latest");
        assert_eq!(value.type_name, VERSION_ORDER_ENUM);
        assert_eq!(value.ordinal, 2);
    }

    #[test]
    fn missing_type_or_constant_is_none() {
        let host = StaticIntrospector::with_directive_surface();
        assert!(try_find_enum_value(&host, "NoSuchEnum", "Latest").is_none());
        assert!(try_find_enum_value(&host, VERSION_ORDER_ENUM, "Unreal9_9").is_none());
        assert!(try_find_enum_value(&NullIntrospector, VERSION_ORDER_ENUM, "Latest").is_none());
    }

    #[test]
    fn set_member_requires_assignable_member() {
        let host = StaticIntrospector::new()
            .with_enum(VERSION_ORDER_ENUM, &["Latest"])
            .with_member(DIRECTIVE_FIELD, VERSION_ORDER_ENUM, false);
        let value = try_find_enum_value(&host, VERSION_ORDER_ENUM, "Latest").unwrap();
        let mut config = empty_config();
        assert!(!try_set_member(&host, &mut config, DIRECTIVE_FIELD, &value));
        assert!(config.directive_field.is_none());
    }

    #[test]
    fn set_member_requires_matching_type() {
        let host = StaticIntrospector::new()
            .with_enum(VERSION_ORDER_ENUM, &["Latest"])
            .with_member(DIRECTIVE_FIELD, "int32", true);
        let value = try_find_enum_value(&host, VERSION_ORDER_ENUM, "Latest").unwrap();
        let mut config = empty_config();
        assert!(!try_set_member(&host, &mut config, DIRECTIVE_FIELD, &value));
    }

    #[test]
    fn set_member_rejects_unknown_directive_value() {
        let host = StaticIntrospector::with_directive_surface();
        let value = try_find_enum_value(&host, VERSION_ORDER_ENUM, "Oldest").unwrap();
        let mut config = empty_config();
        assert!(!try_set_member(&host, &mut config, DIRECTIVE_FIELD, &value));
        assert!(config.directive_field.is_none());
    }

    #[test]
    fn probe_sets_latest_when_surface_present() {
        let host = StaticIntrospector::with_directive_surface();
        let decision = resolve(CompatibilityBucket::ProbedValue);
        let config = probe(&decision, empty_config(), &host);
        assert_eq!(
            config.directive_field,
            Some(DirectiveField::new(DIRECTIVE_FIELD, DirectiveValue::Latest))
        );
    }

    #[test]
    fn probe_without_surface_is_unchanged() {
        let decision = resolve(CompatibilityBucket::ProbedValue);
        let before = empty_config().with_private(["Slate"]);
        let after = probe(&decision, before.clone(), &NullIntrospector);
        assert_eq!(before, after);
    }

    #[test]
    fn probe_passes_through_other_decisions() {
        let host = StaticIntrospector::with_directive_surface();
        let decision = resolve(CompatibilityBucket::PreDirectiveEra);
        let config = probe(&decision, empty_config(), &host);
        assert!(config.directive_field.is_none());
    }

    #[test]
    fn probe_with_garbage_name_is_unchanged() {
        let host = StaticIntrospector::with_directive_surface();
        for name in ["", "latest", "Latest ", "PenultimateStable\0", "🦀"] {
            let config = probe(&probe_decision(name), empty_config(), &host);
            assert!(config.directive_field.is_none(), "name {:?} should not resolve", name);
        }
    }

    #[test]
    fn directory_loads_from_json() {
        let json = r#"{
            "enums": {
                "EngineIncludeOrderVersion": {
                    "name": "EngineIncludeOrderVersion",
                    "constants": {"Latest": 7}
                }
            },
            "members": {
                "IncludeOrderVersion": {
                    "name": "IncludeOrderVersion",
                    "value_type": "EngineIncludeOrderVersion",
                    "assignable": true
                }
            }
        }"#;
        let host = StaticIntrospector::from_json(json).unwrap();
        let value = try_find_enum_value(&host, VERSION_ORDER_ENUM, "Latest").unwrap();
        assert_eq!(value.ordinal, 7);

        let config = probe(&probe_decision("Latest"), empty_config(), &host);
        assert_eq!(
            config.directive_field.map(|f| f.value),
            Some(DirectiveValue::Latest)
        );
    }

    struct PanickingHost;

    impl HostIntrospector for PanickingHost {
        fn find_enum_type(&self, _type_name: &str) -> Option<EnumTypeInfo> {
            panic!("introspection unavailable");
        }

        fn find_member(&self, _member_name: &str) -> Option<MemberInfo> {
            panic!("introspection unavailable");
        }
    }

    #[derive(Clone, Default)]
    struct LogSink(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn host_panic_is_logged_at_debug() {
        let sink = LogSink::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(sink.clone()))
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            probe(
                &resolve(CompatibilityBucket::ProbedValue),
                empty_config(),
                &PanickingHost,
            )
        });
        assert!(config.directive_field.is_none());

        let output = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let line = output
            .lines()
            .find(|l| l.contains("host introspection panicked"))
            .expect("panic is logged");
        assert!(line.contains("DEBUG"), "unexpected level: {line}");
        assert!(!output.contains("WARN"));
    }
}
