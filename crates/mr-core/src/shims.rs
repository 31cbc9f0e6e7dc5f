//! Version-dependent host API selections and the supported host span.
//!
//! Besides the include-order directive, a handful of host APIs changed shape
//! across the supported releases. Module code compiled against a given host
//! has to pick the matching spelling; these helpers make the same choice
//! from the version triple so build rules and code generation agree.

use mr_common::VersionTriple;
use serde::{Deserialize, Serialize};

/// Oldest supported host release.
pub const SUPPORTED_MIN: VersionTriple = VersionTriple::new(4, 26, 0);

/// First host release past the supported span (exclusive).
pub const SUPPORTED_END: VersionTriple = VersionTriple::new(5, 8, 0);

/// Whether the version lies in `[SUPPORTED_MIN, SUPPORTED_END)`.
pub fn is_supported(version: &VersionTriple) -> bool {
    *version >= SUPPORTED_MIN && *version < SUPPORTED_END
}

/// Editor style registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorStyleApi {
    /// `FAppStyle`, from 5.1.
    AppStyle,
    /// `FEditorStyle`, before 5.1.
    EditorStyle,
}

/// How an asset's class is read from its registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClassAccessor {
    /// Full class path, from 5.1.
    ClassPath,
    /// Short class name, before 5.1.
    ClassName,
}

/// Return type of a string table entry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringTableEntryHandle {
    /// Shared pointer to the entry, from 5.0.
    EntryPtr,
    /// Shared pointer to the display string, before 5.0.
    DisplayStringPtr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiShims {
    pub editor_style: EditorStyleApi,
    pub asset_class: AssetClassAccessor,
    pub string_table_entry: StringTableEntryHandle,
}

impl ApiShims {
    pub fn for_version(version: &VersionTriple) -> Self {
        let editor_style = if version.is_at_least(5, 1, 0) {
            EditorStyleApi::AppStyle
        } else {
            EditorStyleApi::EditorStyle
        };
        let asset_class = if version.is_at_least(5, 1, 0) {
            AssetClassAccessor::ClassPath
        } else {
            AssetClassAccessor::ClassName
        };
        let string_table_entry = if version.is_at_least(5, 0, 0) {
            StringTableEntryHandle::EntryPtr
        } else {
            StringTableEntryHandle::DisplayStringPtr
        };

        Self {
            editor_style,
            asset_class,
            string_table_entry,
        }
    }
}
