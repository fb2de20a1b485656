//! Common types used throughout docpage
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single record as returned by a store
pub type Document = JsonObject;

/// Default name of the internal identity field
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Field that lean results receive the stringified identity in
pub const LEAN_ID_FIELD: &str = "id";

// ============================================================================
// Visibility
// ============================================================================

/// Which soft-delete visibility an operation family applies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only records that are not soft-deleted
    #[default]
    Default,
    /// Only soft-deleted records
    Deleted,
    /// All records, soft-deleted or not
    WithDeleted,
}

impl Visibility {
    /// All variants, in declaration order
    pub const ALL: [Visibility; 3] = [Self::Default, Self::Deleted, Self::WithDeleted];

    /// Name of this visibility as used in logs and config keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Deleted => "deleted",
            Self::WithDeleted => "with_deleted",
        }
    }

    /// Whether a record with the given soft-delete flag is visible
    pub fn admits(&self, deleted: bool) -> bool {
        match self {
            Self::Default => !deleted,
            Self::Deleted => deleted,
            Self::WithDeleted => true,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Identity
// ============================================================================

/// String form of an identity value.
///
/// Strings are returned as-is, extended-JSON object ids (`{"$oid": "..."}`)
/// yield their hex string, and anything else uses its JSON text.
pub fn identity_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => match map.get("$oid") {
            Some(JsonValue::String(oid)) => oid.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visibility_admits() {
        assert!(Visibility::Default.admits(false));
        assert!(!Visibility::Default.admits(true));
        assert!(Visibility::Deleted.admits(true));
        assert!(!Visibility::Deleted.admits(false));
        assert!(Visibility::WithDeleted.admits(true));
        assert!(Visibility::WithDeleted.admits(false));
    }

    #[test]
    fn test_visibility_serde() {
        let v: Visibility = serde_json::from_str("\"with_deleted\"").unwrap();
        assert_eq!(v, Visibility::WithDeleted);
        assert_eq!(Visibility::Deleted.to_string(), "deleted");
        assert_eq!(Visibility::default(), Visibility::Default);
    }

    #[test]
    fn test_identity_string() {
        assert_eq!(identity_string(&json!("abc")), "abc");
        assert_eq!(identity_string(&json!(42)), "42");
        assert_eq!(
            identity_string(&json!({"$oid": "507f1f77bcf86cd799439011"})),
            "507f1f77bcf86cd799439011"
        );
        assert_eq!(identity_string(&json!({"k": 1})), r#"{"k":1}"#);
    }
}
