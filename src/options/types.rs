//! Option types
//!
//! `select`, `sort` and `populate` are opaque to the engine. They accept
//! either the string form (`"name -age"`) or a structured JSON object and
//! are handed to the store unchanged.

use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

// ============================================================================
// Projection
// ============================================================================

/// Field selection, in string or structured form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    /// Space separated field list, `-field` excludes
    Fields(String),
    /// Map of field to 0/1 (or false/true)
    Map(JsonObject),
}

impl From<&str> for Projection {
    fn from(fields: &str) -> Self {
        Self::Fields(fields.to_string())
    }
}

impl From<String> for Projection {
    fn from(fields: String) -> Self {
        Self::Fields(fields)
    }
}

impl From<JsonObject> for Projection {
    fn from(map: JsonObject) -> Self {
        Self::Map(map)
    }
}

// ============================================================================
// Sort
// ============================================================================

/// Sort specification, in string or structured form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortSpec {
    /// Space separated field list, `-field` sorts descending
    Fields(String),
    /// Map of field to direction (`1`, `-1`, `"asc"`, `"desc"`)
    Map(JsonObject),
}

impl From<&str> for SortSpec {
    fn from(fields: &str) -> Self {
        Self::Fields(fields.to_string())
    }
}

impl From<String> for SortSpec {
    fn from(fields: String) -> Self {
        Self::Fields(fields)
    }
}

impl From<JsonObject> for SortSpec {
    fn from(map: JsonObject) -> Self {
        Self::Map(map)
    }
}

// ============================================================================
// Populate
// ============================================================================

/// One related-record expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PopulateItem {
    /// Path of the reference field to expand
    Path(String),
    /// Structured populate options; must carry a `path` key
    Options(JsonObject),
}

impl PopulateItem {
    /// Path of the reference field this item expands, if it names one
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Options(map) => map.get("path").and_then(|p| p.as_str()),
        }
    }
}

impl From<&str> for PopulateItem {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for PopulateItem {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<JsonObject> for PopulateItem {
    fn from(map: JsonObject) -> Self {
        Self::Options(map)
    }
}

/// A single populate item or an ordered list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Populate {
    One(PopulateItem),
    Many(Vec<PopulateItem>),
}

impl Populate {
    /// Flatten into the ordered list of items
    pub fn into_items(self) -> Vec<PopulateItem> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl From<PopulateItem> for Populate {
    fn from(item: PopulateItem) -> Self {
        Self::One(item)
    }
}

impl From<&str> for Populate {
    fn from(path: &str) -> Self {
        Self::One(path.into())
    }
}

impl From<String> for Populate {
    fn from(path: String) -> Self {
        Self::One(path.into())
    }
}

impl<T: Into<PopulateItem>> From<Vec<T>> for Populate {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// PaginateOptions
// ============================================================================

/// Per-call pagination options
///
/// Every field is optional; `None` means "not supplied" and is resolved by
/// [`PaginateOptions::normalize`]. Presence matters for `offset` and `page`:
/// a supplied `offset` always wins over a supplied `page`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateOptions {
    /// Field projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Projection>,

    /// Sort order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,

    /// Related-record expansion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub populate: Option<Populate>,

    /// Return plain records instead of hydrated ones (default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lean: Option<bool>,

    /// Copy the identity into `id` for lean results (default: true)
    #[serde(default, alias = "lean_with_id", skip_serializing_if = "Option::is_none")]
    pub lean_with_id: Option<bool>,

    /// Page size (default: 10, 0 = count only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Records to skip; selects offset mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// 1-based page number; selects page mode when no offset is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

impl PaginateOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field projection
    #[must_use]
    pub fn with_select(mut self, select: impl Into<Projection>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<SortSpec>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set related-record expansion
    #[must_use]
    pub fn with_populate(mut self, populate: impl Into<Populate>) -> Self {
        self.populate = Some(populate.into());
        self
    }

    /// Set lean mode
    #[must_use]
    pub fn with_lean(mut self, lean: bool) -> Self {
        self.lean = Some(lean);
        self
    }

    /// Set whether lean results get an `id` field
    #[must_use]
    pub fn with_lean_with_id(mut self, lean_with_id: bool) -> Self {
        self.lean_with_id = Some(lean_with_id);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset (offset mode)
    #[must_use]
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page number (page mode)
    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Shallow merge: every field set here wins, unset fields fall back to `defaults`
    #[must_use]
    pub fn merged_over(self, defaults: &PaginateOptions) -> Self {
        Self {
            select: self.select.or_else(|| defaults.select.clone()),
            sort: self.sort.or_else(|| defaults.sort.clone()),
            populate: self.populate.or_else(|| defaults.populate.clone()),
            lean: self.lean.or(defaults.lean),
            lean_with_id: self.lean_with_id.or(defaults.lean_with_id),
            limit: self.limit.or(defaults.limit),
            offset: self.offset.or(defaults.offset),
            page: self.page.or(defaults.page),
        }
    }
}
