//! Store contract
//!
//! The pagination engine reaches a document store only through
//! [`QuerySource`]. A model that supports soft deletion additionally
//! implements [`SoftDeleteModel`] to expose the two alternate operation
//! families.

use crate::error::{Error, Result};
use crate::options::{PopulateItem, Projection, SortSpec};
use crate::types::{Document, JsonObject, JsonValue, Visibility};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Filter
// ============================================================================

/// Opaque query predicate, passed to the store verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(JsonObject);

impl Filter {
    /// Create an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from a JSON value; `null` is the empty filter
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Ok(Self::new()),
            other => Err(Error::invalid_option(
                "filter",
                format!("expected a JSON object, got {other}"),
            )),
        }
    }

    /// Add an equality condition
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// The underlying conditions
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// Check if the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<JsonObject> for Filter {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

// ============================================================================
// FindQuery
// ============================================================================

/// A bounded fetch, configured in the order the store applies it:
/// projection, sort, skip, limit, lean, then each populate item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub select: Option<Projection>,
    pub sort: Option<SortSpec>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub lean: bool,
    pub populate: Vec<PopulateItem>,
}

impl FindQuery {
    /// Start a query for the given filter
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    /// Set the field projection
    #[must_use]
    pub fn select(mut self, select: impl Into<Option<Projection>>) -> Self {
        self.select = select.into();
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn sort(mut self, sort: impl Into<Option<SortSpec>>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Set the number of records to skip
    #[must_use]
    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the maximum number of records
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request plain records
    #[must_use]
    pub fn lean(mut self, lean: bool) -> Self {
        self.lean = lean;
        self
    }

    /// Append one related-record expansion
    #[must_use]
    pub fn populate(mut self, item: PopulateItem) -> Self {
        self.populate.push(item);
        self
    }
}

// ============================================================================
// Traits
// ============================================================================

/// One count/find operation family of a store
#[async_trait]
pub trait QuerySource: Send + Sync {
    /// Count records matching the filter
    async fn count(&self, filter: &Filter) -> Result<u64>;

    /// Execute a bounded fetch
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>>;
}

/// A model whose store tracks soft-deleted records.
///
/// The model itself is the default family (soft-deleted records hidden).
pub trait SoftDeleteModel: QuerySource {
    /// Family that sees only soft-deleted records
    fn deleted(&self) -> &dyn QuerySource;

    /// Family that sees every record
    fn with_deleted(&self) -> &dyn QuerySource;
}

#[async_trait]
impl<T: QuerySource + ?Sized> QuerySource for Arc<T> {
    async fn count(&self, filter: &Filter) -> Result<u64> {
        (**self).count(filter).await
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>> {
        (**self).find(query).await
    }
}

impl<T: SoftDeleteModel + ?Sized> SoftDeleteModel for Arc<T> {
    fn deleted(&self) -> &dyn QuerySource {
        (**self).deleted()
    }

    fn with_deleted(&self) -> &dyn QuerySource {
        (**self).with_deleted()
    }
}

/// Select the operation family for a visibility
pub fn source_for<M: SoftDeleteModel>(model: &M, visibility: Visibility) -> &dyn QuerySource {
    match visibility {
        Visibility::Default => model,
        Visibility::Deleted => model.deleted(),
        Visibility::WithDeleted => model.with_deleted(),
    }
}
