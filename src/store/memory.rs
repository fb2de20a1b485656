//! In-memory reference store
//!
//! A small document collection that implements the store contract, used by
//! the CLI and the test suite. Soft-deleted documents are plain documents
//! carrying `deleted: true`; this store only reads that flag.

use super::matcher::{lookup, matches, sort_order};
use super::types::{Filter, FindQuery, QuerySource, SoftDeleteModel};
use crate::error::{Error, Result};
use crate::options::{PopulateItem, Projection, SortSpec};
use crate::types::{Document, JsonObject, JsonValue, Visibility, DEFAULT_ID_FIELD};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Field holding the soft-delete flag
pub const SOFT_DELETE_FIELD: &str = "deleted";

struct Inner {
    name: String,
    id_field: String,
    documents: RwLock<Vec<Document>>,
    relations: RwLock<HashMap<String, MemoryCollection>>,
}

/// One visibility-scoped view of a collection
#[derive(Clone)]
pub struct MemoryView {
    inner: Arc<Inner>,
    visibility: Visibility,
}

/// In-memory document collection with soft-delete aware views
#[derive(Clone)]
pub struct MemoryCollection {
    active: MemoryView,
    deleted: MemoryView,
    with_deleted: MemoryView,
}

impl std::fmt::Debug for MemoryCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCollection")
            .field("name", &self.active.inner.name)
            .field("id_field", &self.active.inner.id_field)
            .finish_non_exhaustive()
    }
}

impl MemoryCollection {
    /// Create an empty collection using `_id` as identity field
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id_field(name, DEFAULT_ID_FIELD)
    }

    /// Create an empty collection with a custom identity field
    pub fn with_id_field(name: impl Into<String>, id_field: impl Into<String>) -> Self {
        Self::build(name.into(), id_field.into(), Vec::new())
    }

    /// Create a collection pre-filled with documents
    pub fn with_documents(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self::build(name.into(), DEFAULT_ID_FIELD.to_string(), documents)
    }

    fn build(name: String, id_field: String, documents: Vec<Document>) -> Self {
        let inner = Arc::new(Inner {
            name,
            id_field,
            documents: RwLock::new(documents),
            relations: RwLock::new(HashMap::new()),
        });
        let view = |visibility| MemoryView {
            inner: Arc::clone(&inner),
            visibility,
        };
        Self {
            active: view(Visibility::Default),
            deleted: view(Visibility::Deleted),
            with_deleted: view(Visibility::WithDeleted),
        }
    }

    /// Create a collection from a JSON array of objects
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        Ok(Self::with_documents(name, documents))
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.active.inner.name
    }

    /// Identity field name
    pub fn id_field(&self) -> &str {
        &self.active.inner.id_field
    }

    /// View for a specific visibility
    pub fn view(&self, visibility: Visibility) -> &MemoryView {
        match visibility {
            Visibility::Default => &self.active,
            Visibility::Deleted => &self.deleted,
            Visibility::WithDeleted => &self.with_deleted,
        }
    }

    /// Append a document
    pub async fn insert(&self, document: Document) {
        self.active.inner.documents.write().await.push(document);
    }

    /// Append several documents
    pub async fn insert_many(&self, documents: impl IntoIterator<Item = Document>) {
        self.active.inner.documents.write().await.extend(documents);
    }

    /// Number of stored documents, soft-deleted included
    pub async fn len(&self) -> usize {
        self.active.inner.documents.read().await.len()
    }

    /// Check if no documents are stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Resolve populate requests on `path` against `target`
    pub async fn relate(&self, path: impl Into<String>, target: &MemoryCollection) {
        self.active
            .inner
            .relations
            .write()
            .await
            .insert(path.into(), target.clone());
    }
}

#[async_trait]
impl QuerySource for MemoryCollection {
    async fn count(&self, filter: &Filter) -> Result<u64> {
        self.active.count(filter).await
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>> {
        self.active.find(query).await
    }
}

impl SoftDeleteModel for MemoryCollection {
    fn deleted(&self) -> &dyn QuerySource {
        &self.deleted
    }

    fn with_deleted(&self) -> &dyn QuerySource {
        &self.with_deleted
    }
}

// ============================================================================
// View
// ============================================================================

impl MemoryView {
    /// Visibility this view applies
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Visible documents matching the filter, in insertion order
    async fn matching(&self, filter: &Filter) -> Result<Vec<Document>> {
        let documents = self.inner.documents.read().await;
        let mut out = Vec::new();
        for doc in documents.iter() {
            if self.visibility.admits(is_soft_deleted(doc)) && matches(doc, filter)? {
                out.push(doc.clone());
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl QuerySource for MemoryView {
    async fn count(&self, filter: &Filter) -> Result<u64> {
        let count = self.matching(filter).await?.len() as u64;
        tracing::debug!(
            collection = %self.inner.name,
            visibility = %self.visibility,
            count,
            "count"
        );
        Ok(count)
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>> {
        let mut docs = self.matching(&query.filter).await?;

        if let Some(sort) = &query.sort {
            let keys = parse_sort(sort)?;
            docs.sort_by(|a, b| compare_by_keys(a, b, &keys));
        }

        if let Some(skip) = query.skip {
            if skip < 0 {
                return Err(Error::store(
                    "find",
                    format!("skip must not be negative, got {skip}"),
                ));
            }
            docs = docs.into_iter().skip(skip as usize).collect();
        }

        // A negative limit behaves like its absolute value.
        if let Some(limit) = query.limit.filter(|l| *l != 0) {
            docs.truncate(limit.unsigned_abs() as usize);
        }

        if let Some(select) = &query.select {
            let projection = parse_projection(select, &self.inner.id_field)?;
            docs = docs
                .into_iter()
                .map(|doc| projection.apply(doc, &self.inner.id_field))
                .collect();
        }

        for item in &query.populate {
            self.populate(&mut docs, item).await?;
        }

        tracing::debug!(
            collection = %self.inner.name,
            visibility = %self.visibility,
            returned = docs.len(),
            "find"
        );
        Ok(docs)
    }
}

impl MemoryView {
    async fn populate(&self, docs: &mut [Document], item: &PopulateItem) -> Result<()> {
        let path = item
            .path()
            .ok_or_else(|| Error::store("find", "populate item has no path"))?;

        let target = self
            .inner
            .relations
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| {
                Error::store(
                    "find",
                    format!("no relation registered for path '{path}' on '{}'", self.inner.name),
                )
            })?;

        let id_field = target.id_field();
        let projection = match item {
            PopulateItem::Options(map) => map
                .get("select")
                .map(|select| -> Result<FieldProjection> {
                    let select: Projection = serde_json::from_value(select.clone())?;
                    parse_projection(&select, id_field)
                })
                .transpose()?,
            PopulateItem::Path(_) => None,
        };

        let related = target.active.matching(&Filter::new()).await?;
        let resolve = |id: &JsonValue| -> Option<JsonValue> {
            related
                .iter()
                .find(|doc| doc.get(id_field) == Some(id))
                .map(|doc| {
                    let doc = doc.clone();
                    let doc = match &projection {
                        Some(p) => p.apply(doc, id_field),
                        None => doc,
                    };
                    JsonValue::Object(doc)
                })
        };

        for doc in docs.iter_mut() {
            let Some(reference) = doc.get(path) else {
                continue;
            };
            let expanded = match reference {
                JsonValue::Array(ids) => {
                    JsonValue::Array(ids.iter().filter_map(&resolve).collect())
                }
                JsonValue::Null => JsonValue::Null,
                id => resolve(id).unwrap_or(JsonValue::Null),
            };
            doc.insert(path.to_string(), expanded);
        }
        Ok(())
    }
}

fn is_soft_deleted(doc: &Document) -> bool {
    doc.get(SOFT_DELETE_FIELD)
        .and_then(JsonValue::as_bool)
        .unwrap_or(false)
}

// ============================================================================
// Sort
// ============================================================================

fn parse_sort(sort: &SortSpec) -> Result<Vec<(String, bool)>> {
    match sort {
        SortSpec::Fields(fields) => Ok(fields
            .split_whitespace()
            .map(|f| match f.strip_prefix('-') {
                Some(name) => (name.to_string(), false),
                None => (f.trim_start_matches('+').to_string(), true),
            })
            .collect()),
        SortSpec::Map(map) => map
            .iter()
            .map(|(field, direction)| Ok((field.clone(), sort_ascending(field, direction)?)))
            .collect(),
    }
}

fn sort_ascending(field: &str, direction: &JsonValue) -> Result<bool> {
    match direction {
        JsonValue::Number(n) if n.as_f64() == Some(1.0) => Ok(true),
        JsonValue::Number(n) if n.as_f64() == Some(-1.0) => Ok(false),
        JsonValue::String(s) => match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(true),
            "desc" | "descending" => Ok(false),
            _ => Err(invalid_sort(field, direction)),
        },
        _ => Err(invalid_sort(field, direction)),
    }
}

fn invalid_sort(field: &str, direction: &JsonValue) -> Error {
    Error::store(
        "find",
        format!("invalid sort direction for '{field}': {direction}"),
    )
}

fn compare_by_keys(a: &Document, b: &Document, keys: &[(String, bool)]) -> Ordering {
    for (field, ascending) in keys {
        let ord = sort_order(lookup(a, field), lookup(b, field));
        let ord = if *ascending { ord } else { ord.reverse() };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

// ============================================================================
// Projection
// ============================================================================

/// Resolved top-level field projection
#[derive(Debug)]
struct FieldProjection {
    include: bool,
    fields: Vec<String>,
    keep_id: bool,
}

impl FieldProjection {
    fn apply(&self, mut doc: Document, id_field: &str) -> Document {
        if self.include {
            let mut out = JsonObject::new();
            if self.keep_id {
                if let Some(id) = doc.remove(id_field) {
                    out.insert(id_field.to_string(), id);
                }
            }
            for field in &self.fields {
                if let Some(value) = doc.remove(field) {
                    out.insert(field.clone(), value);
                }
            }
            out
        } else {
            for field in &self.fields {
                doc.remove(field);
            }
            if !self.keep_id {
                doc.remove(id_field);
            }
            doc
        }
    }
}

fn parse_projection(select: &Projection, id_field: &str) -> Result<FieldProjection> {
    let entries: Vec<(String, bool)> = match select {
        Projection::Fields(fields) => fields
            .split_whitespace()
            .map(|f| match f.strip_prefix('-') {
                Some(name) => (name.to_string(), false),
                None => (f.trim_start_matches('+').to_string(), true),
            })
            .collect(),
        Projection::Map(map) => map
            .iter()
            .map(|(field, flag)| {
                let on = match flag {
                    JsonValue::Bool(b) => *b,
                    JsonValue::Number(n) => n.as_f64() != Some(0.0),
                    other => {
                        return Err(Error::store(
                            "find",
                            format!("invalid projection for '{field}': {other}"),
                        ))
                    }
                };
                Ok((field.clone(), on))
            })
            .collect::<Result<_>>()?,
    };

    // Identity exclusion is allowed alongside inclusions.
    let keep_id = !entries
        .iter()
        .any(|(field, on)| field == id_field && !on);
    let rest: Vec<&(String, bool)> = entries
        .iter()
        .filter(|(field, _)| field != id_field)
        .collect();

    let include = rest.iter().any(|(_, on)| *on);
    if include && rest.iter().any(|(_, on)| !on) {
        return Err(Error::store(
            "find",
            "projection cannot mix inclusion and exclusion",
        ));
    }

    Ok(FieldProjection {
        include: include || (rest.is_empty() && entries.iter().any(|(_, on)| *on)),
        fields: rest.into_iter().map(|(field, _)| field.clone()).collect(),
        keep_id,
    })
}
