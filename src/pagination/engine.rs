//! The pagination engine
//!
//! Normalizes options, runs the count and the bounded fetch concurrently
//! and assembles the page envelope.

use super::types::{page_count, Page, PagePosition};
use crate::error::{Error, Result};
use crate::options::{PaginateOptions, Position};
use crate::store::{Filter, FindQuery, QuerySource};
use crate::types::{identity_string, Document, JsonValue, DEFAULT_ID_FIELD, LEAN_ID_FIELD};
use std::future::Future;

/// Stateless pagination over any [`QuerySource`]
#[derive(Debug, Clone)]
pub struct PaginationEngine {
    /// Identity field copied into `id` for lean results
    id_field: String,
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationEngine {
    /// Create an engine using `_id` as identity field
    pub fn new() -> Self {
        Self::with_id_field(DEFAULT_ID_FIELD)
    }

    /// Create an engine with a custom identity field
    pub fn with_id_field(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
        }
    }

    /// Identity field name
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Compute one page.
    ///
    /// The count and the fetch are issued together; the first failure
    /// aborts the call and the other operation is dropped. With a zero
    /// limit the store is only asked to count.
    pub async fn paginate<S>(
        &self,
        source: &S,
        filter: Filter,
        options: &PaginateOptions,
    ) -> Result<Page>
    where
        S: QuerySource + ?Sized,
    {
        let options = options.normalize();

        tracing::debug!(
            skip = options.skip,
            limit = options.limit,
            position = ?options.position,
            lean = options.lean,
            populate = options.populate.len(),
            "paginating"
        );

        let count = source.count(&filter);
        let fetch = async {
            if !options.fetches() {
                return Ok(Vec::new());
            }
            let query = options.populate.iter().cloned().fold(
                FindQuery::new(filter.clone())
                    .select(options.select.clone())
                    .sort(options.sort.clone())
                    .skip(options.skip)
                    .limit(options.limit)
                    .lean(options.lean),
                FindQuery::populate,
            );
            source.find(query).await
        };

        let (total, mut docs) = futures::try_join!(count, fetch).map_err(|e: Error| {
            tracing::warn!(error = %e, "pagination aborted");
            e
        })?;

        if options.injects_id() {
            self.inject_ids(&mut docs);
        }

        let position = match options.position {
            Position::Offset(offset) => PagePosition::Offset { offset },
            Position::Page(page) => PagePosition::Page {
                page,
                pages: page_count(total, options.limit),
            },
        };

        tracing::debug!(total, returned = docs.len(), "page assembled");

        Ok(Page {
            docs,
            total,
            limit: options.limit,
            position,
        })
    }

    /// Copy each record's identity, as a string, into its `id` field
    fn inject_ids(&self, docs: &mut [Document]) {
        for doc in docs {
            if let Some(id) = doc.get(&self.id_field).map(identity_string) {
                doc.insert(LEAN_ID_FIELD.to_string(), JsonValue::String(id));
            }
        }
    }
}

/// Await a result, hand it to `callback`, then return it.
///
/// Lets callback-style callers observe exactly the outcome the returned
/// result carries.
pub async fn with_callback<T, F, C>(future: F, callback: C) -> Result<T>
where
    F: Future<Output = Result<T>>,
    C: FnOnce(std::result::Result<&T, &Error>),
{
    let result = future.await;
    callback(result.as_ref());
    result
}
