//! Entry points
//!
//! [`Paginator`] owns the per-visibility default options and routes each
//! call to the right operation family of a model. The soft-delete entry
//! points only exist for models implementing [`SoftDeleteModel`].

use super::engine::{with_callback, PaginationEngine};
use super::types::Page;
use crate::config::PaginatorConfig;
use crate::error::{Error, Result};
use crate::options::PaginateOptions;
use crate::store::{source_for, Filter, QuerySource, SoftDeleteModel};
use crate::types::Visibility;
use tracing::Instrument;

/// Pagination entry points, configured once and reused across calls
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginatorConfig,
    engine: PaginationEngine,
}

impl Paginator {
    /// Create a paginator from explicit configuration
    pub fn new(config: PaginatorConfig) -> Self {
        let engine = PaginationEngine::with_id_field(config.identity_field.clone());
        Self { config, engine }
    }

    /// Configuration in use
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Underlying engine
    pub fn engine(&self) -> &PaginationEngine {
        &self.engine
    }

    /// Paginate records that are not soft-deleted
    pub async fn paginate<M>(
        &self,
        model: &M,
        filter: impl Into<Option<Filter>>,
        options: PaginateOptions,
    ) -> Result<Page>
    where
        M: QuerySource + ?Sized,
    {
        self.run(model, Visibility::Default, filter.into(), options)
            .await
    }

    /// Paginate only soft-deleted records
    pub async fn paginate_deleted<M>(
        &self,
        model: &M,
        filter: impl Into<Option<Filter>>,
        options: PaginateOptions,
    ) -> Result<Page>
    where
        M: SoftDeleteModel,
    {
        self.run_visibility(model, Visibility::Deleted, filter.into(), options)
            .await
    }

    /// Paginate all records, soft-deleted or not
    pub async fn paginate_with_deleted<M>(
        &self,
        model: &M,
        filter: impl Into<Option<Filter>>,
        options: PaginateOptions,
    ) -> Result<Page>
    where
        M: SoftDeleteModel,
    {
        self.run_visibility(model, Visibility::WithDeleted, filter.into(), options)
            .await
    }

    /// Paginate with any visibility, chosen at runtime
    pub async fn paginate_visibility<M>(
        &self,
        model: &M,
        visibility: Visibility,
        filter: impl Into<Option<Filter>>,
        options: PaginateOptions,
    ) -> Result<Page>
    where
        M: SoftDeleteModel,
    {
        self.run_visibility(model, visibility, filter.into(), options)
            .await
    }

    /// Default-visibility pagination that also reports to a callback.
    ///
    /// The callback sees the same outcome that is returned.
    pub async fn paginate_with_callback<M, C>(
        &self,
        model: &M,
        filter: impl Into<Option<Filter>>,
        options: PaginateOptions,
        callback: C,
    ) -> Result<Page>
    where
        M: QuerySource + ?Sized,
        C: FnOnce(std::result::Result<&Page, &Error>),
    {
        with_callback(self.paginate(model, filter, options), callback).await
    }

    async fn run_visibility<M>(
        &self,
        model: &M,
        visibility: Visibility,
        filter: Option<Filter>,
        options: PaginateOptions,
    ) -> Result<Page>
    where
        M: SoftDeleteModel,
    {
        self.run(source_for(model, visibility), visibility, filter, options)
            .await
    }

    async fn run<S>(
        &self,
        source: &S,
        visibility: Visibility,
        filter: Option<Filter>,
        options: PaginateOptions,
    ) -> Result<Page>
    where
        S: QuerySource + ?Sized,
    {
        let options = options.merged_over(self.config.defaults_for(visibility));
        let span = tracing::debug_span!("paginate", %visibility);
        self.engine
            .paginate(source, filter.unwrap_or_default(), &options)
            .instrument(span)
            .await
    }
}
