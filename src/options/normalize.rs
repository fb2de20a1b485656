//! Option normalization
//!
//! Resolves defaults and the skip position. No validation happens here:
//! negative or zero values go through the arithmetic as given and whatever
//! results is the store's concern.

use super::types::{PaginateOptions, Populate, PopulateItem, Projection, SortSpec};

/// Page size used when the caller supplies none
pub const DEFAULT_LIMIT: i64 = 10;

/// Which position mode a call runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Offset mode, with the offset echoed back in the page
    Offset(i64),
    /// Page mode, with the 1-based page number echoed back
    Page(i64),
}

/// Options with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptions {
    pub select: Option<Projection>,
    pub sort: Option<SortSpec>,
    pub populate: Vec<PopulateItem>,
    pub lean: bool,
    pub lean_with_id: bool,
    pub limit: i64,
    pub skip: i64,
    pub position: Position,
}

impl NormalizedOptions {
    /// Whether a fetch has to be issued at all
    pub fn fetches(&self) -> bool {
        self.limit != 0
    }

    /// Whether fetched records get an `id` copied from their identity
    pub fn injects_id(&self) -> bool {
        self.lean && self.lean_with_id
    }
}

impl PaginateOptions {
    /// Apply defaults and resolve skip.
    ///
    /// Precedence: a supplied `offset` wins, then a supplied `page`
    /// (skip = (page - 1) * limit), otherwise offset mode at 0.
    pub fn normalize(&self) -> NormalizedOptions {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        let (skip, position) = match (self.offset, self.page) {
            (Some(offset), _) => (offset, Position::Offset(offset)),
            (None, Some(page)) => (
                page.saturating_sub(1).saturating_mul(limit),
                Position::Page(page),
            ),
            (None, None) => (0, Position::Offset(0)),
        };

        NormalizedOptions {
            select: self.select.clone(),
            sort: self.sort.clone(),
            populate: self
                .populate
                .clone()
                .map(Populate::into_items)
                .unwrap_or_default(),
            lean: self.lean.unwrap_or(false),
            lean_with_id: self.lean_with_id.unwrap_or(true),
            limit,
            skip,
            position,
        }
    }
}
