//! Page envelope types

use crate::types::Document;
use serde::{Deserialize, Serialize};

/// Position metadata of a page: offset mode or page mode, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PagePosition {
    /// Offset mode
    Offset {
        /// Offset the page starts at
        offset: i64,
    },
    /// Page mode
    Page {
        /// 1-based page number
        page: i64,
        /// Number of pages, at least 1
        pages: i64,
    },
}

/// One page of results
///
/// Serializes flat: `{docs, total, limit, offset}` or
/// `{docs, total, limit, page, pages}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records of this page, in store order
    pub docs: Vec<Document>,
    /// Records matching the filter, ignoring skip and limit
    pub total: u64,
    /// Effective limit
    pub limit: i64,
    /// Offset or page metadata
    #[serde(flatten)]
    pub position: PagePosition,
}

impl Page {
    /// Offset, if the page was computed in offset mode
    pub fn offset(&self) -> Option<i64> {
        match self.position {
            PagePosition::Offset { offset } => Some(offset),
            PagePosition::Page { .. } => None,
        }
    }

    /// Page number, if the page was computed in page mode
    pub fn page(&self) -> Option<i64> {
        match self.position {
            PagePosition::Page { page, .. } => Some(page),
            PagePosition::Offset { .. } => None,
        }
    }

    /// Page count, if the page was computed in page mode
    pub fn pages(&self) -> Option<i64> {
        match self.position {
            PagePosition::Page { pages, .. } => Some(pages),
            PagePosition::Offset { .. } => None,
        }
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// ceil(total / limit), reported as 1 when that comes out as zero.
///
/// A zero limit has no page size to divide by and also reports 1.
pub fn page_count(total: u64, limit: i64) -> i64 {
    if limit == 0 {
        return 1;
    }
    let total = i64::try_from(total).unwrap_or(i64::MAX);
    let quotient = total / limit;
    let remainder = total % limit;
    let pages = if remainder != 0 && (remainder > 0) == (limit > 0) {
        quotient + 1
    } else {
        quotient
    };
    if pages == 0 {
        1
    } else {
        pages
    }
}
