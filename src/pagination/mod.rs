//! Pagination module
//!
//! Supports: offset mode, page-number mode, lean results, soft-delete visibility
//!
//! # Overview
//!
//! The pagination module computes a bounded page of records plus its
//! metadata in one call. The count and the fetch run concurrently against
//! the store; either failing fails the whole call.
//!
//! - `PaginationEngine` - The stateless core
//! - `Paginator` - Entry points with per-visibility default options
//! - `Page`, `PagePosition` - The result envelope

mod engine;
mod paginator;
mod types;

pub use engine::{with_callback, PaginationEngine};
pub use paginator::Paginator;
pub use types::{page_count, Page, PagePosition};
