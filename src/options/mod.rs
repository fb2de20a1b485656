//! Pagination options module
//!
//! Caller-facing options and their normalized form.
//!
//! # Overview
//!
//! The options module provides:
//! - `PaginateOptions` - Per-call options, every field optional
//! - `Projection`, `SortSpec`, `Populate` - Opaque specs passed through to the store
//! - `NormalizedOptions` - Options with defaults applied and skip resolved
//! - `Position` - Which of offset or page mode a call runs in

mod normalize;
mod types;

pub use normalize::{NormalizedOptions, Position, DEFAULT_LIMIT};
pub use types::{PaginateOptions, Populate, PopulateItem, Projection, SortSpec};
