//! Store module
//!
//! The narrow contract the pagination engine calls through, plus an
//! in-memory reference implementation.
//!
//! # Overview
//!
//! The store module provides:
//! - `QuerySource` - One count/find operation family
//! - `SoftDeleteModel` - Access to the deleted-only and all-records families
//! - `Filter`, `FindQuery` - What gets handed to a store
//! - `MemoryCollection` - In-memory store with soft-delete aware views

mod matcher;
mod memory;
mod types;

pub use matcher::matches;
pub use memory::{MemoryCollection, MemoryView, SOFT_DELETE_FIELD};
pub use types::{source_for, Filter, FindQuery, QuerySource, SoftDeleteModel};
