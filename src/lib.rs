// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # docpage
//!
//! Offset and page-number pagination over document collections.
//!
//! ## Features
//!
//! - **One-call pages**: records plus total and page count, computed together
//! - **Concurrent count + fetch**: both store operations are in flight at once
//! - **Offset or page mode**: `offset` wins over `page`, default is offset 0
//! - **Lean results**: plain records with the identity copied into `id`
//! - **Soft-delete visibility**: live only, deleted only, or everything
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docpage::{MemoryCollection, PaginateOptions, Paginator, PaginatorConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let posts = MemoryCollection::from_json("posts", r#"[{"_id": "p1", "title": "Hi"}]"#)?;
//!     let paginator = Paginator::new(PaginatorConfig::default());
//!
//!     let page = paginator
//!         .paginate(&posts, None, PaginateOptions::new().with_page(1).with_lean(true))
//!         .await?;
//!
//!     println!("{} of {} (page {:?} of {:?})", page.docs.len(), page.total, page.page(), page.pages());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Paginator: paginate / paginate_deleted / paginate_with_deleted│
//! │  (per-visibility defaults, shallow merge)                      │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴───────────────────────────────┐
//! │  PaginationEngine: normalize → count ∥ find → lean ids → Page  │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │ QuerySource / SoftDeleteModel
//! ┌───────────────────────────────┴───────────────────────────────┐
//! │  Store (MemoryCollection or your own)                          │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pagination options and normalization
pub mod options;

/// Store contract and in-memory store
pub mod store;

/// Pagination engine and entry points
pub mod pagination;

/// Paginator configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::PaginatorConfig;
pub use options::{PaginateOptions, Populate, PopulateItem, Projection, SortSpec};
pub use pagination::{Page, PagePosition, PaginationEngine, Paginator};
pub use store::{Filter, FindQuery, MemoryCollection, QuerySource, SoftDeleteModel};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
