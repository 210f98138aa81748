//! Herbario - the search core of a medicinal plants catalog.
//!
//! Herbario indexes a snapshot of catalog records and answers free-text
//! queries with three strategies (exact name equality, token lookups in
//! inverted indexes, and Jaro fuzzy matching), a weighted relevance score,
//! conjunctive filters and autocomplete suggestions.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod filter;
pub mod history;
pub mod index;
pub mod ingest;
pub mod scorer;
pub mod searcher;
pub mod searchers;
pub mod store;
pub mod suggest;
pub mod types;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::config::*;
  pub use crate::context::*;
  pub use crate::engine::*;
  pub use crate::error::{ConfigError, HerbarioError, IngestError};
  pub use crate::filter::*;
  pub use crate::history::*;
  pub use crate::index::*;
  pub use crate::scorer::*;
  pub use crate::searcher::*;
  pub use crate::store::*;
  pub use crate::suggest::*;
  pub use crate::types::*;
}
