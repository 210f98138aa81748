//! The built-in retrieval strategies.
//!
//! Each strategy implements [`Searcher`](crate::searcher::Searcher) and can be
//! registered with the [`SearchEngine`](crate::engine::SearchEngine).
//!
//! # Available Searchers
//!
//! - [`ExactSearch`]: the whole query equals a common or scientific name.
//! - [`TokenSearch`]: each query token is a substring of a name, description
//!   word, benefit or category keyword.
//! - [`FuzzySearch`]: the query is close to a name under Jaro similarity.
//!
//! # Example: Choosing Strategies
//!
//! ```rust
//! use herbario::prelude::*;
//! use herbario::searchers::{ExactSearch, TokenSearch};
//!
//! // Skip fuzzy matching entirely
//! let engine = SearchEngine::builder()
//!     .with(Box::new(ExactSearch::new()))
//!     .with(Box::new(TokenSearch::new()))
//!     .build();
//! # let _ = engine;
//! ```

/// Implements whole-query name equality.
pub mod exact;
/// Implements Jaro similarity and the fuzzy searcher.
pub mod fuzzy;
/// Implements per-token lookups in the inverted indexes.
pub mod token;
/// Provides text normalization and tokenization utilities.
pub mod tokenizer;

pub use exact::ExactSearch;
pub use fuzzy::{jaro, FuzzySearch};
pub use token::TokenSearch;
