//! The `Searcher` trait, which defines the interface for retrieval strategies.

use crate::context::SearchContext;
use crate::types::{Candidate, StrategyKind};

/// A retrieval strategy that turns a query into tagged candidates.
///
/// A `Searcher` is a modular component responsible for one way of finding
/// records, such as exact name equality, index lookups or fuzzy matching. The
/// [`SearchEngine`](crate::engine::SearchEngine) runs every registered
/// searcher on each query and hands the union of their candidates to the
/// relevance scorer.
///
/// Strategies are independent: none of them is skipped because another one
/// already found a record. Overlap is resolved when scoring.
pub trait Searcher: Send + Sync {
  /// Returns the `StrategyKind` of this searcher.
  fn kind(&self) -> StrategyKind;

  /// Produces candidates for the query held by `context`.
  ///
  /// Each candidate carries the strategy's base score; bonuses and the
  /// record-level contributions are added later by the scorer.
  fn search(&self, context: &SearchContext) -> Vec<Candidate>;
}
