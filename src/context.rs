//! Context provided to searchers during a search operation.

use crate::config::SearchConfig;
use crate::index::SearchIndex;
use crate::store::RecordStore;

/// Everything a [`Searcher`](crate::searcher::Searcher) may consult while
/// producing candidates.
///
/// The query and tokens are already normalized; strategies compare them
/// against normalized record fields.
pub struct SearchContext<'a> {
  /// The records being searched.
  pub store: &'a RecordStore,
  /// The built inverted indexes for `store`.
  pub index: &'a SearchIndex,
  /// Normalized, trimmed query.
  pub query: &'a str,
  /// Query tokens longer than one character.
  pub tokens: &'a [String],
  /// Active configuration.
  pub config: &'a SearchConfig,
}

impl<'a> SearchContext<'a> {
  /// Creates a new `SearchContext`.
  pub fn new(
    store: &'a RecordStore,
    index: &'a SearchIndex,
    query: &'a str,
    tokens: &'a [String],
    config: &'a SearchConfig,
  ) -> Self {
    Self {
      store,
      index,
      query,
      tokens,
      config,
    }
  }
}
