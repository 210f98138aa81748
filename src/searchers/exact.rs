//! A `Searcher` implementation for whole-query name equality.

use crate::context::SearchContext;
use crate::searcher::Searcher;
use crate::searchers::tokenizer::normalize;
use crate::types::{Candidate, MatchType, Record, StrategyKind};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Finds records whose common or scientific name equals the whole query.
///
/// Comparison happens on normalized text, so "SABILA" and "sábila" both hit a
/// record named "Sábila".
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSearch;

impl ExactSearch {
  pub fn new() -> Self {
    Self
  }

  /// Whether `record` is an exact match for the normalized `query`.
  pub fn is_match(record: &Record, query: &str) -> bool {
    !query.is_empty()
      && (normalize(&record.common_name) == query || normalize(&record.scientific_name) == query)
  }
}

impl Searcher for ExactSearch {
  fn kind(&self) -> StrategyKind {
    StrategyKind::Exact
  }

  fn search(&self, context: &SearchContext) -> Vec<Candidate> {
    let base = context.config.weights.exact_base;

    #[cfg(feature = "parallel")]
    let records = context.store.records().par_iter();
    #[cfg(not(feature = "parallel"))]
    let records = context.store.records().iter();

    let results: Vec<Candidate> = records
      .filter(|record| Self::is_match(record, context.query))
      .map(|record| Candidate::new(record.id, MatchType::Exact, base))
      .collect();

    tracing::trace!(query = context.query, hits = results.len(), "exact search");
    results
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SearchConfig;
  use crate::index::SearchIndex;
  use crate::store::RecordStore;

  fn run(store: &RecordStore, query: &str) -> Vec<Candidate> {
    let config = SearchConfig::default();
    let index = SearchIndex::default();
    let query = normalize(query);
    let context = SearchContext::new(store, &index, &query, &[], &config);
    ExactSearch::new().search(&context)
  }

  #[test]
  fn matches_common_or_scientific_name_in_any_case() {
    let store = RecordStore::new(vec![
      Record::new(1, "Manzanilla", "Matricaria chamomilla"),
      Record::new(2, "Jengibre", "Zingiber officinale"),
    ]);

    let hits = run(&store, "MANZANILLA");
    assert_eq!(hits, vec![Candidate::new(1, MatchType::Exact, 100.0)]);

    let hits = run(&store, "zingiber officinale");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record, 2);
  }

  #[test]
  fn ignores_accents() {
    let store = RecordStore::new(vec![Record::new(2, "Sábila", "Aloe vera")]);
    assert_eq!(run(&store, "sabila").len(), 1);
  }

  #[test]
  fn partial_names_do_not_match() {
    let store = RecordStore::new(vec![Record::new(1, "Manzanilla", "Matricaria chamomilla")]);
    assert!(run(&store, "manzan").is_empty());
  }
}
