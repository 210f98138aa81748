//! A `Searcher` implementation for per-token index lookups.

use crate::context::SearchContext;
use crate::index::IndexKind;
use crate::searcher::Searcher;
use crate::types::{Candidate, MatchType, StrategyKind};

/// A searcher that looks every query token up in the three inverted indexes.
///
/// A keyword qualifies when it *contains* the token, so "digest" reaches
/// records indexed under "digestiva", "digestion" and "digestivo". Hits in the
/// name index become [`MatchType::Name`] candidates, symptom hits
/// [`MatchType::Symptom`] and category hits [`MatchType::Category`], each with
/// its own base score.
///
/// The same record may be returned several times, once per token and index
/// that reached it; the scorer keeps the best one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSearch;

impl TokenSearch {
  pub fn new() -> Self {
    Self
  }
}

impl Searcher for TokenSearch {
  fn kind(&self) -> StrategyKind {
    StrategyKind::Token
  }

  fn search(&self, context: &SearchContext) -> Vec<Candidate> {
    let weights = &context.config.weights;
    let sources = [
      (IndexKind::Name, MatchType::Name, weights.name_base),
      (IndexKind::Symptom, MatchType::Symptom, weights.symptom_base),
      (IndexKind::Category, MatchType::Category, weights.category_base),
    ];

    let mut results = Vec::new();
    for token in context.tokens {
      for (kind, match_type, base) in sources {
        results.extend(
          context
            .index
            .lookup(kind, token)
            .into_iter()
            .map(|record| Candidate::new(record, match_type, base)),
        );
      }
    }

    tracing::trace!(tokens = context.tokens.len(), hits = results.len(), "token search");
    results
  }
}
