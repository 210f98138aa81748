//! Autocomplete suggestions.

use crate::config::SearchConfig;
use crate::searchers::tokenizer::{normalize, text_len};
use crate::store::RecordStore;
use std::collections::HashSet;

/// Proposes completions from record names and benefits.
///
/// Suggestions keep their original spelling (accents and case) and come out
/// in discovery order: first every matching name, then every matching
/// benefit. There is no ranking.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
  popular: Vec<String>,
  min_query_len: usize,
  max_suggestions: usize,
}

impl Default for SuggestionGenerator {
  fn default() -> Self {
    Self::from_config(&SearchConfig::default())
  }
}

impl SuggestionGenerator {
  /// Takes the popular list and limits from `config`.
  pub fn from_config(config: &SearchConfig) -> Self {
    Self {
      popular: config.popular_searches.clone(),
      min_query_len: config.min_query_len,
      max_suggestions: config.max_suggestions,
    }
  }

  /// The list returned for queries that are too short.
  pub fn popular(&self) -> &[String] {
    &self.popular
  }

  /// Suggestions for `query`, at most `max_suggestions`, without duplicates.
  pub fn suggest(&self, store: &RecordStore, query: &str) -> Vec<String> {
    let query = normalize(query);
    if text_len(&query) < self.min_query_len {
      return self.popular.clone();
    }

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();
    let mut push = |candidate: &str| {
      if suggestions.len() < self.max_suggestions
        && normalize(candidate).contains(query.as_str())
        && seen.insert(candidate.to_string())
      {
        suggestions.push(candidate.to_string());
      }
    };

    for record in store.iter() {
      push(&record.common_name);
      push(&record.scientific_name);
    }
    for record in store.iter() {
      for benefit in &record.benefits {
        push(benefit);
      }
    }

    tracing::trace!(query = %query, count = suggestions.len(), "generated suggestions");
    suggestions
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Record;

  fn store() -> RecordStore {
    RecordStore::new(vec![
      Record::new(1, "Manzanilla", "Matricaria chamomilla")
        .with_benefits(["Digestión", "Relajación", "Anti-inflamatorio"]),
      Record::new(2, "Sábila", "Aloe vera")
        .with_benefits(["Cicatrizante", "Anti-inflamatorio"]),
      Record::new(3, "Jengibre", "Zingiber officinale")
        .with_benefits(["Digestivo", "Náuseas"]),
    ])
  }

  #[test]
  fn short_queries_return_popular_searches() {
    let generator = SuggestionGenerator::default();
    assert_eq!(generator.suggest(&store(), "m"), generator.popular());
    assert_eq!(generator.suggest(&store(), "  "), generator.popular());
    assert_eq!(generator.popular()[0], "manzanilla");
  }

  #[test]
  fn names_come_before_benefits() {
    let suggestions = SuggestionGenerator::default().suggest(&store(), "ma");
    assert_eq!(suggestions, vec!["Manzanilla", "Matricaria chamomilla", "Anti-inflamatorio"]);
  }

  #[test]
  fn duplicates_are_removed() {
    let suggestions = SuggestionGenerator::default().suggest(&store(), "inflam");
    assert_eq!(suggestions, vec!["Anti-inflamatorio"]);
  }

  #[test]
  fn accent_insensitive_and_keeps_original_spelling() {
    let suggestions = SuggestionGenerator::default().suggest(&store(), "SABI");
    assert_eq!(suggestions, vec!["Sábila"]);
    let suggestions = SuggestionGenerator::default().suggest(&store(), "digesti");
    assert_eq!(suggestions, vec!["Digestión", "Digestivo"]);
  }

  #[test]
  fn capped_at_max_suggestions() {
    let records = (0..20)
      .map(|i| Record::new(i, format!("Menta {i}"), format!("Mentha {i}")))
      .collect();
    let suggestions = SuggestionGenerator::default().suggest(&RecordStore::new(records), "ment");
    assert_eq!(suggestions.len(), 8);
    assert_eq!(suggestions[0], "Menta 0");
    assert_eq!(suggestions[1], "Mentha 0");
  }
}
