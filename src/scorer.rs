//! Relevance scoring: merges candidates and ranks records.

use crate::searchers::tokenizer::normalize;
use crate::store::RecordStore;
use crate::types::{Candidate, MatchType, Record, RecordId, ScoredRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weights of the relevance formula.
///
/// A candidate's final score is
/// `base + bonus(match_type) + popularity * popularity_factor + rating * rating_factor
/// + token_bonus * matched_tokens`, where `base` comes from the strategy that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
  /// Base score of an exact name match.
  pub exact_base: f32,
  /// Base score of a name index hit.
  pub name_base: f32,
  /// Base score of a symptom index hit.
  pub symptom_base: f32,
  /// Base score of a category index hit.
  pub category_base: f32,
  /// Fuzzy base score is `similarity * fuzzy_factor`.
  pub fuzzy_factor: f32,
  pub exact_bonus: f32,
  pub name_bonus: f32,
  pub symptom_bonus: f32,
  pub category_bonus: f32,
  pub fuzzy_bonus: f32,
  /// Multiplier for the record's popularity counter.
  pub popularity_factor: f32,
  /// Multiplier for the record's rating.
  pub rating_factor: f32,
  /// Points per query token found in the names or benefits.
  pub token_bonus: f32,
}

impl Default for ScoringWeights {
  fn default() -> Self {
    Self {
      exact_base: 100.0,
      name_base: 80.0,
      symptom_base: 70.0,
      category_base: 60.0,
      fuzzy_factor: 50.0,
      exact_bonus: 50.0,
      name_bonus: 30.0,
      symptom_bonus: 20.0,
      category_bonus: 10.0,
      fuzzy_bonus: 0.0,
      popularity_factor: 0.1,
      rating_factor: 5.0,
      token_bonus: 10.0,
    }
  }
}

impl ScoringWeights {
  /// Bonus added for a match type.
  pub fn bonus(&self, match_type: MatchType) -> f32 {
    match match_type {
      MatchType::Exact => self.exact_bonus,
      MatchType::Name => self.name_bonus,
      MatchType::Symptom => self.symptom_bonus,
      MatchType::Category => self.category_bonus,
      MatchType::Fuzzy => self.fuzzy_bonus,
    }
  }
}

/// Turns candidates into a ranked, deduplicated list of [`ScoredRecord`]s.
///
/// When several candidates point at the same record, only the
/// highest-scoring one survives; on equal scores the earlier candidate wins.
/// The output is sorted by descending score with a stable sort, so ties keep
/// the order in which records were first surfaced.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
  weights: ScoringWeights,
}

impl RelevanceScorer {
  pub fn new(weights: ScoringWeights) -> Self {
    Self { weights }
  }

  /// Weights in use.
  pub fn weights(&self) -> &ScoringWeights {
    &self.weights
  }

  /// Score `candidates` against `tokens` (normalized query tokens).
  ///
  /// Candidates whose record is missing from `store` are dropped.
  pub fn score(
    &self,
    store: &RecordStore,
    candidates: &[Candidate],
    tokens: &[String],
  ) -> Vec<ScoredRecord> {
    let mut best: Vec<ScoredRecord> = Vec::new();
    let mut positions: HashMap<RecordId, usize> = HashMap::new();

    for candidate in candidates {
      let Some(record) = store.get(candidate.record) else {
        tracing::warn!(id = candidate.record, "candidate refers to unknown record");
        continue;
      };

      let matched_tokens = matched_tokens(record, tokens);
      let score = self.candidate_score(record, candidate, matched_tokens.len());

      match positions.get(&candidate.record) {
        Some(&pos) => {
          if score > best[pos].score {
            let entry = &mut best[pos];
            entry.score = score;
            entry.match_type = candidate.match_type;
            entry.similarity = candidate.similarity;
          }
        }
        None => {
          positions.insert(candidate.record, best.len());
          best.push(ScoredRecord {
            record: record.clone(),
            score,
            match_type: candidate.match_type,
            similarity: candidate.similarity,
            matched_tokens,
          });
        }
      }
    }

    sort_by_score(&mut best);
    best
  }

  /// Final score of one candidate for `record`.
  pub fn candidate_score(&self, record: &Record, candidate: &Candidate, matched_tokens: usize) -> f32 {
    let w = &self.weights;
    candidate.base
      + w.bonus(candidate.match_type)
      + record.popularity as f32 * w.popularity_factor
      + record.rating * w.rating_factor
      + matched_tokens as f32 * w.token_bonus
  }
}

/// Stable sort by descending score.
pub fn sort_by_score(results: &mut [ScoredRecord]) {
  results.sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });
}

/// Tokens contained in the record's common name, scientific name or joined
/// benefit list.
pub fn matched_tokens(record: &Record, tokens: &[String]) -> Vec<String> {
  if tokens.is_empty() {
    return Vec::new();
  }

  let common = normalize(&record.common_name);
  let scientific = normalize(&record.scientific_name);
  let benefits = normalize(&record.benefits.join(" "));

  tokens
    .iter()
    .filter(|token| {
      common.contains(token.as_str())
        || scientific.contains(token.as_str())
        || benefits.contains(token.as_str())
    })
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store() -> RecordStore {
    RecordStore::new(vec![
      Record::new(1, "Manzanilla", "Matricaria chamomilla")
        .with_category("Digestiva")
        .with_rating(4.5)
        .with_popularity(95)
        .with_benefits(["Digestión", "Relajación"]),
      Record::new(2, "Jengibre", "Zingiber officinale")
        .with_category("Digestiva")
        .with_rating(4.7)
        .with_benefits(["Digestivo", "Náuseas"]),
    ])
  }

  fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
  }

  #[test]
  fn composite_score_adds_every_component() {
    let store = store();
    let candidates = vec![Candidate::new(1, MatchType::Exact, 100.0)];
    let results = RelevanceScorer::default().score(&store, &candidates, &tokens(&["manzanilla"]));

    // 100 base + 50 bonus + 9.5 popularity + 22.5 rating + 10 token
    assert_eq!(results.len(), 1);
    assert!((results[0].score - 192.0).abs() < 1e-3);
    assert_eq!(results[0].matched_tokens, vec!["manzanilla"]);
  }

  #[test]
  fn fuzzy_gets_no_bonus() {
    let store = store();
    let candidate = Candidate::new(2, MatchType::Fuzzy, 40.0).with_similarity(0.8);
    let record = store.get(2).unwrap();
    let score = RelevanceScorer::default().candidate_score(record, &candidate, 0);
    assert!((score - (40.0 + 4.7 * 5.0)).abs() < 1e-3);
  }

  #[test]
  fn keeps_highest_scoring_candidate_per_record() {
    let store = store();
    let candidates = vec![
      Candidate::new(2, MatchType::Category, 60.0),
      Candidate::new(2, MatchType::Symptom, 70.0),
      Candidate::new(2, MatchType::Fuzzy, 31.0).with_similarity(0.62),
    ];
    let results = RelevanceScorer::default().score(&store, &candidates, &[]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_type, MatchType::Symptom);
    assert!(results[0].similarity.is_none());
  }

  #[test]
  fn equal_scores_keep_first_candidate() {
    let store = RecordStore::new(vec![Record::new(1, "Menta", "Mentha")]);
    let candidates = vec![
      Candidate::new(1, MatchType::Name, 80.0),
      Candidate::new(1, MatchType::Symptom, 90.0),
    ];
    let results = RelevanceScorer::default().score(&store, &candidates, &[]);
    assert_eq!(results[0].match_type, MatchType::Name);
  }

  #[test]
  fn results_sorted_descending_with_stable_ties() {
    let store = RecordStore::new(vec![
      Record::new(1, "A", "a"),
      Record::new(2, "B", "b"),
      Record::new(3, "C", "c"),
    ]);
    let candidates = vec![
      Candidate::new(1, MatchType::Category, 60.0),
      Candidate::new(2, MatchType::Exact, 100.0),
      Candidate::new(3, MatchType::Category, 60.0),
    ];
    let ids: Vec<_> = RelevanceScorer::default()
      .score(&store, &candidates, &[])
      .iter()
      .map(|r| r.record.id)
      .collect();
    assert_eq!(ids, vec![2, 1, 3]);
  }

  #[test]
  fn unknown_records_are_dropped() {
    let results =
      RelevanceScorer::default().score(&store(), &[Candidate::new(99, MatchType::Name, 80.0)], &[]);
    assert!(results.is_empty());
  }

  #[test]
  fn matched_tokens_checks_names_and_benefits() {
    let store = store();
    let record = store.get(2).unwrap();
    let found = matched_tokens(record, &tokens(&["nauseas", "zingiber", "digestiva"]));
    // the category is not part of the token overlap
    assert_eq!(found, vec!["nauseas", "zingiber"]);
  }
}
