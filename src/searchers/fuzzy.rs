//! A `Searcher` implementation for fuzzy (approximate) name matching.

use crate::context::SearchContext;
use crate::searcher::Searcher;
use crate::searchers::tokenizer::normalize;
use crate::types::{Candidate, MatchType, Record, StrategyKind};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Jaro similarity between two strings, in `[0.0, 1.0]`.
///
/// Characters match when equal and no further apart than
/// `floor(max(len1, len2) / 2) - 1` positions. Strings too short to have a
/// window of at least one position only score when identical.
pub fn jaro(a: &str, b: &str) -> f64 {
  if a == b {
    return 1.0;
  }

  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  let (len1, len2) = (a.len(), b.len());
  if len1 == 0 || len2 == 0 {
    return 0.0;
  }

  let window = (len1.max(len2) / 2).saturating_sub(1);
  if window < 1 {
    return 0.0;
  }

  let mut a_matched = vec![false; len1];
  let mut b_matched = vec![false; len2];
  let mut matches = 0usize;

  for (i, ch) in a.iter().enumerate() {
    let start = i.saturating_sub(window);
    let end = (i + window + 1).min(len2);
    for j in start..end {
      if b_matched[j] || b[j] != *ch {
        continue;
      }
      a_matched[i] = true;
      b_matched[j] = true;
      matches += 1;
      break;
    }
  }

  if matches == 0 {
    return 0.0;
  }

  let mut transpositions = 0usize;
  let mut k = 0;
  for (i, ch) in a.iter().enumerate() {
    if !a_matched[i] {
      continue;
    }
    while !b_matched[k] {
      k += 1;
    }
    if b[k] != *ch {
      transpositions += 1;
    }
    k += 1;
  }

  let m = matches as f64;
  (m / len1 as f64 + m / len2 as f64 + (m - transpositions as f64 / 2.0) / m) / 3.0
}

/// A searcher that compares the whole query with each record's names using
/// Jaro similarity.
///
/// `FuzzySearch` catches typos such as "manzanila". A record qualifies when
/// the better of its two name similarities reaches the threshold; its base
/// score is that similarity times the configured fuzzy factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzySearch {
  /// Overrides `SearchConfig::fuzzy_threshold` when set.
  threshold: Option<f64>,
}

impl FuzzySearch {
  /// Creates a `FuzzySearch` that uses the configured threshold.
  pub fn new() -> Self {
    Self { threshold: None }
  }

  /// Sets a fixed similarity threshold, from 0.0 to 1.0.
  pub fn with_threshold(mut self, threshold: f64) -> Self {
    self.threshold = Some(threshold);
    self
  }

  /// Best similarity between `query` and either name of `record`.
  pub fn similarity(record: &Record, query: &str) -> f64 {
    let common = jaro(query, &normalize(&record.common_name));
    let scientific = jaro(query, &normalize(&record.scientific_name));
    common.max(scientific)
  }

  /// Match a single record against the normalized query.
  pub fn match_record(&self, record: &Record, query: &str, threshold: f64, factor: f32) -> Option<Candidate> {
    let similarity = Self::similarity(record, query);
    if similarity >= threshold {
      let similarity = similarity as f32;
      Some(Candidate::new(record.id, MatchType::Fuzzy, similarity * factor).with_similarity(similarity))
    } else {
      None
    }
  }
}

impl Searcher for FuzzySearch {
  fn kind(&self) -> StrategyKind {
    StrategyKind::Fuzzy
  }

  fn search(&self, context: &SearchContext) -> Vec<Candidate> {
    if context.query.is_empty() {
      return Vec::new();
    }

    let threshold = self.threshold.unwrap_or(context.config.fuzzy_threshold);
    let factor = context.config.weights.fuzzy_factor;

    #[cfg(feature = "parallel")]
    let records = context.store.records().par_iter();
    #[cfg(not(feature = "parallel"))]
    let records = context.store.records().iter();

    let results: Vec<Candidate> = records
      .filter_map(|record| self.match_record(record, context.query, threshold, factor))
      .collect();

    tracing::trace!(query = context.query, threshold, hits = results.len(), "fuzzy search");
    results
  }
}
