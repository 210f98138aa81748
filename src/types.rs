//! Core data types for the catalog search engine.

use serde::{Deserialize, Serialize};

/// Type alias for record identifiers.
///
/// Identifiers come from the catalog backend and are stable across loads,
/// which lets the scorer collapse candidates that point at the same plant.
pub type RecordId = u64;

/// A single catalog entry (a medicinal plant) as seen by the search engine.
///
/// Records are read-only snapshots. Every field has a default so that a
/// payload with missing keys still produces a usable record; the defaults are
/// applied once, at ingestion, instead of in every consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
  /// Unique, stable identifier.
  pub id: RecordId,
  /// Common (vernacular) name, e.g. "Manzanilla".
  pub common_name: String,
  /// Scientific name, e.g. "Matricaria chamomilla".
  pub scientific_name: String,
  /// Free-text description. Words longer than three characters are indexed.
  pub description: String,
  /// Category label, one of the catalog's small fixed vocabulary.
  pub category: String,
  /// Benefit and symptom keywords.
  pub benefits: Vec<String>,
  /// Average rating between 0.0 and 5.0.
  pub rating: f32,
  /// Popularity counter (page views on the catalog).
  pub popularity: u32,
  /// Free-text region of origin.
  pub region: String,
}

impl Record {
  /// Creates a record with the given identity and names; every other field
  /// takes its default value.
  pub fn new(
    id: RecordId,
    common_name: impl Into<String>,
    scientific_name: impl Into<String>,
  ) -> Self {
    Self {
      id,
      common_name: common_name.into(),
      scientific_name: scientific_name.into(),
      ..Default::default()
    }
  }

  /// Sets the description.
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  /// Sets the category.
  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = category.into();
    self
  }

  /// Sets the benefit keywords.
  pub fn with_benefits<I, S>(mut self, benefits: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.benefits = benefits.into_iter().map(Into::into).collect();
    self
  }

  /// Sets the rating, clamped to the 0-5 range.
  pub fn with_rating(mut self, rating: f32) -> Self {
    self.rating = clamp_rating(rating);
    self
  }

  /// Sets the popularity counter.
  pub fn with_popularity(mut self, popularity: u32) -> Self {
    self.popularity = popularity;
    self
  }

  /// Sets the region.
  pub fn with_region(mut self, region: impl Into<String>) -> Self {
    self.region = region.into();
    self
  }
}

/// Clamps a rating into `0.0..=5.0`, mapping NaN to zero.
pub(crate) fn clamp_rating(rating: f32) -> f32 {
  if rating.is_nan() {
    0.0
  } else {
    rating.clamp(0.0, 5.0)
  }
}

/// Label describing how a candidate was surfaced.
///
/// The label decides the bonus the scorer adds on top of the strategy's base
/// contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
  /// The whole query equals the common or scientific name.
  Exact,
  /// A token hit the name index (names and description words).
  Name,
  /// A token hit the benefit/symptom index.
  Symptom,
  /// A token hit the category index.
  Category,
  /// The query is approximately equal to one of the names.
  Fuzzy,
}

impl MatchType {
  /// Stable lowercase label, as used in serialized results.
  pub fn label(self) -> &'static str {
    match self {
      MatchType::Exact => "exact",
      MatchType::Name => "name",
      MatchType::Symptom => "symptom",
      MatchType::Category => "category",
      MatchType::Fuzzy => "fuzzy",
    }
  }
}

/// An enumeration of the retrieval strategies.
///
/// Used to identify searchers registered with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
  /// Whole-query equality against the names.
  Exact,
  /// Per-token substring lookup in the inverted indexes.
  Token,
  /// Approximate matching with Jaro similarity.
  Fuzzy,
  /// A user-supplied strategy.
  Custom,
}

/// A transient value produced by a strategy: which record, how it matched and
/// the strategy's base contribution to the relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
  /// The record this candidate points at.
  pub record: RecordId,
  /// How the record was found.
  pub match_type: MatchType,
  /// Base score contributed by the strategy.
  pub base: f32,
  /// Jaro similarity, only set by the fuzzy strategy.
  pub similarity: Option<f32>,
}

impl Candidate {
  /// Creates a candidate without similarity information.
  pub fn new(record: RecordId, match_type: MatchType, base: f32) -> Self {
    Self {
      record,
      match_type,
      base,
      similarity: None,
    }
  }

  /// Attaches a similarity value.
  pub fn with_similarity(mut self, similarity: f32) -> Self {
    self.similarity = Some(similarity);
    self
  }
}

/// A ranked search result.
///
/// This is what the engine hands to the presentation layer: the record
/// itself, its composite relevance score and enough metadata to explain the
/// ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
  /// The matched record.
  pub record: Record,
  /// Composite relevance score; higher ranks first.
  pub score: f32,
  /// The match type of the candidate that produced the final score.
  pub match_type: MatchType,
  /// Jaro similarity when the winning candidate came from fuzzy matching.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub similarity: Option<f32>,
  /// Query tokens found in the record's names or benefits.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub matched_tokens: Vec<String>,
}
