//! Configuration for the search engine.
//!
//! Every field carries a serde default, so a partial JSON document (or an
//! empty object) yields a working configuration.

use crate::error::ConfigError;
use crate::scorer::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for retrieval, ranking, suggestions and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
  /// Queries shorter than this (in characters, after trimming) return no
  /// results and fall back to popular suggestions.
  #[serde(default = "default_min_query_len")]
  pub min_query_len: usize,
  /// Maximum number of ranked results returned by a search.
  #[serde(default = "default_max_results")]
  pub max_results: usize,
  /// Maximum number of autocomplete suggestions.
  #[serde(default = "default_max_suggestions")]
  pub max_suggestions: usize,
  /// Minimum Jaro similarity for a fuzzy match, between 0.0 and 1.0.
  #[serde(default = "default_fuzzy_threshold")]
  pub fuzzy_threshold: f64,
  /// Description words must be strictly longer than this to be indexed.
  #[serde(default = "default_min_description_word_len")]
  pub min_description_word_len: usize,
  /// Number of entries kept by [`SearchHistory`](crate::history::SearchHistory).
  #[serde(default = "default_history_size")]
  pub history_size: usize,
  /// Number of entries returned by `SearchHistory::recent`.
  #[serde(default = "default_recent_searches")]
  pub recent_searches: usize,
  /// Suggestions offered when the query is too short.
  #[serde(default = "default_popular_searches")]
  pub popular_searches: Vec<String>,
  /// Known category vocabulary. Records outside it are still indexed but
  /// logged at ingestion.
  #[serde(default = "default_categories")]
  pub categories: Vec<String>,
  /// Relevance weights.
  #[serde(default)]
  pub weights: ScoringWeights,
}

fn default_min_query_len() -> usize {
  2
}

fn default_max_results() -> usize {
  20
}

fn default_max_suggestions() -> usize {
  8
}

fn default_fuzzy_threshold() -> f64 {
  0.6
}

fn default_min_description_word_len() -> usize {
  3
}

fn default_history_size() -> usize {
  10
}

fn default_recent_searches() -> usize {
  5
}

fn default_popular_searches() -> Vec<String> {
  [
    "manzanilla",
    "dolor de cabeza",
    "digestión",
    "insomnio",
    "anti-inflamatorio",
    "sábila",
    "jengibre",
    "lavanda",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

fn default_categories() -> Vec<String> {
  [
    "Digestiva",
    "Dermatológica",
    "Inmunológica",
    "Aromática",
    "Cardiovascular",
    "Respiratoria",
    "Nerviosa",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      min_query_len: default_min_query_len(),
      max_results: default_max_results(),
      max_suggestions: default_max_suggestions(),
      fuzzy_threshold: default_fuzzy_threshold(),
      min_description_word_len: default_min_description_word_len(),
      history_size: default_history_size(),
      recent_searches: default_recent_searches(),
      popular_searches: default_popular_searches(),
      categories: default_categories(),
      weights: ScoringWeights::default(),
    }
  }
}

impl SearchConfig {
  /// Parses and validates a configuration from a JSON string.
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    let config: SearchConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates a JSON configuration file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let config = Self::from_json_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded search config");
    Ok(config)
  }

  /// Checks that every field is within its accepted range.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
      return Err(ConfigError::Invalid {
        field: "fuzzy_threshold",
        reason: format!("{} is outside 0.0..=1.0", self.fuzzy_threshold),
      });
    }
    if self.max_results == 0 {
      return Err(ConfigError::Invalid {
        field: "max_results",
        reason: "must be greater than zero".to_string(),
      });
    }
    if self.max_suggestions == 0 {
      return Err(ConfigError::Invalid {
        field: "max_suggestions",
        reason: "must be greater than zero".to_string(),
      });
    }
    if self.recent_searches > self.history_size {
      return Err(ConfigError::Invalid {
        field: "recent_searches",
        reason: format!("cannot exceed history_size ({})", self.history_size),
      });
    }
    Ok(())
  }

  /// Sets the minimum query length.
  pub fn min_query_len(mut self, len: usize) -> Self {
    self.min_query_len = len;
    self
  }

  /// Sets the result cap.
  pub fn max_results(mut self, max: usize) -> Self {
    self.max_results = max;
    self
  }

  /// Sets the suggestion cap.
  pub fn max_suggestions(mut self, max: usize) -> Self {
    self.max_suggestions = max;
    self
  }

  /// Sets the fuzzy similarity threshold.
  pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
    self.fuzzy_threshold = threshold;
    self
  }

  /// Replaces the popular searches list.
  pub fn popular_searches<I, S>(mut self, searches: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.popular_searches = searches.into_iter().map(Into::into).collect();
    self
  }

  /// Replaces the scoring weights.
  pub fn weights(mut self, weights: ScoringWeights) -> Self {
    self.weights = weights;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn empty_object_yields_defaults() {
    let config = SearchConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SearchConfig::default());
    assert_eq!(config.max_results, 20);
    assert_eq!(config.max_suggestions, 8);
    assert_eq!(config.popular_searches.len(), 8);
  }

  #[test]
  fn partial_config_keeps_other_defaults() {
    let config =
      SearchConfig::from_json_str(r#"{"fuzzy_threshold": 0.75, "weights": {"exact_bonus": 80}}"#)
        .unwrap();
    assert_eq!(config.fuzzy_threshold, 0.75);
    assert_eq!(config.weights.exact_bonus, 80.0);
    assert_eq!(config.weights.name_bonus, 30.0);
    assert_eq!(config.min_query_len, 2);
  }

  #[test]
  fn rejects_out_of_range_threshold() {
    let err = SearchConfig::from_json_str(r#"{"fuzzy_threshold": 1.5}"#).unwrap_err();
    assert!(matches!(
      err,
      ConfigError::Invalid {
        field: "fuzzy_threshold",
        ..
      }
    ));
  }

  #[test]
  fn rejects_zero_caps() {
    assert!(SearchConfig::default().max_results(0).validate().is_err());
    assert!(SearchConfig::default().max_suggestions(0).validate().is_err());
  }

  #[test]
  fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"max_results": 5}}"#).unwrap();
    let config = SearchConfig::from_path(file.path()).unwrap();
    assert_eq!(config.max_results, 5);
  }

  #[test]
  fn missing_file_is_io_error() {
    let err = SearchConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
  }
}
