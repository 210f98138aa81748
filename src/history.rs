//! Recent search history.
//!
//! The history is a plain value: callers persist it by serializing it to JSON
//! and restore it with [`SearchHistory::from_json`].

use crate::config::SearchConfig;
use crate::searchers::tokenizer::text_len;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One remembered query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
  /// The query as typed, trimmed.
  pub query: String,
  /// When the query was last run.
  pub timestamp: DateTime<Utc>,
  /// How many times the query has been run.
  pub count: u32,
}

/// Most-recent-first list of distinct queries, bounded in size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistory {
  entries: Vec<HistoryEntry>,
  #[serde(default = "default_capacity")]
  capacity: usize,
  #[serde(default = "default_recent")]
  recent: usize,
  #[serde(default = "default_min_query_len")]
  min_query_len: usize,
}

fn default_capacity() -> usize {
  SearchConfig::default().history_size
}

fn default_recent() -> usize {
  SearchConfig::default().recent_searches
}

fn default_min_query_len() -> usize {
  SearchConfig::default().min_query_len
}

impl Default for SearchHistory {
  fn default() -> Self {
    Self::from_config(&SearchConfig::default())
  }
}

impl SearchHistory {
  /// Empty history sized by `history_size` and `recent_searches`.
  pub fn from_config(config: &SearchConfig) -> Self {
    Self {
      entries: Vec::new(),
      capacity: config.history_size,
      recent: config.recent_searches,
      min_query_len: config.min_query_len,
    }
  }

  /// Restore a history serialized with [`to_json`](Self::to_json).
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    let mut history: SearchHistory = serde_json::from_str(json)?;
    history.entries.truncate(history.capacity);
    Ok(history)
  }

  /// Serialize for persistence by the caller.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  /// Remember `query` at the current time.
  pub fn record(&mut self, query: &str) {
    self.record_at(query, Utc::now());
  }

  /// Remember `query` as run at `timestamp`.
  ///
  /// Queries shorter than the minimum length are ignored. A query already in
  /// the history moves to the front and its count is incremented.
  pub fn record_at(&mut self, query: &str, timestamp: DateTime<Utc>) {
    let query = query.trim();
    if text_len(query) < self.min_query_len {
      return;
    }

    let position = self.entries.iter().position(|entry| entry.query == query);
    let previous = position.map(|pos| self.entries.remove(pos));

    self.entries.insert(
      0,
      HistoryEntry {
        query: query.to_string(),
        timestamp,
        count: previous.map_or(1, |entry| entry.count.saturating_add(1)),
      },
    );
    self.entries.truncate(self.capacity);
  }

  /// All entries, most recent first.
  pub fn entries(&self) -> &[HistoryEntry] {
    &self.entries
  }

  /// The most recent entries.
  pub fn recent(&self) -> &[HistoryEntry] {
    &self.entries[..self.entries.len().min(self.recent)]
  }

  /// Forget every entry.
  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
  }

  #[test]
  fn most_recent_first_without_duplicates() {
    let mut history = SearchHistory::default();
    history.record_at("manzanilla", at(0));
    history.record_at("jengibre", at(1));
    history.record_at(" manzanilla ", at(2));

    let queries: Vec<_> = history.entries().iter().map(|e| e.query.as_str()).collect();
    assert_eq!(queries, vec!["manzanilla", "jengibre"]);
    assert_eq!(history.entries()[0].count, 2);
    assert_eq!(history.entries()[0].timestamp, at(2));
  }

  #[test]
  fn short_queries_are_ignored() {
    let mut history = SearchHistory::default();
    history.record_at("m", at(0));
    history.record_at("   ", at(0));
    assert!(history.is_empty());
  }

  #[test]
  fn bounded_by_capacity() {
    let mut history = SearchHistory::default();
    for i in 0..15 {
      history.record_at(&format!("consulta {i}"), at(i));
    }
    assert_eq!(history.len(), 10);
    assert_eq!(history.entries()[0].query, "consulta 14");
    assert_eq!(history.recent().len(), 5);
    assert_eq!(history.recent()[4].query, "consulta 10");
  }

  #[test]
  fn survives_json_round_trip() {
    let mut history = SearchHistory::default();
    history.record_at("lavanda", at(0));
    let restored = SearchHistory::from_json(&history.to_json().unwrap()).unwrap();
    assert_eq!(restored, history);
  }

  #[test]
  fn restores_entries_without_settings() {
    let json = r#"{"entries": [{"query": "romero", "timestamp": "2024-01-01T00:00:00Z", "count": 3}]}"#;
    let history = SearchHistory::from_json(json).unwrap();
    assert_eq!(history.recent()[0].count, 3);
  }
}
