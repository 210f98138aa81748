//! Keyword-to-record inverted indexes.

use crate::searchers::tokenizer::{description_words, normalize};
use crate::store::RecordStore;
use crate::types::RecordId;
use std::collections::{HashMap, HashSet};

/// Selects one of the three indexes held by a [`SearchIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
  /// Common names, scientific names and description words.
  Name,
  /// Benefit and symptom keywords.
  Symptom,
  /// Category labels.
  Category,
}

/// An insertion-ordered keyword map.
///
/// Lookups scan keywords in the order they were first inserted, which keeps
/// the candidate order deterministic for a given store.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
  slots: HashMap<String, usize>,
  entries: Vec<(String, Vec<RecordId>)>,
}

impl KeywordIndex {
  /// Add a record under a keyword. A record appears at most once per keyword.
  pub fn insert(&mut self, keyword: &str, record: RecordId) {
    if keyword.is_empty() {
      return;
    }

    let slot = match self.slots.get(keyword) {
      Some(&slot) => slot,
      None => {
        self.entries.push((keyword.to_string(), Vec::new()));
        self.slots.insert(keyword.to_string(), self.entries.len() - 1);
        self.entries.len() - 1
      }
    };

    let records = &mut self.entries[slot].1;
    if !records.contains(&record) {
      records.push(record);
    }
  }

  /// Records stored under exactly `keyword`.
  pub fn get(&self, keyword: &str) -> Option<&[RecordId]> {
    self
      .slots
      .get(keyword)
      .map(|&slot| self.entries[slot].1.as_slice())
  }

  /// Union of the records of every keyword containing `term`, in first-seen
  /// order.
  pub fn lookup(&self, term: &str) -> Vec<RecordId> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for (keyword, records) in &self.entries {
      if !keyword.contains(term) {
        continue;
      }
      for &record in records {
        if seen.insert(record) {
          results.push(record);
        }
      }
    }

    results
  }

  /// Iterate over keywords in insertion order.
  pub fn keywords(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(keyword, _)| keyword.as_str())
  }

  /// Number of distinct keywords.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns true if no keyword has been inserted.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn clear(&mut self) {
    self.slots.clear();
    self.entries.clear();
  }
}

/// The three inverted indexes used by token search.
///
/// The index is built once, lazily, from a [`RecordStore`] and then treated as
/// read-only. It is not invalidated when the store changes: callers that swap
/// the store must call [`SearchIndex::rebuild`].
#[derive(Debug, Clone)]
pub struct SearchIndex {
  names: KeywordIndex,
  symptoms: KeywordIndex,
  categories: KeywordIndex,
  min_word_len: usize,
  initialized: bool,
}

impl Default for SearchIndex {
  fn default() -> Self {
    Self::new(3)
  }
}

impl SearchIndex {
  /// Create an empty, unbuilt index. Description words must be longer than
  /// `min_word_len` characters to be indexed.
  pub fn new(min_word_len: usize) -> Self {
    Self {
      names: KeywordIndex::default(),
      symptoms: KeywordIndex::default(),
      categories: KeywordIndex::default(),
      min_word_len,
      initialized: false,
    }
  }

  /// Build the indexes from `store`. Does nothing if already built.
  pub fn build(&mut self, store: &RecordStore) {
    if self.initialized {
      tracing::debug!("search index already initialized, skipping build");
      return;
    }

    for record in store.iter() {
      self.names.insert(&normalize(&record.common_name), record.id);
      self.names.insert(&normalize(&record.scientific_name), record.id);

      for benefit in &record.benefits {
        self.symptoms.insert(&normalize(benefit), record.id);
      }

      self.categories.insert(&normalize(&record.category), record.id);

      let description = normalize(&record.description);
      for word in description_words(&description, self.min_word_len) {
        self.names.insert(word, record.id);
      }
    }

    self.initialized = true;
    tracing::debug!(
      records = store.len(),
      names = self.names.len(),
      symptoms = self.symptoms.len(),
      categories = self.categories.len(),
      "search index initialized"
    );
  }

  /// Drop all keywords and build again from `store`.
  pub fn rebuild(&mut self, store: &RecordStore) {
    self.clear();
    self.build(store);
  }

  /// Forget all keywords; the next [`build`](Self::build) starts from scratch.
  pub fn clear(&mut self) {
    self.names.clear();
    self.symptoms.clear();
    self.categories.clear();
    self.initialized = false;
  }

  /// Whether [`build`](Self::build) has run since the last clear.
  pub fn is_initialized(&self) -> bool {
    self.initialized
  }

  /// Access one of the three indexes.
  pub fn keywords(&self, kind: IndexKind) -> &KeywordIndex {
    match kind {
      IndexKind::Name => &self.names,
      IndexKind::Symptom => &self.symptoms,
      IndexKind::Category => &self.categories,
    }
  }

  /// Substring lookup of an already normalized term in one index.
  pub fn lookup(&self, kind: IndexKind, term: &str) -> Vec<RecordId> {
    self.keywords(kind).lookup(term)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Record;

  fn store() -> RecordStore {
    RecordStore::new(vec![
      Record::new(1, "Manzanilla", "Matricaria chamomilla")
        .with_description("Planta con propiedades calmantes y digestivas")
        .with_category("Digestiva")
        .with_benefits(["Digestión", "Relajación"]),
      Record::new(2, "Sábila", "Aloe vera")
        .with_description("Suculenta para la piel")
        .with_category("Dermatológica")
        .with_benefits(["Cicatrizante", "Hidratante"]),
    ])
  }

  #[test]
  fn indexes_names_descriptions_benefits_and_categories() {
    let mut index = SearchIndex::default();
    index.build(&store());

    let names = index.keywords(IndexKind::Name);
    assert_eq!(names.get("manzanilla"), Some(&[1][..]));
    assert_eq!(names.get("aloe vera"), Some(&[2][..]));
    assert_eq!(names.get("sabila"), Some(&[2][..]));
    assert_eq!(names.get("calmantes"), Some(&[1][..]));
    // words of three characters or fewer are not indexed
    assert!(names.get("con").is_none());
    assert!(names.get("para").is_some());

    assert_eq!(index.keywords(IndexKind::Symptom).get("digestion"), Some(&[1][..]));
    assert_eq!(index.keywords(IndexKind::Category).get("dermatologica"), Some(&[2][..]));
  }

  #[test]
  fn record_appears_once_per_keyword() {
    let mut index = SearchIndex::default();
    index.build(&RecordStore::new(vec![
      Record::new(1, "Menta", "Menta").with_description("menta menta"),
    ]));
    assert_eq!(index.keywords(IndexKind::Name).get("menta"), Some(&[1][..]));
  }

  #[test]
  fn build_is_idempotent() {
    let mut index = SearchIndex::default();
    let store = store();
    index.build(&store);
    let before = index.keywords(IndexKind::Name).len();

    index.build(&RecordStore::new(vec![Record::new(9, "Lavanda", "Lavandula")]));
    assert_eq!(index.keywords(IndexKind::Name).len(), before);
    assert!(index.lookup(IndexKind::Name, "lavanda").is_empty());
  }

  #[test]
  fn rebuild_picks_up_new_records() {
    let mut index = SearchIndex::default();
    index.build(&store());
    index.rebuild(&RecordStore::new(vec![Record::new(9, "Lavanda", "Lavandula")]));
    assert_eq!(index.lookup(IndexKind::Name, "lavand"), vec![9]);
    assert!(index.lookup(IndexKind::Name, "manzanilla").is_empty());
  }

  #[test]
  fn lookup_matches_substrings_of_keywords() {
    let mut index = SearchIndex::default();
    index.build(&store());
    assert_eq!(index.lookup(IndexKind::Symptom, "ante"), vec![2]);
    assert_eq!(index.lookup(IndexKind::Category, "digest"), vec![1]);
    assert_eq!(index.lookup(IndexKind::Name, "a"), vec![1, 2]);
  }

  #[test]
  fn empty_fields_are_not_indexed() {
    let mut index = SearchIndex::default();
    index.build(&RecordStore::new(vec![Record::new(1, "Romero", "")]));
    assert_eq!(index.keywords(IndexKind::Name).len(), 1);
    assert!(index.keywords(IndexKind::Category).is_empty());
  }
}
