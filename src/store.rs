//! In-memory record store.

use crate::error::IngestError;
use crate::ingest;
use crate::types::{Record, RecordId};
use std::collections::HashMap;

/// Read-only snapshot of the catalog.
///
/// Records keep the order they were loaded in; that order is the iteration
/// order of every strategy and therefore the tie-break order of the ranking.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
  records: Vec<Record>,
  positions: HashMap<RecordId, usize>,
}

impl RecordStore {
  /// Create a store from records. A record whose id was already seen is
  /// dropped, keeping the first occurrence.
  pub fn new(records: Vec<Record>) -> Self {
    let mut store = Self {
      records: Vec::with_capacity(records.len()),
      positions: HashMap::with_capacity(records.len()),
    };

    for record in records {
      if store.positions.contains_key(&record.id) {
        tracing::warn!(id = record.id, name = %record.common_name, "duplicate record id, keeping first");
        continue;
      }
      store.positions.insert(record.id, store.records.len());
      store.records.push(record);
    }

    store
  }

  /// Create a store from a catalog API payload.
  /// Parse a catalog payload, see [`ingest::records_from_json`].
  pub fn from_json(json: &str) -> Result<Self, IngestError> {
    Ok(Self::new(ingest::records_from_json(json)?))
  }

  /// Get a record by id.
  pub fn get(&self, id: RecordId) -> Option<&Record> {
    self.positions.get(&id).map(|&pos| &self.records[pos])
  }

  /// All records, in load order.
  pub fn records(&self) -> &[Record] {
    &self.records
  }

  /// Iterate over all records.
  pub fn iter(&self) -> std::slice::Iter<'_, Record> {
    self.records.iter()
  }

  /// Number of records.
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// Returns true if the store holds no records.
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

impl From<Vec<Record>> for RecordStore {
  fn from(records: Vec<Record>) -> Self {
    Self::new(records)
  }
}
