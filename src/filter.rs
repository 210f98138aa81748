//! Post-retrieval filters and result ordering.
//!
//! Filters are independently optional and conjunctive. They only look at the
//! record, so they can run on raw records before scoring or on scored results
//! afterwards with the same outcome.

use crate::searchers::tokenizer::normalize;
use crate::types::{Record, ScoredRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Category values that mean "no category filter".
const ANY_CATEGORY: &[&str] = &["", "todos", "all"];

/// The filter bag accepted by a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filters {
  /// Case- and accent-insensitive category equality.
  pub category: Option<String>,
  /// Inclusive lower bound on the rating.
  pub min_rating: Option<f32>,
  /// Case- and accent-insensitive substring of the region.
  pub region: Option<String>,
  /// Ordering of the final result list.
  pub sort: SortOrder,
}

impl Filters {
  /// Creates an empty filter bag that lets every record through.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the category filter.
  pub fn category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  /// Sets the minimum rating.
  pub fn min_rating(mut self, rating: f32) -> Self {
    self.min_rating = Some(rating);
    self
  }

  /// Sets the region filter.
  pub fn region(mut self, region: impl Into<String>) -> Self {
    self.region = Some(region.into());
    self
  }

  /// Sets the result ordering.
  pub fn sort(mut self, sort: SortOrder) -> Self {
    self.sort = sort;
    self
  }

  /// Whether no filter is active.
  pub fn is_empty(&self) -> bool {
    self.compile().is_empty()
  }

  /// Whether `record` passes every active filter.
  pub fn matches(&self, record: &Record) -> bool {
    self.compile().matches(record)
  }

  /// Normalize the filter values once so a batch does not redo it per record.
  fn compile(&self) -> CompiledFilters {
    let category = self
      .category
      .as_deref()
      .map(normalize)
      .filter(|c| !ANY_CATEGORY.contains(&c.as_str()));
    let region = self.region.as_deref().map(normalize).filter(|r| !r.is_empty());

    CompiledFilters {
      category,
      min_rating: self.min_rating.filter(|r| !r.is_nan()),
      region,
    }
  }
}

struct CompiledFilters {
  category: Option<String>,
  min_rating: Option<f32>,
  region: Option<String>,
}

impl CompiledFilters {
  fn is_empty(&self) -> bool {
    self.category.is_none() && self.min_rating.is_none() && self.region.is_none()
  }

  fn matches(&self, record: &Record) -> bool {
    if let Some(category) = &self.category {
      if normalize(&record.category) != *category {
        return false;
      }
    }
    if let Some(min_rating) = self.min_rating {
      if record.rating < min_rating {
        return false;
      }
    }
    if let Some(region) = &self.region {
      if !normalize(&record.region).contains(region.as_str()) {
        return false;
      }
    }
    true
  }
}

/// Anything that exposes a record can be filtered.
pub trait Filterable {
  fn record(&self) -> &Record;
}

impl Filterable for Record {
  fn record(&self) -> &Record {
    self
  }
}

impl Filterable for &Record {
  fn record(&self) -> &Record {
    self
  }
}

impl Filterable for ScoredRecord {
  fn record(&self) -> &Record {
    &self.record
  }
}

/// Keep the items whose record passes `filters`, preserving order.
pub fn apply_filters<T: Filterable>(items: Vec<T>, filters: &Filters) -> Vec<T> {
  let compiled = filters.compile();
  if compiled.is_empty() {
    return items;
  }
  items
    .into_iter()
    .filter(|item| compiled.matches(item.record()))
    .collect()
}

/// How the final result list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  /// Descending relevance score (the scorer's order).
  #[default]
  #[serde(alias = "relevancia")]
  Relevance,
  /// Common name, A to Z, ignoring case and accents.
  #[serde(alias = "nombre")]
  Name,
  /// Highest rating first.
  Rating,
  /// Most popular first.
  #[serde(alias = "popularidad")]
  Popularity,
}

/// Reorder scored results. All orders are stable, so relevance breaks ties.
pub fn sort_results(results: &mut [ScoredRecord], order: SortOrder) {
  match order {
    SortOrder::Relevance => crate::scorer::sort_by_score(results),
    SortOrder::Name => {
      results.sort_by_cached_key(|r| normalize(&r.record.common_name));
    }
    SortOrder::Rating => results.sort_by(|a, b| {
      b.record
        .rating
        .partial_cmp(&a.record.rating)
        .unwrap_or(Ordering::Equal)
    }),
    SortOrder::Popularity => results.sort_by(|a, b| b.record.popularity.cmp(&a.record.popularity)),
  }
}
