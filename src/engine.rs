//! The search engine that coordinates the retrieval strategies.

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::filter::{apply_filters, sort_results, Filters};
use crate::index::SearchIndex;
use crate::scorer::RelevanceScorer;
use crate::searcher::Searcher;
use crate::searchers::tokenizer::{normalize, query_tokens, text_len};
use crate::searchers::{ExactSearch, FuzzySearch, TokenSearch};
use crate::store::RecordStore;
use crate::suggest::SuggestionGenerator;
use crate::types::{Candidate, Record, ScoredRecord, StrategyKind};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The catalog search engine.
///
/// `SearchEngine` owns the record snapshot, its inverted index and the
/// registered [`Searcher`] strategies. The index is built lazily on the first
/// search and then reused; replacing the records drops it so that the next
/// search rebuilds it.
///
/// Create a `SearchEngine` using the [`SearchEngineBuilder`].
///
/// # Examples
///
/// ```rust
/// use herbario::prelude::*;
///
/// let mut engine = SearchEngine::builder()
///     .records(vec![
///         Record::new(1, "Manzanilla", "Matricaria chamomilla")
///             .with_category("Digestiva")
///             .with_benefits(["Digestión", "Relajación"]),
///         Record::new(2, "Jengibre", "Zingiber officinale")
///             .with_category("Digestiva")
///             .with_benefits(["Digestivo", "Náuseas"]),
///     ])
///     .build();
///
/// let results = engine.search("manzanilla", &Filters::default());
/// assert_eq!(results[0].record.common_name, "Manzanilla");
/// ```
pub struct SearchEngine {
  config: SearchConfig,
  store: RecordStore,
  index: SearchIndex,
  searchers: Vec<Box<dyn Searcher>>,
  scorer: RelevanceScorer,
  suggestions: SuggestionGenerator,
}

impl SearchEngine {
  /// Creates a new `SearchEngineBuilder` to construct an engine.
  pub fn builder() -> SearchEngineBuilder {
    SearchEngineBuilder::new()
  }

  /// Searches the catalog and returns ranked results.
  ///
  /// ## Search Lifecycle
  ///
  /// 1.  **Normalization**: the query is trimmed, decomposed, stripped of
  ///     accents and lowercased. Queries shorter than `min_query_len` return
  ///     an empty list.
  /// 2.  **Index**: the inverted index is built if this is the first search
  ///     since the records were loaded.
  /// 3.  **Retrieval**: every registered strategy runs on the query and
  ///     produces tagged candidates. If the `parallel` feature is enabled the
  ///     strategies run concurrently; the candidate order is unchanged.
  /// 4.  **Scoring**: candidates are collapsed to one per record (the best
  ///     scoring one) and ranked by composite relevance.
  /// 5.  **Filtering**: category, minimum rating and region filters drop
  ///     non-matching records.
  /// 6.  **Ordering**: results are reordered if `filters.sort` asks for it.
  /// 7.  **Truncation**: at most `max_results` results are returned.
  pub fn search(&mut self, query: &str, filters: &Filters) -> Vec<ScoredRecord> {
    let normalized = normalize(query);
    if text_len(&normalized) < self.config.min_query_len {
      tracing::trace!(query, "query below minimum length");
      return Vec::new();
    }

    self.prepare();

    let tokens = query_tokens(&normalized);
    let context = SearchContext::new(&self.store, &self.index, &normalized, &tokens, &self.config);
    let candidates = self.collect_candidates(&context);

    let scored = self.scorer.score(&self.store, &candidates, &tokens);
    let mut results = apply_filters(scored, filters);
    sort_results(&mut results, filters.sort);
    results.truncate(self.config.max_results);

    tracing::debug!(
      query = %normalized,
      candidates = candidates.len(),
      results = results.len(),
      "search completed"
    );
    results
  }

  /// Autocomplete suggestions for `query`.
  pub fn suggest(&self, query: &str) -> Vec<String> {
    self.suggestions.suggest(&self.store, query)
  }

  /// Builds the inverted index if it is not built yet.
  pub fn prepare(&mut self) {
    self.index.build(&self.store);
  }

  /// Swaps the record snapshot. The index is rebuilt on the next search.
  pub fn replace_records(&mut self, records: Vec<Record>) {
    self.replace_store(RecordStore::new(records));
  }

  /// Swaps the record store. The index is rebuilt on the next search.
  pub fn replace_store(&mut self, store: RecordStore) {
    warn_unknown_categories(&store, &self.config);
    tracing::info!(previous = self.store.len(), records = store.len(), "record store replaced");
    self.store = store;
    self.index.clear();
  }

  /// The records being searched.
  pub fn store(&self) -> &RecordStore {
    &self.store
  }

  /// The keyword index. Empty until the first search or [`prepare`](Self::prepare).
  pub fn index(&self) -> &SearchIndex {
    &self.index
  }

  /// Active configuration.
  pub fn config(&self) -> &SearchConfig {
    &self.config
  }

  /// Kinds of the registered strategies, in execution order.
  pub fn strategies(&self) -> Vec<StrategyKind> {
    self.searchers.iter().map(|s| s.kind()).collect()
  }

  fn collect_candidates(&self, context: &SearchContext) -> Vec<Candidate> {
    #[cfg(feature = "parallel")]
    let per_searcher: Vec<Vec<Candidate>> = self
      .searchers
      .par_iter()
      .map(|searcher| searcher.search(context))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let per_searcher: Vec<Vec<Candidate>> = self
      .searchers
      .iter()
      .map(|searcher| searcher.search(context))
      .collect();

    per_searcher.into_iter().flatten().collect()
  }
}

/// A builder for creating `SearchEngine` instances.
///
/// When no strategy is registered with [`with`](Self::with), the engine uses
/// exact, token and fuzzy search, in that order.
///
/// # Examples
///
/// ```
/// use herbario::prelude::*;
/// use herbario::searchers::{ExactSearch, FuzzySearch};
///
/// let config = SearchConfig::default().max_results(5).fuzzy_threshold(0.8);
///
/// let engine = SearchEngine::builder()
///     .config(config)
///     .with(Box::new(ExactSearch::new()))
///     .with(Box::new(FuzzySearch::new()))
///     .build();
///
/// assert_eq!(engine.strategies(), vec![StrategyKind::Exact, StrategyKind::Fuzzy]);
/// ```
#[derive(Default)]
pub struct SearchEngineBuilder {
  config: Option<SearchConfig>,
  store: Option<RecordStore>,
  searchers: Vec<Box<dyn Searcher>>,
}

impl SearchEngineBuilder {
  /// Creates a new, empty `SearchEngineBuilder`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the configuration. Defaults to [`SearchConfig::default`].
  pub fn config(mut self, config: SearchConfig) -> Self {
    self.config = Some(config);
    self
  }

  /// Sets the records to search.
  pub fn records(mut self, records: Vec<Record>) -> Self {
    self.store = Some(RecordStore::new(records));
    self
  }

  /// Sets an already built record store.
  pub fn store(mut self, store: RecordStore) -> Self {
    self.store = Some(store);
    self
  }

  /// Adds a retrieval strategy. Strategies run in the order they are added.
  pub fn with(mut self, searcher: Box<dyn Searcher>) -> Self {
    self.searchers.push(searcher);
    self
  }

  /// Builds the `SearchEngine` with the configured components.
  pub fn build(self) -> SearchEngine {
    let config = self.config.unwrap_or_default();
    let store = self.store.unwrap_or_default();
    warn_unknown_categories(&store, &config);

    let searchers = if self.searchers.is_empty() {
      default_searchers()
    } else {
      self.searchers
    };

    SearchEngine {
      index: SearchIndex::new(config.min_description_word_len),
      scorer: RelevanceScorer::new(config.weights.clone()),
      suggestions: SuggestionGenerator::from_config(&config),
      searchers,
      store,
      config,
    }
  }
}

fn default_searchers() -> Vec<Box<dyn Searcher>> {
  vec![
    Box::new(ExactSearch::new()),
    Box::new(TokenSearch::new()),
    Box::new(FuzzySearch::new()),
  ]
}

fn warn_unknown_categories(store: &RecordStore, config: &SearchConfig) {
  if config.categories.is_empty() {
    return;
  }
  let known: Vec<String> = config.categories.iter().map(|c| normalize(c)).collect();
  for record in store.iter() {
    let category = normalize(&record.category);
    if !category.is_empty() && !known.contains(&category) {
      tracing::warn!(id = record.id, category = %record.category, "record has unknown category");
    }
  }
}
