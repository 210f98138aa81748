//! Loads a catalog API payload, runs a few searches and keeps a history.

use herbario::prelude::*;
use tracing_subscriber::EnvFilter;

const PAYLOAD: &str = include_str!("../data/plantas.json");

fn main() -> Result<(), HerbarioError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = SearchConfig::from_json_str(r#"{"max_results": 5, "fuzzy_threshold": 0.7}"#)?;
  let store = RecordStore::from_json(PAYLOAD)?;
  println!("Loaded {} plants\n", store.len());

  let mut history = SearchHistory::from_config(&config);
  let mut engine = SearchEngine::builder().config(config).store(store).build();

  let searches = [
    ("insomnio", Filters::default()),
    ("anti-inflamatorio", Filters::new().region("norte")),
    ("planta", Filters::new().sort(SortOrder::Popularity)),
    ("equinacea", Filters::default()),
  ];

  for (query, filters) in searches {
    history.record(query);
    let results = engine.search(query, &filters);
    println!("Query: \"{}\" -> {} results", query, results.len());
    for result in &results {
      println!(
        "  {} - {:.1} ({})",
        result.record.common_name,
        result.score,
        result.match_type.label()
      );
    }
  }

  println!("\nRecent searches:");
  for entry in history.recent() {
    println!("  {} (x{})", entry.query, entry.count);
  }

  Ok(())
}
