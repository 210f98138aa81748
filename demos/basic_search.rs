//! Basic search example over a handful of hand-built records.

use herbario::prelude::*;
use tracing_subscriber::EnvFilter;

/// Create sample plants for examples.
fn sample_plants() -> Vec<Record> {
  vec![
    Record::new(1, "Manzanilla", "Matricaria chamomilla")
      .with_description("Planta medicinal utilizada por sus propiedades calmantes y anti-inflamatorias.")
      .with_category("Digestiva")
      .with_benefits(["Digestión", "Relajación", "Anti-inflamatorio", "Calmante"])
      .with_rating(4.5)
      .with_popularity(95)
      .with_region("Europa, América del Norte"),
    Record::new(2, "Sábila", "Aloe vera")
      .with_description("Planta suculenta conocida por sus propiedades curativas para la piel.")
      .with_category("Dermatológica")
      .with_benefits(["Cicatrizante", "Hidratante", "Quemaduras"])
      .with_rating(4.8)
      .with_popularity(88)
      .with_region("África del Norte"),
    Record::new(3, "Jengibre", "Zingiber officinale")
      .with_description("Rizoma con potentes propiedades anti-inflamatorias y digestivas.")
      .with_category("Digestiva")
      .with_benefits(["Digestivo", "Náuseas", "Circulación"])
      .with_rating(4.7)
      .with_popularity(92)
      .with_region("Asia tropical"),
  ]
}

fn print_results(results: &[ScoredRecord]) {
  for (i, result) in results.iter().enumerate() {
    println!(
      "{}. {} ({}) - score: {:.1} [{}]",
      i + 1,
      result.record.common_name,
      result.record.scientific_name,
      result.score,
      result.match_type.label()
    );
  }
  println!();
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  println!("=== Herbario Basic Search Example ===\n");

  let mut engine = SearchEngine::builder().records(sample_plants()).build();

  for query in ["manzanilla", "digesti", "manzanila", "sabila"] {
    println!("Query: \"{}\"", query);
    print_results(&engine.search(query, &Filters::default()));
  }

  println!("Query: \"digesti\" with category=Digestiva, minRating=4.6");
  let filters = Filters::new().category("Digestiva").min_rating(4.6);
  print_results(&engine.search("digesti", &filters));

  println!("Suggestions for \"an\": {:?}", engine.suggest("an"));
  println!("Suggestions for \"m\": {:?}", engine.suggest("m"));
}
