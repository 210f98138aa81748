use herbario::prelude::*;
use proptest::prelude::*;

const NAMES: &[&str] = &[
  "Manzanilla", "Menta", "Melisa", "Malva", "Marrubio", "Mejorana", "Milenrama",
  "Manzano", "Mostaza", "Muña", "Moringa", "Matico",
];
const CATEGORIES: &[&str] = &["Digestiva", "Nerviosa", "Respiratoria", "Aromática"];
const BENEFITS: &[&str] = &["Digestión", "Calmante", "Tos", "Insomnio", "Mareos"];

fn record_strategy() -> impl Strategy<Value = (usize, usize, Vec<usize>, f32, u32)> {
  (
    0..NAMES.len(),
    0..CATEGORIES.len(),
    prop::collection::vec(0..BENEFITS.len(), 0..3),
    0.0f32..=5.0,
    0u32..500,
  )
}

fn build_records(specs: &[(usize, usize, Vec<usize>, f32, u32)]) -> Vec<Record> {
  specs
    .iter()
    .enumerate()
    .map(|(i, (name, category, benefits, rating, popularity))| {
      Record::new(i as u64, NAMES[*name], format!("Planta {i}"))
        .with_category(CATEGORIES[*category])
        .with_benefits(benefits.iter().map(|b| BENEFITS[*b]))
        .with_rating(*rating)
        .with_popularity(*popularity)
    })
    .collect()
}

proptest! {
  #[test]
  fn results_are_sorted_and_capped(
    specs in prop::collection::vec(record_strategy(), 0..60),
    query in prop::sample::select(vec!["ma", "menta", "digest", "calm", "planta", "mareos tos", "nerviosa"]),
    cap in 1usize..25,
  ) {
    let mut engine = SearchEngine::builder()
      .records(build_records(&specs))
      .config(SearchConfig::default().max_results(cap))
      .build();

    let results = engine.search(query, &Filters::default());
    prop_assert!(results.len() <= cap);
    for pair in results.windows(2) {
      prop_assert!(pair[0].score >= pair[1].score);
    }

    let mut ids: Vec<_> = results.iter().map(|r| r.record.id).collect();
    ids.sort_unstable();
    ids.dedup();
    prop_assert_eq!(ids.len(), results.len());
  }

  #[test]
  fn category_and_rating_filters_hold_for_every_result(
    specs in prop::collection::vec(record_strategy(), 0..60),
    category in 0..CATEGORIES.len(),
    min_rating in 0.0f32..=5.0,
  ) {
    let mut engine = SearchEngine::builder().records(build_records(&specs)).build();
    let filters = Filters::new()
      .category(CATEGORIES[category].to_uppercase())
      .min_rating(min_rating);

    for result in engine.search("planta", &filters) {
      prop_assert_eq!(&result.record.category, CATEGORIES[category]);
      prop_assert!(result.record.rating >= min_rating);
    }
  }

  #[test]
  fn suggestions_are_capped_and_unique(
    specs in prop::collection::vec(record_strategy(), 0..60),
    query in "[a-z]{0,4}",
  ) {
    let engine = SearchEngine::builder().records(build_records(&specs)).build();
    let suggestions = engine.suggest(&query);
    if query.len() >= 2 {
      prop_assert!(suggestions.len() <= 8);
      let mut unique = suggestions.clone();
      unique.sort();
      unique.dedup();
      prop_assert_eq!(unique.len(), suggestions.len());
    } else {
      prop_assert_eq!(suggestions, engine.config().popular_searches.clone());
    }
  }

  #[test]
  fn exact_name_query_ranks_an_exact_match_first(
    specs in prop::collection::vec(record_strategy(), 1..40),
    pick in any::<prop::sample::Index>(),
  ) {
    let records = build_records(&specs);
    let name = records[pick.index(records.len())].common_name.to_lowercase();
    let mut engine = SearchEngine::builder()
      .records(records)
      .config(SearchConfig::default().max_results(100))
      .build();

    let results = engine.search(&name, &Filters::default());
    prop_assert_eq!(results[0].match_type, MatchType::Exact);
  }
}
