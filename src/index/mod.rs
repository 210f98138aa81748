//! Inverted indexes over the record store.

pub mod inverted;

pub use inverted::{IndexKind, KeywordIndex, SearchIndex};
