use crate::extractors::keywords::{CuisineKeywords, KeywordTables};
use crate::model::Cuisine;
use std::sync::LazyLock;

static DEFAULT_TABLE: LazyLock<Vec<CuisineKeywords>> =
    LazyLock::new(|| KeywordTables::default().cuisines);

/// Classify free text with the built-in cuisine table.
pub fn classify(text: &str) -> Cuisine {
    classify_with(text, &DEFAULT_TABLE)
}

/// Return the label of the first keyword set with a case-insensitive
/// substring hit, or `Western` when nothing matches.
pub fn classify_with(text: &str, table: &[CuisineKeywords]) -> Cuisine {
    let lower = text.to_lowercase();

    table
        .iter()
        .filter(|entry| entry.cuisine != Cuisine::All)
        .find(|entry| {
            entry
                .keywords
                .iter()
                .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
        })
        .map(|entry| entry.cuisine)
        .unwrap_or(Cuisine::Western)
}
