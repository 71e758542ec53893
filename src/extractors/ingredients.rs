use crate::extractors::keywords::KeywordTables;
use crate::extractors::section::{
    capture_until, contains_any, dedup_in_order, method_start, within,
};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

const MAX_INGREDIENT_LEN: usize = 50;
const MAX_INGREDIENTS: usize = 30;

/// Parenthetical notes such as `（我用的芥菜酸菜，用东北的大白菜酸菜也行）`.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（[^）]*）|\([^)]*\)").expect("Invalid parenthetical regex"));

/// Extract ingredient names from the labelled sections that precede the
/// method section.
pub fn extract_ingredients(text: &str, keywords: &KeywordTables) -> Vec<String> {
    let search_space = match method_start(text, &keywords.method_cues) {
        Some(index) => &text[..index],
        None => text,
    };

    let mut items = Vec::new();
    for section in labelled_sections(search_space, &keywords.ingredient_labels) {
        items.extend(itemize(section, keywords));
    }
    debug!("Collected {} raw ingredient candidates", items.len());

    let cleaned = items
        .into_iter()
        .map(|item| strip_lead_in(&item, &keywords.lead_ins))
        .filter(|item| within(item, 0, MAX_INGREDIENT_LEN));

    dedup_in_order(cleaned)
        .into_iter()
        .take(MAX_INGREDIENTS)
        .collect()
}

/// Section bodies for every `【label】` marker, then every `label：` marker,
/// in label order. Each body runs up to the next section marker.
fn labelled_sections<'a>(text: &'a str, labels: &[String]) -> Vec<&'a str> {
    let labels: Vec<&str> = labels
        .iter()
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .collect();

    let mut terminators = vec!["【".to_string()];
    for label in &labels {
        terminators.push(format!("{}：", label));
        terminators.push(format!("{}:", label));
    }

    let mut sections = Vec::new();

    for label in &labels {
        let marker = format!("【{}】", label);
        for (start, _) in text.match_indices(marker.as_str()) {
            let rest = &text[start + marker.len()..];
            sections.push(capture_until(rest, &terminators));
        }
    }

    for label in &labels {
        for (start, _) in text.match_indices(label) {
            let after = &text[start + label.len()..];
            let Some(colon) = after.chars().next().filter(|c| *c == '：' || *c == ':') else {
                continue;
            };
            let rest = after[colon.len_utf8()..].trim_start();
            sections.push(capture_until(rest, &terminators));
        }
    }

    sections
}

fn itemize<'k>(section: &str, keywords: &'k KeywordTables) -> impl Iterator<Item = String> + 'k {
    let without_notes = PARENTHETICAL.replace_all(section, "").into_owned();

    without_notes
        .split(|c: char| matches!(c, '，' | ',' | '、' | '\n'))
        .map(|item| {
            item.trim()
                .trim_start_matches(|c: char| matches!(c, '-' | '•' | '·' | '：' | ':'))
                .trim()
                .to_string()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .filter(move |item| {
            within(item, 0, MAX_INGREDIENT_LEN) && !contains_any(item, &keywords.action_verbs)
        })
}

/// Remove one descriptive lead-in (the longest that matches) from the front.
fn strip_lead_in(item: &str, lead_ins: &[String]) -> String {
    let longest = lead_ins
        .iter()
        .filter(|l| !l.is_empty() && item.starts_with(l.as_str()))
        .map(String::len)
        .max()
        .unwrap_or(0);

    item[longest..].trim().to_string()
}
