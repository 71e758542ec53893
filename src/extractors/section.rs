//! Boundary and cleanup helpers shared by the section extractors.
//!
//! Length bounds count characters. The one exception is the lower bound on
//! step length, which counts UTF-8 bytes (see [`within_step`]).

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Byte offset of the earliest method cue in `text`.
pub fn method_start(text: &str, cues: &[String]) -> Option<usize> {
    cues.iter()
        .filter(|cue| !cue.is_empty())
        .filter_map(|cue| text.find(cue.as_str()))
        .min()
}

/// Prefix of `text` up to, but not including, the earliest terminator.
pub fn capture_until<'a, S: AsRef<str>>(text: &'a str, terminators: &[S]) -> &'a str {
    let end = terminators
        .iter()
        .filter_map(|t| {
            let t: &str = t.as_ref();
            if t.is_empty() {
                None
            } else {
                text.find(t)
            }
        })
        .min()
        .unwrap_or(text.len());
    &text[..end]
}

/// True when `min < chars < max`.
pub fn within(s: &str, min: usize, max: usize) -> bool {
    let chars = s.chars().count();
    chars > min && chars < max
}

/// True when `s` is longer than `min_bytes` UTF-8 bytes and shorter than
/// `max_chars` characters, so a three-character CJK step such as "切牛肉"
/// clears the lower bound.
pub fn within_step(s: &str, min_bytes: usize, max_chars: usize) -> bool {
    s.len() > min_bytes && s.chars().count() < max_chars
}

/// Collapse every whitespace run (including newlines) to one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0xFE0F | 0x200D
    )
}

pub fn strip_emoji(s: &str) -> String {
    s.chars().filter(|c| !is_emoji(*c)).collect()
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedup_in_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

pub fn starts_with_any(s: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|p| !p.is_empty() && s.starts_with(p.as_str()))
}

pub fn contains_any(s: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && s.contains(n.as_str()))
}
