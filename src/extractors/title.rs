use crate::extractors::keywords::KeywordTables;
use crate::extractors::section::{strip_emoji, within};
use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

pub const UNTITLED: &str = "Untitled Recipe";

const SEPARATOR: &str = "——";

/// A title pattern and the part of the post it is matched against.
struct TitlePattern {
    regex: Regex,
    first_line_only: bool,
}

/// Social-post title conventions, tried in order.
///
/// Most posts open with `hook —— dish name 🍽️`; when a pattern captures both
/// sides the dish name (second group) is preferred. Patterns tied to the
/// opening of the post only see its first non-blank line. The "家常版"
/// and trailing-emoji patterns may match on any line.
static TITLE_PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(|| {
    [
        (r"^(.+?)\s*——\s*(.+?)(?:\s*🍽\x{FE0F}?|$)", true),
        (r"^(.+?)\s*30分钟\s*(.+?)(?:\s*🍽\x{FE0F}?|$)", true),
        (r"(?m)家常版(.+?)(?:\s*🍽\x{FE0F}?|\s|$)", false),
        (r"(?m)^(.+?)\s*🍽\x{FE0F}?", false),
        (r"^(.+?)[—\-]", true),
    ]
    .into_iter()
    .map(|(pattern, first_line_only)| TitlePattern {
        regex: Regex::new(pattern).expect("Invalid title regex"),
        first_line_only,
    })
    .collect()
});

static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[.、]").expect("Invalid numbered marker regex"));

/// Pull a dish name out of `text`, falling back to the last path segment of
/// `fallback_url` and finally to [`UNTITLED`].
pub fn extract_title(text: &str, fallback_url: Option<&str>, keywords: &KeywordTables) -> String {
    match_patterns(text)
        .or_else(|| scan_leading_lines(text, &keywords.title_keywords))
        .unwrap_or_else(|| title_from_url(fallback_url))
}

fn pick_candidate<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    let first = caps.get(1).map(|m| m.as_str().trim());
    let second = caps.get(2).map(|m| m.as_str().trim());

    match (first, second) {
        (_, Some(name)) if !name.is_empty() => Some(name),
        (Some(hook), _) => Some(hook),
        (None, other) => other,
    }
}

fn match_patterns(text: &str) -> Option<String> {
    let first_line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    for (index, pattern) in TITLE_PATTERNS.iter().enumerate() {
        let haystack = if pattern.first_line_only { first_line } else { text };
        let Some(caps) = pattern.regex.captures(haystack) else {
            continue;
        };
        if let Some(candidate) = pick_candidate(&caps) {
            if within(candidate, 3, 50) {
                debug!("Title matched pattern #{}: {}", index, candidate);
                return Some(candidate.to_string());
            }
        }
    }
    None
}

fn scan_leading_lines(text: &str, title_keywords: &[String]) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .filter(|line| {
            within(line, 5, 80) && !NUMBERED_MARKER.is_match(line) && !line.starts_with('【')
        })
        .filter(|line| {
            line.contains(SEPARATOR)
                || title_keywords
                    .iter()
                    .any(|k| !k.is_empty() && line.contains(k.as_str()))
        })
        .map(|line| {
            let name = line.rsplit(SEPARATOR).next().unwrap_or(line);
            strip_emoji(name).trim().to_string()
        })
        .find(|name| !name.is_empty())
}

/// Derive a title from the last non-empty path segment of a URL.
pub fn title_from_url(url: Option<&str>) -> String {
    let segment = url
        .and_then(|u| Url::parse(u).ok())
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(String::from)
        });

    segment
        .and_then(|s| urlencoding::decode(&s).ok().map(|d| d.into_owned()))
        .map(|decoded| decoded.replace(|c: char| c == '-' || c == '_', " "))
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}
