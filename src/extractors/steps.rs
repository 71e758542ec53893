use crate::extractors::keywords::KeywordTables;
use crate::extractors::section::{
    capture_until, collapse_whitespace, dedup_in_order, starts_with_any, within_step,
};
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

// Maximums count characters, minimums count bytes.
const MAX_NUMBERED_STEP_LEN: usize = 300;
const MAX_STEP_LEN: usize = 400;
const MIN_STEP_LEN: usize = 5;
const MIN_LINE_LEN: usize = 10;
const MAX_STEPS: usize = 20;

/// Opening marker of a method section and the markers that end it.
struct MethodPattern {
    opener: Regex,
    terminators: &'static [&'static str],
}

const NOTES_END: &[&str] = &["📝"];
const SECTION_END: &[&str] = &["【", "📝"];

static METHOD_PATTERNS: LazyLock<Vec<MethodPattern>> = LazyLock::new(|| {
    [
        (r"🥣\s*做法[：:]\s*", NOTES_END),
        (r"【做法】", SECTION_END),
        (r"做法[：:]\s*", SECTION_END),
        (r"步骤[：:]\s*", SECTION_END),
    ]
    .into_iter()
    .map(|(opener, terminators)| MethodPattern {
        opener: Regex::new(opener).expect("Invalid method section regex"),
        terminators,
    })
    .collect()
});

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+)[.、]\s*(.*)$").expect("Invalid step regex"));

static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-•]\s*(.*)$").expect("Invalid bullet regex"));

static NUMERAL_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9一二三四五六七八九十][.、]").expect("Invalid numeral regex")
});

static NUMBER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid number regex"));

/// Extract ordered cooking steps.
///
/// Numbered steps are emitted in ascending marker order regardless of where
/// they appear. Without numbering, lines are grouped heuristically.
pub fn extract_steps(text: &str, keywords: &KeywordTables) -> Vec<String> {
    let (section, marked) = match method_section(text) {
        Some(section) => (section, true),
        None => (text, false),
    };

    let mut steps = numbered_steps(section);
    debug!(
        "Found {} numbered steps (method section marked: {})",
        steps.len(),
        marked
    );

    if steps.is_empty() {
        steps = grouped_lines(section, keywords, !marked);
        debug!("Grouped {} steps from unnumbered lines", steps.len());
    }

    dedup_in_order(steps)
        .into_iter()
        .filter(|step| within_step(step, MIN_STEP_LEN, MAX_STEP_LEN))
        .take(MAX_STEPS)
        .collect()
}

/// Body of the first method section found, if any is non-empty.
pub fn method_section(text: &str) -> Option<&str> {
    METHOD_PATTERNS.iter().find_map(|pattern| {
        let opener = pattern.opener.find(text)?;
        let body = capture_until(&text[opener.end()..], pattern.terminators);
        (!body.is_empty()).then_some(body)
    })
}

/// Steps introduced by `N.` / `N、` markers.
///
/// Plain continuation lines wrap into the current step; bullet lines are
/// folded in as `；`-separated sub-items.
fn numbered_steps(section: &str) -> Vec<String> {
    let mut by_number: BTreeMap<u64, String> = BTreeMap::new();
    let mut current: Option<(Option<u64>, String)> = None;

    for line in section.lines() {
        if let Some(caps) = NUMBERED_LINE.captures(line) {
            if let Some((number, body)) = current.take() {
                keep_step(&mut by_number, number, &body);
            }
            current = Some((caps[1].parse().ok(), caps[2].to_string()));
            continue;
        }

        let Some((_, body)) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = BULLET_LINE.captures(line) {
            let item = caps[1].trim();
            if !item.is_empty() {
                if !body.trim().is_empty() {
                    body.push('；');
                }
                body.push_str(item);
            }
        } else if !line.trim().is_empty() {
            body.push(' ');
            body.push_str(line.trim());
        }
    }

    if let Some((number, body)) = current.take() {
        keep_step(&mut by_number, number, &body);
    }

    by_number.into_values().collect()
}

fn keep_step(by_number: &mut BTreeMap<u64, String>, number: Option<u64>, body: &str) {
    let Some(number) = number else {
        return;
    };
    let step = collapse_whitespace(body);
    if within_step(&step, MIN_STEP_LEN, MAX_NUMBERED_STEP_LEN) {
        by_number.insert(number, step);
    }
}

/// Group unnumbered lines into steps. A line opening with a numeral marker
/// or a step-start verb begins a new step; other lines continue the current
/// one. With `require_cue`, lines before the first cue are discarded.
fn grouped_lines(section: &str, keywords: &KeywordTables, require_cue: bool) -> Vec<String> {
    let lines = section.lines().map(str::trim).filter(|line| {
        line.len() >= MIN_LINE_LEN
            && line.chars().count() <= MAX_NUMBERED_STEP_LEN
            && !NUMBER_ONLY.is_match(line)
            && !starts_with_any(line, &keywords.ingredient_prefixes)
    });

    let mut steps = Vec::new();
    let mut current: Option<String> = None;

    for line in lines {
        if NUMERAL_START.is_match(line) || starts_with_any(line, &keywords.step_starters) {
            if let Some(step) = current.take() {
                steps.push(step);
            }
            current = Some(line.to_string());
        } else if let Some(step) = current.as_mut() {
            step.push(' ');
            step.push_str(line);
        } else if !require_cue {
            current = Some(line.to_string());
        }
    }

    if let Some(step) = current {
        steps.push(step);
    }

    steps.into_iter().map(|s| s.trim().to_string()).collect()
}
