//! Lunch/dinner splitting for a single day row.
//!
//! Lunch and dinner used to be two table columns; after text extraction they
//! are one run of dish names. The boundary is recovered by an ordered chain
//! of rules, each tried only when the one before it gives up:
//!
//! 1. an explicit `Dinner` label,
//! 2. `+`-separated chunks scanned for dinner keywords,
//! 3. the earliest dinner keyword anywhere in the text,
//! 4. the midpoint of the word list.
//!
//! The chain always produces an answer. Neither side is ever an empty
//! string; a side with nothing on it holds [`NOT_AVAILABLE`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use crate::vocab::{self, ANY_DINNER_RE, STRONG_RE, WEAK_RE};

/// Placeholder for a meal with no recoverable content.
pub const NOT_AVAILABLE: &str = "Not available";

static DINNER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdinner\b").expect("dinner marker regex"));

static LEADING_DINNER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^dinner[:\-\s]*").expect("dinner label regex"));

/// Lunch and dinner text recovered from one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSplit {
    pub lunch: String,
    pub dinner: String,
}

impl MealSplit {
    fn new(lunch: impl Into<String>, dinner: impl Into<String>) -> Self {
        let lunch = lunch.into();
        let dinner = dinner.into();
        Self {
            lunch: if lunch.is_empty() { NOT_AVAILABLE.to_string() } else { lunch },
            dinner: if dinner.is_empty() { NOT_AVAILABLE.to_string() } else { dinner },
        }
    }
}

/// Which rule of the chain decided a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    Marker,
    Chunks,
    Keyword,
    Midpoint,
}

/// Splits one day's content into lunch and dinner.
pub fn split_meals(content: &str) -> MealSplit {
    split_with_rule(content).0
}

/// Like [`split_meals`], also reporting the rule that fired.
pub fn split_with_rule(content: &str) -> (MealSplit, SplitRule) {
    let content = content.trim();

    let (split, rule) = match DINNER_MARKER.find(content) {
        // An unusable label skips the keyword rules.
        Some(marker) => match by_marker(content, marker.start()) {
            Some(split) => (split, SplitRule::Marker),
            None => (by_midpoint(content), SplitRule::Midpoint),
        },
        None => {
            if let Some(split) = content.contains('+').then(|| by_chunks(content)).flatten() {
                (split, SplitRule::Chunks)
            } else if let Some(split) = by_keyword(content) {
                (split, SplitRule::Keyword)
            } else {
                (by_midpoint(content), SplitRule::Midpoint)
            }
        }
    };

    debug!(?rule, lunch = %split.lunch, dinner = %split.dinner, "split day");
    (split, rule)
}

fn by_marker(content: &str, at: usize) -> Option<MealSplit> {
    let lunch = trim_separators(&content[..at]);
    let dinner = strip_dinner_label(&content[at..]);
    if lunch.is_empty() || dinner.is_empty() {
        return None;
    }
    Some(MealSplit::new(lunch, dinner))
}

/// Where dinner starts within a `+`-separated chunk list.
#[derive(Debug, PartialEq, Eq)]
struct Boundary {
    chunk: usize,
    /// Byte offset of the dinner keyword when the chunk itself is split.
    inner: Option<usize>,
}

fn by_chunks(content: &str) -> Option<MealSplit> {
    let chunks: Vec<&str> = content
        .split('+')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    let boundary = chunk_boundary(&chunks)?;
    let mut lunch: Vec<&str> = chunks[..boundary.chunk].to_vec();
    let mut dinner: Vec<&str> = Vec::with_capacity(chunks.len() - boundary.chunk);

    let head = chunks[boundary.chunk];
    match boundary.inner {
        Some(at) => {
            let left = head[..at].trim();
            if !left.is_empty() {
                lunch.push(left);
            }
            dinner.push(head[at..].trim());
        }
        None => dinner.push(head),
    }
    dinner.extend_from_slice(&chunks[boundary.chunk + 1..]);

    if lunch.is_empty() {
        return None;
    }
    Some(MealSplit::new(lunch.join(" + "), dinner.join(" + ")))
}

fn chunk_boundary(chunks: &[&str]) -> Option<Boundary> {
    // The first chunk is presumed lunch for strong keywords.
    for (i, chunk) in chunks.iter().enumerate().skip(1) {
        if let Some(at) = vocab::first_match(&STRONG_RE, chunk) {
            return Some(Boundary { chunk: i, inner: inner_split(chunk, at) });
        }
    }

    let weak: Vec<(usize, usize)> = chunks
        .iter()
        .enumerate()
        .filter_map(|(i, chunk)| vocab::first_match(&WEAK_RE, chunk).map(|at| (i, at)))
        .collect();
    let &(chunk, at) = weak.iter().find(|(i, _)| *i >= 1).or_else(|| weak.first())?;
    Some(Boundary { chunk, inner: inner_split(chunks[chunk], at) })
}

fn inner_split(chunk: &str, keyword_at: usize) -> Option<usize> {
    if keyword_at == 0 {
        return None;
    }
    vocab::looks_like_condiment(&chunk[..keyword_at]).then_some(keyword_at)
}

fn by_keyword(content: &str) -> Option<MealSplit> {
    ANY_DINNER_RE.find_iter(content).find_map(|m| {
        let lunch = trim_separators(&content[..m.start()]);
        let dinner = strip_dinner_label(&content[m.start()..]);
        (!lunch.is_empty() && !dinner.is_empty()).then(|| MealSplit::new(lunch, dinner))
    })
}

fn by_midpoint(content: &str) -> MealSplit {
    let words: Vec<&str> = trim_separators(content).split_whitespace().collect();
    let mid = words.len() / 2;
    let lunch = words[..mid].join(" ");
    let dinner = words[mid..].join(" ");
    MealSplit::new(trim_separators(&lunch), trim_separators(&dinner))
}

fn strip_dinner_label(text: &str) -> &str {
    let text = trim_separators(text);
    let rest = LEADING_DINNER_LABEL
        .find(text)
        .map_or(text, |m| &text[m.end()..]);
    trim_separators(rest)
}

fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c == '+' || c.is_whitespace())
}
