//! Keyword vocabularies used to tell lunch items from dinner items.
//!
//! All entries are lowercase single words and are matched word-bounded and
//! case-insensitively.

use regex::Regex;
use std::sync::LazyLock;

/// Dishes that almost always open the dinner column.
pub const STRONG_DINNER: &[&str] = &[
    "murgh", "channa", "chana", "daal", "chawal", "nuggets", "gosht", "karahi", "nihari", "haleem",
];

/// Dishes that often, but not reliably, belong to dinner.
pub const WEAK_DINNER: &[&str] = &[
    "biryani", "pasta", "macaroni", "rice", "pulao", "special", "korma", "handi", "qeema", "palak",
];

/// Sides that trail the lunch column and get glued onto the first dinner dish.
pub const CONDIMENTS: &[&str] = &[
    "salad", "raita", "tang", "rooh", "afza", "chutney", "pickle", "sauce",
];

pub static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| word_set(STRONG_DINNER));
pub static WEAK_RE: LazyLock<Regex> = LazyLock::new(|| word_set(WEAK_DINNER));
pub static ANY_DINNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let all: Vec<&str> = STRONG_DINNER.iter().chain(WEAK_DINNER).copied().collect();
    word_set(&all)
});

fn word_set(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("keyword set is a valid regex")
}

/// Earliest byte offset of any word from `set` in `text`.
pub fn first_match(set: &Regex, text: &str) -> Option<usize> {
    set.find(text).map(|m| m.start())
}

/// True when `fragment` reads like a trailing lunch side: one of its words
/// is a known condiment, or it carries anything besides letters and spaces
/// (e.g. `Tang/Rooh`).
pub fn looks_like_condiment(fragment: &str) -> bool {
    let lower = fragment.trim().to_lowercase();
    if lower
        .chars()
        .any(|c| !c.is_ascii_alphabetic() && !c.is_whitespace())
    {
        return true;
    }
    lower.split_whitespace().any(|w| CONDIMENTS.contains(&w))
}
