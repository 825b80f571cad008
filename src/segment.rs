//! Week and day segmentation of the flattened menu text.
//!
//! The PDF table is gone by the time we see the text, so boundaries come
//! from literal markers only: `Week <n>` headers and `<Day> Breakfast` row
//! labels in Monday..Sunday order.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::collapse_whitespace;
use crate::schedule::DayName;

/// The menu rotates over a fixed four-week cycle.
pub const MAX_WEEKS: usize = 4;

static WEEK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Week\s+(\d+)").expect("week header regex"));

// Monday..Saturday: everything between "<Day> Breakfast[*]" and the next day name.
static DAY_ROWS: LazyLock<Vec<(DayName, Regex)>> = LazyLock::new(|| {
    DayName::ALL
        .iter()
        .filter_map(|day| {
            let next = day.next()?;
            let pattern = format!(
                r"(?s){}\s+Breakfast\*?\s+(.*?)\s+{}",
                day.as_str(),
                next.as_str()
            );
            Some((*day, Regex::new(&pattern).expect("day row regex")))
        })
        .collect()
});

static SUNDAY_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Sunday\s+Breakfast\*?\s+(.*)").expect("sunday row regex"));

// Sunday has no successor; its row ends at a footnote marker or the next week.
static SUNDAY_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Breakfast\*\s*:|Week").expect("sunday end regex"));

/// One `Week <n>` section of the menu text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBlock<'a> {
    pub index: u32,
    pub content: &'a str,
}

/// The free text recorded for one day inside a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock {
    pub day: DayName,
    pub content: String,
}

/// Splits `text` at every `Week <n>` header and keeps the first
/// [`MAX_WEEKS`] sections with a positive index.
///
/// A header whose number is zero or does not fit a `u32` still ends the
/// section before it, but opens no section of its own.
pub fn week_blocks(text: &str) -> Vec<WeekBlock<'_>> {
    let headers: Vec<_> = WEEK_HEADER.captures_iter(text).collect();
    let mut blocks = Vec::new();

    for (i, caps) in headers.iter().enumerate() {
        let Some(header) = caps.get(0) else {
            continue;
        };
        let index = match caps[1].parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => continue,
        };
        let end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());

        blocks.push(WeekBlock {
            index,
            content: &text[header.end()..end],
        });
        if blocks.len() == MAX_WEEKS {
            break;
        }
    }

    blocks
}

impl WeekBlock<'_> {
    /// Day rows found in this week, in canonical order. Days whose markers
    /// are missing are left out rather than filled with blanks.
    pub fn days(&self) -> Vec<DayBlock> {
        let mut days: Vec<DayBlock> = DAY_ROWS
            .iter()
            .filter_map(|(day, pattern)| {
                let caps = pattern.captures(self.content)?;
                Some(DayBlock {
                    day: *day,
                    content: collapse_whitespace(&caps[1]),
                })
            })
            .collect();

        if let Some(caps) = SUNDAY_ROW.captures(self.content) {
            let tail = &caps[1];
            let end = SUNDAY_END.find(tail).map_or(tail.len(), |m| m.start());
            days.push(DayBlock {
                day: DayName::Sunday,
                content: collapse_whitespace(&tail[..end]),
            });
        }

        days
    }
}
