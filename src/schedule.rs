use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::meal_time::MealPeriod;
use crate::normalize::collapse_whitespace;
use crate::segment::week_blocks;
use crate::split::split_meals;

pub const STANDARD_BREAKFAST: &str = "Standard Breakfast (Half fry, Full fry, Omlete, Khakina, Bread, Yoghurt, Blueband, Tea, Paratha, Chipati)";
pub const SUNDAY_BREAKFAST: &str =
    "Special Breakfast (Halwa + Puri/Kulchay + Channa + Banana Shake/Lassi)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    pub const ALL: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }

    /// The following day in menu order; Sunday closes the week.
    pub fn next(self) -> Option<DayName> {
        DayName::ALL.get(self.index() + 1).copied()
    }

    /// Zero-based position, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayName::Monday => Weekday::Mon,
            DayName::Tuesday => Weekday::Tue,
            DayName::Wednesday => Weekday::Wed,
            DayName::Thursday => Weekday::Thu,
            DayName::Friday => Weekday::Fri,
            DayName::Saturday => Weekday::Sat,
            DayName::Sunday => Weekday::Sun,
        }
    }

    pub fn breakfast(self) -> &'static str {
        match self {
            DayName::Sunday => SUNDAY_BREAKFAST,
            _ => STANDARD_BREAKFAST,
        }
    }
}

impl From<Weekday> for DayName {
    fn from(day: Weekday) -> Self {
        DayName::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResult {
    pub name: DayName,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl DayResult {
    pub fn meal(&self, period: MealPeriod) -> Option<&str> {
        match period {
            MealPeriod::Breakfast => Some(&self.breakfast),
            MealPeriod::Lunch => Some(&self.lunch),
            MealPeriod::Dinner => Some(&self.dinner),
            MealPeriod::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekResult {
    /// The number printed in the `Week <n>` header.
    pub index: u32,
    pub days: Vec<DayResult>,
}

impl WeekResult {
    pub fn day(&self, name: DayName) -> Option<&DayResult> {
        self.days.iter().find(|d| d.name == name)
    }
}

/// A parsed rotating menu, up to four weeks long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub weeks: Vec<WeekResult>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Number of calendar days the menu spans, counting every week as seven.
    pub fn total_days(&self) -> usize {
        self.weeks.len() * 7
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }
}

/// Parses the text extracted from a menu PDF into a [`Schedule`].
///
/// This never fails: text without recognizable week and day markers gives
/// an empty schedule, and a week where no day matched is left out.
pub fn parse_schedule(raw: &str) -> Schedule {
    let text = collapse_whitespace(raw);

    let weeks: Vec<WeekResult> = week_blocks(&text)
        .into_iter()
        .filter_map(|block| {
            let days: Vec<DayResult> = block
                .days()
                .into_iter()
                .map(|day| {
                    let meals = split_meals(&day.content);
                    DayResult {
                        name: day.day,
                        breakfast: day.day.breakfast().to_string(),
                        lunch: meals.lunch,
                        dinner: meals.dinner,
                    }
                })
                .collect();

            if days.is_empty() {
                debug!(week = block.index, "no day rows matched, dropping week");
                return None;
            }
            Some(WeekResult {
                index: block.index,
                days,
            })
        })
        .collect();

    if weeks.is_empty() {
        warn!("no week sections found in menu text");
    }
    Schedule { weeks }
}
