use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealPeriod {
    Breakfast,
    Lunch,
    Dinner,
    None,
}

/// Serving window in minutes after midnight, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: u32,
    end: u32,
}

impl Window {
    const fn hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Self {
        Self {
            start: start_h * 60 + start_m,
            end: end_h * 60 + end_m,
        }
    }

    fn contains(self, minute: u32) -> bool {
        minute >= self.start && minute < self.end
    }

    fn label(self) -> String {
        format!("{} - {}", clock(self.start), clock(self.end))
    }
}

const WEEKDAY_BREAKFAST: Window = Window::hm(7, 0, 9, 30);
const SUNDAY_BREAKFAST: Window = Window::hm(10, 0, 11, 15);
const LUNCH: Window = Window::hm(13, 0, 15, 0);
const DINNER: Window = Window::hm(20, 0, 22, 0);

impl MealPeriod {
    pub const SERVED: [MealPeriod; 3] = [MealPeriod::Breakfast, MealPeriod::Lunch, MealPeriod::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "breakfast",
            MealPeriod::Lunch => "lunch",
            MealPeriod::Dinner => "dinner",
            MealPeriod::None => "none",
        }
    }

    fn window(self, day: Weekday) -> Option<Window> {
        match self {
            MealPeriod::Breakfast if day == Weekday::Sun => Some(SUNDAY_BREAKFAST),
            MealPeriod::Breakfast => Some(WEEKDAY_BREAKFAST),
            MealPeriod::Lunch => Some(LUNCH),
            MealPeriod::Dinner => Some(DINNER),
            MealPeriod::None => None,
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealPeriod::Breakfast),
            "lunch" => Ok(MealPeriod::Lunch),
            "dinner" => Ok(MealPeriod::Dinner),
            "none" => Ok(MealPeriod::None),
            other => Err(format!("unknown meal period '{other}'")),
        }
    }
}

/// Which meal is being served at `time` on `day`.
pub fn current_period(day: Weekday, time: NaiveTime) -> MealPeriod {
    let minute = time.hour() * 60 + time.minute();
    MealPeriod::SERVED
        .into_iter()
        .find(|period| period.window(day).is_some_and(|w| w.contains(minute)))
        .unwrap_or(MealPeriod::None)
}

/// Display string for a period's serving hours, e.g. `"1:00 PM - 3:00 PM"`.
pub fn serving_hours(period: MealPeriod, day: Weekday) -> Option<String> {
    period.window(day).map(Window::label)
}

fn clock(minute: u32) -> String {
    let (h, m) = (minute / 60, minute % 60);
    let suffix = if h >= 12 { "PM" } else { "AM" };
    let h12 = match h % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12}:{m:02} {suffix}")
}
