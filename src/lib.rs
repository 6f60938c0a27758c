//! nextdate: compact repeat rules for task due dates.
//!
//! A rule is a short space-separated string:
//!
//! | rule          | meaning                                              |
//! |---------------|------------------------------------------------------|
//! | `y`           | every year on the same day                           |
//! | `d 7`         | every 7 days (1..=400)                               |
//! | `w 1,3,7`     | on Mondays, Wednesdays and Sundays                   |
//! | `m -1,15`     | on the 15th and the last day of every month          |
//! | `m 1,-2 1,6`  | on the 1st and second-to-last day of January and June |
//!
//! Dates are whole days written as `YYYYMMDD`.
//!
//! # Examples
//!
//! ```
//! use jiff::civil::date;
//!
//! let next = nextdate::next_date(date(2024, 3, 10), "20240308", "d 5").unwrap();
//! assert_eq!(next, "20240313");
//! ```

pub mod ast;
pub mod date;
pub mod display;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod task;

pub use ast::{DaySelector, DaySet, MonthSet, Rule, WeekdaySet};
pub use error::{RepeatError, Span};
pub use eval::Occurrences;

use jiff::civil::Date;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Compute the next due date for a task.
///
/// `base` is the task's current `YYYYMMDD` date and `rule` its repeat rule.
/// The result is the first date the rule produces from `base` that falls
/// strictly after `now`, formatted as `YYYYMMDD`.
pub fn next_date(now: Date, base: &str, rule: &str) -> Result<String, RepeatError> {
    let base = date::parse_date(base)?;
    let rule = Rule::parse(rule)?;
    let next = rule.next_after(base, now)?;
    Ok(date::format_date(next))
}

// --- Rule convenience methods ---

impl Rule {
    /// Parse and validate a repeat rule.
    pub fn parse(input: &str) -> Result<Self, RepeatError> {
        parser::parse(input)
    }

    /// Compute the next date after `now`, stepping from `base`.
    pub fn next_after(&self, base: Date, now: Date) -> Result<Date, RepeatError> {
        eval::next_after(self, base, now)
    }

    /// Compute the next `n` successive due dates.
    pub fn next_n_after(&self, base: Date, now: Date, n: usize) -> Result<Vec<Date>, RepeatError> {
        eval::next_n_after(self, base, now, n)
    }

    /// Lazy iterator over successive due dates.
    pub fn occurrences(&self, base: Date, now: Date) -> Occurrences<'_> {
        Occurrences::new(self, base, now)
    }
}

impl FromStr for Rule {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;

        match self {
            Rule::Yearly => {
                map.serialize_entry("kind", "yearly")?;
            }
            Rule::EveryNDays { days } => {
                map.serialize_entry("kind", "days")?;
                map.serialize_entry("interval", days)?;
            }
            Rule::Weekly { days } => {
                map.serialize_entry("kind", "weekly")?;
                map.serialize_entry(
                    "weekdays",
                    &days
                        .iter()
                        .map(|wd| wd.to_monday_one_offset())
                        .collect::<Vec<_>>(),
                )?;
            }
            Rule::Monthly { days, months } => {
                map.serialize_entry("kind", "monthly")?;
                map.serialize_entry(
                    "days",
                    &days.iter().map(DaySelector::number).collect::<Vec<_>>(),
                )?;
                map.serialize_entry("months", &months.iter().collect::<Vec<_>>())?;
            }
        }

        map.serialize_entry("rule", &self.to_string())?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Deserialize from the rule string
        let s = String::deserialize(deserializer)?;
        Rule::parse(&s).map_err(serde::de::Error::custom)
    }
}
