//! Due-date policy for tasks that carry an optional repeat rule.
//!
//! These are the decisions a task tracker makes around the evaluator when a
//! task is saved or marked done. Storage is the caller's business; every
//! function here takes plain strings and returns the date to store.

use jiff::civil::Date;
use tracing::debug;

use crate::date::{format_date, parse_date};
use crate::error::Result;
use crate::{next_date, Rule};

/// What to do with a task that was just marked done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// One-shot task: delete it.
    Remove,
    /// Repeating task: keep it, due on the given `YYYYMMDD` date.
    Reschedule(String),
}

/// Decide the date to store for a task being created or edited.
///
/// - no date: due today;
/// - date in the past without a rule: due today;
/// - date in the past with a rule: the rule's next date after today;
/// - date today or later: kept as given.
///
/// A non-empty `repeat` must be a valid rule even when the date is kept.
pub fn resolve_due_date(today: Date, date: &str, repeat: &str) -> Result<String> {
    if date.is_empty() {
        return Ok(format_date(today));
    }

    let due = parse_date(date)?;
    if due < today {
        if repeat.is_empty() {
            debug!(date, "past due date without repeat rule, moving to today");
            return Ok(format_date(today));
        }
        let next = next_date(today, date, repeat)?;
        debug!(date, repeat, next = %next, "past due date moved to next repeat");
        return Ok(next);
    }

    if !repeat.is_empty() {
        Rule::parse(repeat)?;
    }
    Ok(date.to_string())
}

/// Decide what happens to a task once it is marked done on `today`.
pub fn complete(today: Date, date: &str, repeat: &str) -> Result<Completion> {
    if repeat.is_empty() {
        debug!(date, "completed one-shot task");
        return Ok(Completion::Remove);
    }
    let next = next_date(today, date, repeat)?;
    debug!(date, repeat, next = %next, "rescheduled repeating task");
    Ok(Completion::Reschedule(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepeatError;
    use jiff::civil::date;

    fn today() -> Date {
        date(2024, 3, 10)
    }

    #[test]
    fn test_missing_date_is_today() {
        assert_eq!(resolve_due_date(today(), "", "").unwrap(), "20240310");
        assert_eq!(resolve_due_date(today(), "", "d 5").unwrap(), "20240310");
    }

    #[test]
    fn test_past_date_without_rule_is_today() {
        assert_eq!(
            resolve_due_date(today(), "20240101", "").unwrap(),
            "20240310"
        );
    }

    #[test]
    fn test_past_date_with_rule_advances() {
        assert_eq!(
            resolve_due_date(today(), "20240308", "d 5").unwrap(),
            "20240313"
        );
    }

    #[test]
    fn test_today_and_future_are_kept() {
        assert_eq!(
            resolve_due_date(today(), "20240310", "d 5").unwrap(),
            "20240310"
        );
        assert_eq!(
            resolve_due_date(today(), "20241231", "").unwrap(),
            "20241231"
        );
    }

    #[test]
    fn test_bad_inputs() {
        assert!(matches!(
            resolve_due_date(today(), "2024-03-10", ""),
            Err(RepeatError::InvalidDateFormat { .. })
        ));
        assert!(matches!(
            resolve_due_date(today(), "20241231", "q"),
            Err(RepeatError::UnsupportedRuleKind { .. })
        ));
        assert!(matches!(
            resolve_due_date(today(), "20240101", "m 32"),
            Err(RepeatError::InvalidDayOfMonth { value: 32, .. })
        ));
    }

    #[test]
    fn test_complete_one_shot() {
        assert_eq!(
            complete(today(), "20240310", "").unwrap(),
            Completion::Remove
        );
    }

    #[test]
    fn test_complete_repeating() {
        assert_eq!(
            complete(today(), "20240310", "w 1,3").unwrap(),
            Completion::Reschedule("20240311".into())
        );
        // Completing ahead of time still moves past the stored date.
        assert_eq!(
            complete(today(), "20240401", "d 7").unwrap(),
            Completion::Reschedule("20240408".into())
        );
    }

    #[test]
    fn test_complete_bad_rule() {
        assert!(complete(today(), "20240310", "d 0").is_err());
    }
}
