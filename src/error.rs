use std::fmt;

use thiserror::Error;

/// Byte range within the rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// All errors produced by nextdate.
///
/// Every message is written for the person who typed the rule, so callers
/// can show it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RepeatError {
    #[error("invalid date '{input}': expected YYYYMMDD")]
    InvalidDateFormat { input: String },

    #[error("unsupported repeat rule '{kind}'")]
    UnsupportedRuleKind { kind: String, span: Span },

    #[error("missing interval for repeat rule '{kind}'")]
    MissingInterval { kind: String, span: Span },

    #[error("invalid interval '{value}'")]
    InvalidInterval { value: String, span: Span },

    #[error("interval exceeds maximum of {max} days (got {value})")]
    IntervalTooLarge { max: u16, value: i64, span: Span },

    #[error("invalid day of week {value}")]
    InvalidWeekday { value: i64, span: Span },

    #[error("invalid day of month {value}")]
    InvalidDayOfMonth { value: i64, span: Span },

    #[error("invalid month {value}")]
    InvalidMonth { value: i64, span: Span },

    #[error("repeat rule '{rule}' never produces a next date")]
    NeverMatches { rule: String },

    #[error("next date is out of the supported range")]
    DateOutOfRange,
}

pub type Result<T> = std::result::Result<T, RepeatError>;

impl RepeatError {
    pub(crate) fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.into(),
        }
    }

    /// Location of the offending token, for errors raised while parsing a rule.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnsupportedRuleKind { span, .. }
            | Self::MissingInterval { span, .. }
            | Self::InvalidInterval { span, .. }
            | Self::IntervalTooLarge { span, .. }
            | Self::InvalidWeekday { span, .. }
            | Self::InvalidDayOfMonth { span, .. }
            | Self::InvalidMonth { span, .. } => Some(*span),
            Self::InvalidDateFormat { .. } | Self::NeverMatches { .. } | Self::DateOutOfRange => {
                None
            }
        }
    }

    /// Format a rich error with the rule echoed and the bad token underlined.
    ///
    /// `input` is the rule string that produced this error.
    pub fn display_rich(&self, input: &str) -> String {
        match self.span() {
            Some(span) if span.end <= input.len() => {
                format_span_error("error", &self.to_string(), &span, input)
            }
            _ => format!("error: {self}"),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    let padding = " ".repeat(span.start + 2);
    let underline = "^".repeat((span.end - span.start).max(1));
    out.push_str(&padding);
    out.push_str(&underline);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = RepeatError::IntervalTooLarge {
            max: 400,
            value: 401,
            span: Span::new(2, 5),
        };
        assert_eq!(err.to_string(), "interval exceeds maximum of 400 days (got 401)");

        let err = RepeatError::invalid_date("2024-03-01");
        assert_eq!(
            err.to_string(),
            "invalid date '2024-03-01': expected YYYYMMDD"
        );
    }

    #[test]
    fn test_rich_underlines_token() {
        let err = RepeatError::InvalidDayOfMonth {
            value: 32,
            span: Span::new(2, 4),
        };
        let rich = err.display_rich("m 32");
        assert_eq!(rich, "error: invalid day of month 32\n  m 32\n    ^^");
    }

    #[test]
    fn test_rich_empty_span_gets_one_caret() {
        let err = RepeatError::MissingInterval {
            kind: "d".into(),
            span: Span::new(1, 1),
        };
        assert!(err.display_rich("d").ends_with("   ^"));
    }

    #[test]
    fn test_rich_without_span_is_plain() {
        let err = RepeatError::DateOutOfRange;
        assert_eq!(
            err.display_rich("y"),
            "error: next date is out of the supported range"
        );
    }
}
