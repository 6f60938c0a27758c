// Parser for the compact repeat-rule grammar:
//
//   rule    = "y" | "d" SP int | "w" SP list | "m" SP list [SP list]
//   list    = int *("," int)
//
// Tokens are separated by single spaces. Each kind validates its own
// parameters, and anything left over after them is rejected.

use jiff::civil::Weekday;

use crate::ast::*;
use crate::error::{RepeatError, Span};
use crate::lexer::{tokenize, Token};

/// Parser state: consumes a slice of tokens.
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    input: &'a str,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], input: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            input,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn end_span(&self) -> Span {
        Span::new(self.input.len(), self.input.len())
    }

    /// The mandatory first parameter of `kind`.
    fn expect_param(&mut self, kind: Token<'a>) -> Result<Token<'a>, RepeatError> {
        self.advance().ok_or_else(|| RepeatError::MissingInterval {
            kind: kind.text.to_string(),
            span: self.end_span(),
        })
    }

    fn expect_end(&mut self) -> Result<(), RepeatError> {
        match self.peek() {
            Some(tok) => Err(invalid_interval(tok)),
            None => Ok(()),
        }
    }

    // --- Grammar productions ---

    fn parse_rule(&mut self) -> Result<Rule, RepeatError> {
        let kind = match self.advance() {
            Some(tok) => tok,
            None => {
                return Err(RepeatError::UnsupportedRuleKind {
                    kind: String::new(),
                    span: self.end_span(),
                })
            }
        };

        let rule = match kind.text {
            "y" => Rule::Yearly,
            "d" => self.parse_every_n_days(kind)?,
            "w" => self.parse_weekly(kind)?,
            "m" => self.parse_monthly(kind)?,
            other => {
                return Err(RepeatError::UnsupportedRuleKind {
                    kind: other.to_string(),
                    span: kind.span,
                })
            }
        };

        self.expect_end()?;
        Ok(rule)
    }

    fn parse_every_n_days(&mut self, kind: Token<'a>) -> Result<Rule, RepeatError> {
        let param = self.expect_param(kind)?;
        let days = parse_int(param)?;
        if days < 1 {
            return Err(invalid_interval(param));
        }
        if days > i64::from(MAX_INTERVAL_DAYS) {
            return Err(RepeatError::IntervalTooLarge {
                max: MAX_INTERVAL_DAYS,
                value: days,
                span: param.span,
            });
        }
        Ok(Rule::EveryNDays { days: days as u16 })
    }

    fn parse_weekly(&mut self, kind: Token<'a>) -> Result<Rule, RepeatError> {
        let param = self.expect_param(kind)?;
        let mut days = WeekdaySet::empty();
        for item in param.items() {
            let n = parse_int(item)?;
            let weekday = i8::try_from(n)
                .ok()
                .and_then(|n| Weekday::from_monday_one_offset(n).ok())
                .ok_or(RepeatError::InvalidWeekday {
                    value: n,
                    span: item.span,
                })?;
            days.insert(weekday);
        }
        Ok(Rule::Weekly { days })
    }

    fn parse_monthly(&mut self, kind: Token<'a>) -> Result<Rule, RepeatError> {
        let day_param = self.expect_param(kind)?;
        let mut days = DaySet::empty();
        for item in day_param.items() {
            let n = parse_int(item)?;
            let selector = DaySelector::from_number(n).ok_or(RepeatError::InvalidDayOfMonth {
                value: n,
                span: item.span,
            })?;
            days.insert(selector);
        }

        let months = match self.advance() {
            Some(month_param) => {
                let mut months = MonthSet::empty();
                for item in month_param.items() {
                    let n = parse_int(item)?;
                    if !(1..=12).contains(&n) {
                        return Err(RepeatError::InvalidMonth {
                            value: n,
                            span: item.span,
                        });
                    }
                    months.insert(n as i8);
                }
                months
            }
            None => MonthSet::all(),
        };

        if !days.can_fall_in(months) {
            return Err(RepeatError::NeverMatches {
                rule: self.input.to_string(),
            });
        }

        Ok(Rule::Monthly { days, months })
    }
}

fn invalid_interval(tok: Token<'_>) -> RepeatError {
    RepeatError::InvalidInterval {
        value: tok.text.to_string(),
        span: tok.span,
    }
}

fn parse_int(tok: Token<'_>) -> Result<i64, RepeatError> {
    tok.text.parse().map_err(|_| invalid_interval(tok))
}

/// Parse and validate a repeat rule.
pub fn parse(input: &str) -> Result<Rule, RepeatError> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens, input);
    parser.parse_rule()
}
