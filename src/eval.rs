use jiff::civil::Date;
use jiff::{Span, ToSpan};

use crate::ast::*;
use crate::error::{RepeatError, Result};

fn out_of_range(_: jiff::Error) -> RepeatError {
    RepeatError::DateOutOfRange
}

/// Compute the next date after `now` that `rule` produces from `base`.
///
/// The result is always strictly after `now` and is reached by stepping
/// forward from `base`, so it is also strictly after `base`.
pub fn next_after(rule: &Rule, base: Date, now: Date) -> Result<Date> {
    if !rule.is_satisfiable() {
        return Err(RepeatError::NeverMatches {
            rule: rule.to_string(),
        });
    }
    match rule {
        Rule::Yearly => next_yearly(base, now),
        Rule::EveryNDays { days } => next_every_n_days(*days, base, now),
        Rule::Weekly { days } => next_weekly(*days, base, now),
        Rule::Monthly { days, months } => next_monthly(*days, *months, base, now),
    }
}

/// Add one calendar year at a time, continuing from each step's result.
fn next_yearly(base: Date, now: Date) -> Result<Date> {
    let mut date = base;
    loop {
        date = add_year(date)?;
        if date > now {
            return Ok(date);
        }
    }
}

/// Same month and day one year later. Feb 29 in a common year rolls over
/// to Mar 1 instead of clamping to Feb 28.
fn add_year(date: Date) -> Result<Date> {
    let shifted = date.checked_add(1.year()).map_err(out_of_range)?;
    if shifted.day() == date.day() {
        return Ok(shifted);
    }
    shifted.tomorrow().map_err(out_of_range)
}

/// Jump straight to the first step past `now` instead of walking there.
fn next_every_n_days(days: u16, base: Date, now: Date) -> Result<Date> {
    let days = i64::from(days);
    let steps = if base > now {
        1
    } else {
        let gap = i64::from(base.until(now).map_err(out_of_range)?.get_days());
        gap / days + 1
    };
    let span = Span::new().try_days(steps * days).map_err(out_of_range)?;
    base.checked_add(span).map_err(out_of_range)
}

/// Membership depends only on the date itself, so the walk can begin at
/// whichever of `base` and `now` is later.
fn next_weekly(days: WeekdaySet, base: Date, now: Date) -> Result<Date> {
    let mut date = base.max(now);
    loop {
        date = date.tomorrow().map_err(out_of_range)?;
        if days.contains(date.weekday()) {
            return Ok(date);
        }
    }
}

fn next_monthly(days: DaySet, months: MonthSet, base: Date, now: Date) -> Result<Date> {
    let mut date = base.max(now);
    let mut month_days = MonthDays::new(days, date);
    loop {
        date = date.tomorrow().map_err(out_of_range)?;
        if month_days.contains(date) && months.contains(date.month()) {
            return Ok(date);
        }
    }
}

/// Day-of-month membership for the month currently being scanned.
///
/// Literal days never change. Slots bound to `-1`/`-2` are resolved against
/// one month at a time and re-resolved when the scan crosses into another.
struct MonthDays {
    days: DaySet,
    marked: u32,
    year: i16,
    month: i8,
}

impl MonthDays {
    fn new(days: DaySet, date: Date) -> Self {
        let mut month_days = Self {
            days,
            marked: 0,
            year: date.year(),
            month: date.month(),
        };
        month_days.resolve_sentinels(date);
        month_days
    }

    fn resolve_sentinels(&mut self, date: Date) {
        self.year = date.year();
        self.month = date.month();
        self.marked = self.days.literal_bits();
        if !self.days.has_sentinels() {
            return;
        }
        let last = last_day_of_month(date);
        if self.days.has_last() {
            self.marked |= 1u32 << last;
        }
        if self.days.has_second_to_last() {
            self.marked |= 1u32 << (last - 1);
        }
    }

    fn contains(&mut self, date: Date) -> bool {
        if self.days.has_sentinels() && (date.year(), date.month()) != (self.year, self.month) {
            self.resolve_sentinels(date);
        }
        self.marked & (1u32 << date.day()) != 0
    }
}

/// Day number of the last day in `date`'s month.
fn last_day_of_month(date: Date) -> i8 {
    date.last_of_month().day()
}

/// Lazy iterator over successive due dates.
///
/// Each item is the next date after the previous one, as if the task were
/// completed on its due day every time.
pub struct Occurrences<'a> {
    rule: &'a Rule,
    base: Date,
    now: Date,
    done: bool,
}

impl<'a> Occurrences<'a> {
    /// Create a new iterator whose first item is `next_after(rule, base, now)`.
    pub fn new(rule: &'a Rule, base: Date, now: Date) -> Self {
        Self {
            rule,
            base,
            now,
            done: false,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Result<Date>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_after(self.rule, self.base, self.now) {
            Ok(date) => {
                self.base = date;
                self.now = date;
                Some(Ok(date))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Compute the next `n` due dates.
pub fn next_n_after(rule: &Rule, base: Date, now: Date, n: usize) -> Result<Vec<Date>> {
    Occurrences::new(rule, base, now).take(n).collect()
}
