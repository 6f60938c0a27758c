use jiff::civil::Weekday;

/// Largest interval accepted by `d N`.
pub const MAX_INTERVAL_DAYS: u16 = 400;

/// A parsed repeat rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `y`: same day every year.
    Yearly,
    /// `d 7`: every N days.
    EveryNDays { days: u16 },
    /// `w 1,3,7`: on the listed weekdays.
    Weekly { days: WeekdaySet },
    /// `m -1,15 1,6`: on the listed days of the listed months.
    Monthly { days: DaySet, months: MonthSet },
}

impl Rule {
    /// The leading token this rule is written with.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Yearly => "y",
            Self::EveryNDays { .. } => "d",
            Self::Weekly { .. } => "w",
            Self::Monthly { .. } => "m",
        }
    }

    /// Whether some date can ever satisfy this rule.
    ///
    /// Parsed rules always can; this guards hand-built values such as an
    /// empty weekday set or `m 31 2`.
    pub fn is_satisfiable(&self) -> bool {
        match self {
            Self::Yearly => true,
            Self::EveryNDays { days } => *days >= 1,
            Self::Weekly { days } => !days.is_empty(),
            Self::Monthly { days, months } => days.can_fall_in(*months),
        }
    }
}

/// Set of weekdays, indexed Sunday=0 through Saturday=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= 1u8 << weekday.to_sunday_zero_offset();
    }

    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1u8 << weekday.to_sunday_zero_offset()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in Monday..Sunday order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        (1..=7)
            .filter_map(|n| Weekday::from_monday_one_offset(n).ok())
            .filter(move |wd| self.contains(*wd))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for wd in iter {
            set.insert(wd);
        }
        set
    }
}

/// One entry of a monthly day list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySelector {
    /// A literal day number, 1..=31.
    Day(i8),
    /// `-1`
    Last,
    /// `-2`
    SecondToLast,
}

impl DaySelector {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            -1 => Some(Self::Last),
            -2 => Some(Self::SecondToLast),
            1..=31 => Some(Self::Day(n as i8)),
            _ => None,
        }
    }

    pub fn number(self) -> i8 {
        match self {
            Self::Day(d) => d,
            Self::Last => -1,
            Self::SecondToLast => -2,
        }
    }
}

/// Days of the month a monthly rule fires on.
///
/// Literal days and the `-1`/`-2` sentinels are kept apart: literal days are
/// fixed, while sentinels resolve to a different day in each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet {
    literal: u32,
    last: bool,
    second_to_last: bool,
}

impl DaySet {
    pub const fn empty() -> Self {
        Self {
            literal: 0,
            last: false,
            second_to_last: false,
        }
    }

    pub fn insert(&mut self, selector: DaySelector) {
        match selector {
            DaySelector::Day(d) if (1..=31).contains(&d) => self.literal |= 1u32 << d,
            DaySelector::Day(_) => {}
            DaySelector::Last => self.last = true,
            DaySelector::SecondToLast => self.second_to_last = true,
        }
    }

    /// Bitmask of literal days, bit `d` for day `d`.
    pub fn literal_bits(self) -> u32 {
        self.literal
    }

    pub fn has_last(self) -> bool {
        self.last
    }

    pub fn has_second_to_last(self) -> bool {
        self.second_to_last
    }

    pub fn has_sentinels(self) -> bool {
        self.last || self.second_to_last
    }

    pub fn is_empty(self) -> bool {
        self.literal == 0 && !self.has_sentinels()
    }

    /// Members in ascending numeric order: `-2`, `-1`, then 1..=31.
    pub fn iter(self) -> impl Iterator<Item = DaySelector> {
        let sentinels = [
            (self.second_to_last, DaySelector::SecondToLast),
            (self.last, DaySelector::Last),
        ]
        .into_iter()
        .filter_map(|(set, sel)| set.then_some(sel));
        let literal = (1..=31i8)
            .filter(move |d| self.literal & (1u32 << *d) != 0)
            .map(DaySelector::Day);
        sentinels.chain(literal)
    }

    /// Whether any selected day exists in any selected month.
    pub fn can_fall_in(self, months: MonthSet) -> bool {
        if months.is_empty() || self.is_empty() {
            return false;
        }
        if self.has_sentinels() {
            return true;
        }
        months.iter().any(|m| {
            let longest = longest_month(m);
            (1..=longest).any(|d| self.literal & (1u32 << d) != 0)
        })
    }
}

impl FromIterator<DaySelector> for DaySet {
    fn from_iter<I: IntoIterator<Item = DaySelector>>(iter: I) -> Self {
        let mut set = Self::empty();
        for sel in iter {
            set.insert(sel);
        }
        set
    }
}

/// Most days a month can have in any year.
fn longest_month(month: i8) -> i8 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Set of months, bit `m` for month `m` (1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MonthSet(u16);

impl MonthSet {
    const ALL: u16 = 0b1_1111_1111_1110;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(Self::ALL)
    }

    pub fn insert(&mut self, month: i8) {
        if (1..=12).contains(&month) {
            self.0 |= 1u16 << month;
        }
    }

    pub fn contains(self, month: i8) -> bool {
        (1..=12).contains(&month) && self.0 & (1u16 << month) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_all(self) -> bool {
        self.0 == Self::ALL
    }

    pub fn iter(self) -> impl Iterator<Item = i8> {
        (1..=12).filter(move |m| self.contains(*m))
    }
}

impl FromIterator<i8> for MonthSet {
    fn from_iter<I: IntoIterator<Item = i8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for m in iter {
            set.insert(m);
        }
        set
    }
}
