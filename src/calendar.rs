use crate::category::{Classification, DayCategory};
use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

/// Length of the 2025 vacation window in days.
pub const VACATION_WINDOW_DAYS: i64 = 28;

/// Inclusive span covered by a rule inside its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSpan {
    /// Fixed `(month, day)` bounds, both inclusive.
    Fixed { start: (u32, u32), end: (u32, u32) },
    /// `days` consecutive days starting on Jan 1 shifted by the vacation offset.
    VacationWindow { days: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRule {
    pub span: RuleSpan,
    pub classification: Classification,
}

impl DayRule {
    const fn range(start: (u32, u32), end: (u32, u32), category: DayCategory, counts: bool) -> Self {
        Self {
            span: RuleSpan::Fixed { start, end },
            classification: Classification::new(category, counts),
        }
    }

    const fn single(month: u32, day: u32, category: DayCategory, counts: bool) -> Self {
        Self::range((month, day), (month, day), category, counts)
    }

    const fn vacation(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::range(start, end, DayCategory::Vacation, false)
    }

    /// `date` must already belong to the year the rule is listed under.
    pub fn matches(&self, date: NaiveDate, vacation_offset: i64) -> bool {
        match self.span {
            RuleSpan::Fixed { start, end } => {
                let md = (date.month(), date.day());
                start <= md && md <= end
            }
            RuleSpan::VacationWindow { days } => vacation_window(date.year(), vacation_offset, days)
                .is_some_and(|(first, last)| first <= date && date <= last),
        }
    }
}

/// Rules of one year, listed in priority order.
#[derive(Debug, Clone, Copy)]
pub struct YearRules {
    pub year: i32,
    pub rules: &'static [DayRule],
}

const RULES_2024: &[DayRule] = &[
    DayRule::range((5, 2), (6, 23), DayCategory::Strike, false),
    DayRule::single(2, 21, DayCategory::SemesterStart, true),
    DayRule::single(7, 31, DayCategory::SemesterStart, true),
    DayRule::single(6, 26, DayCategory::SemesterEnd, true),
    DayRule::single(12, 7, DayCategory::SemesterEnd, true),
    DayRule::range((6, 27), (6, 29), DayCategory::PreSemesterBreak, false),
    DayRule::range((7, 1), (7, 3), DayCategory::PreSemesterBreak, false),
    DayRule::range((12, 9), (12, 14), DayCategory::PreSemesterBreak, false),
    DayRule::vacation((1, 1), (1, 28)),
    DayRule::vacation((2, 9), (2, 18)),
    DayRule::vacation((3, 29), (3, 31)),
    DayRule::vacation((4, 22), (4, 23)),
    DayRule::vacation((5, 1), (5, 1)),
    DayRule::vacation((5, 30), (5, 31)),
    DayRule::vacation((7, 8), (7, 28)),
    DayRule::vacation((9, 7), (9, 7)),
    DayRule::vacation((10, 12), (10, 12)),
    DayRule::vacation((10, 28), (10, 28)),
    DayRule::vacation((11, 2), (11, 2)),
    DayRule::vacation((11, 20), (11, 20)),
    DayRule::vacation((11, 15), (11, 16)),
    DayRule::vacation((12, 25), (12, 25)),
];

const RULES_2025: &[DayRule] = &[
    DayRule {
        span: RuleSpan::VacationWindow {
            days: VACATION_WINDOW_DAYS,
        },
        classification: Classification::new(DayCategory::Vacation, false),
    },
    // Carnival
    DayRule::vacation((2, 28), (2, 28)),
    DayRule::vacation((3, 1), (3, 5)),
    DayRule::vacation((5, 1), (5, 1)),
    DayRule::vacation((11, 2), (11, 2)),
    DayRule::vacation((11, 15), (11, 15)),
    DayRule::vacation((12, 25), (12, 25)),
];

pub const RULE_TABLE: &[YearRules] = &[
    YearRules {
        year: 2024,
        rules: RULES_2024,
    },
    YearRules {
        year: 2025,
        rules: RULES_2025,
    },
];

const SUNDAY: Classification = Classification::new(DayCategory::Sunday, false);
const WORKDAY: Classification = Classification::new(DayCategory::Workday, true);

/// Priority-ordered rules for `year`; empty for years without a special calendar.
pub fn rules_for_year(year: i32) -> &'static [DayRule] {
    RULE_TABLE
        .iter()
        .find(|entry| entry.year == year)
        .map(|entry| entry.rules)
        .unwrap_or(&[])
}

/// First and last day of the shifted vacation window of `year`.
///
/// Returns `None` when the shifted window cannot be represented.
pub fn vacation_window(year: i32, vacation_offset: i64, days: i64) -> Option<(NaiveDate, NaiveDate)> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first = jan_first.checked_add_signed(TimeDelta::try_days(vacation_offset)?)?;
    let last = first.checked_add_signed(TimeDelta::try_days(days - 1)?)?;
    Some((first, last))
}

/// Classify a date. Sunday wins over every table rule, the first matching
/// table rule wins over the workday default.
pub fn classify(date: NaiveDate, vacation_offset: i64) -> Classification {
    if date.weekday() == Weekday::Sun {
        return SUNDAY;
    }
    rules_for_year(date.year())
        .iter()
        .find(|rule| rule.matches(date, vacation_offset))
        .map(|rule| rule.classification)
        .unwrap_or(WORKDAY)
}

/// The institution's calendar for one choice of vacation offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcademicCalendar {
    vacation_offset: i64,
}

impl AcademicCalendar {
    pub fn new(vacation_offset: i64) -> Self {
        Self { vacation_offset }
    }

    pub fn vacation_offset(&self) -> i64 {
        self.vacation_offset
    }

    pub fn classify(&self, date: NaiveDate) -> Classification {
        classify(date, self.vacation_offset)
    }

    pub fn is_class_day(&self, date: NaiveDate) -> bool {
        self.classify(date).counts_as_class_day
    }

    /// The 2025 vacation window after applying the offset.
    pub fn vacation_window_2025(&self) -> Option<(NaiveDate, NaiveDate)> {
        vacation_window(2025, self.vacation_offset, VACATION_WINDOW_DAYS)
    }

    /// Count class days in a date range (inclusive)
    pub fn count_class_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| self.is_class_day(*date))
            .count() as i64
    }
}
