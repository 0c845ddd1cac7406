use crate::calendar::AcademicCalendar;
use crate::category::DayCategory;
use chrono::{Datelike, Days, NaiveDate, TimeDelta};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// First day of the simulated period.
pub fn period_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 2024 (leap) + 2025 + 2026.
pub const PERIOD_DAYS: usize = 366 + 365 + 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub category: DayCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    Empty,
    Gap {
        index: usize,
        expected: NaiveDate,
        found: NaiveDate,
    },
    DateOutOfRange {
        index: usize,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Empty => write!(f, "day sequence contains no rows"),
            SequenceError::Gap {
                index,
                expected,
                found,
            } => write!(
                f,
                "day sequence is not contiguous at row {index}: expected {expected}, found {found}"
            ),
            SequenceError::DateOutOfRange { index } => {
                write!(f, "day sequence date at row {index} is out of range")
            }
        }
    }
}

impl std::error::Error for SequenceError {}

/// Consecutive calendar days, index `i` being `start + i` days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySequence {
    start: NaiveDate,
    categories: Vec<DayCategory>,
}

impl DaySequence {
    pub fn new(start: NaiveDate, categories: Vec<DayCategory>) -> Self {
        Self { start, categories }
    }

    /// Like `new`, but rejects empty input and ranges whose last date is
    /// not representable.
    pub fn try_new(
        start: NaiveDate,
        categories: Vec<DayCategory>,
    ) -> Result<Self, SequenceError> {
        let last = categories.len().checked_sub(1).ok_or(SequenceError::Empty)?;
        if start.checked_add_days(Days::new(last as u64)).is_none() {
            return Err(SequenceError::DateOutOfRange { index: last });
        }
        Ok(Self::new(start, categories))
    }

    /// Build from explicit rows, rejecting gaps and unordered dates.
    pub fn from_days(days: &[CalendarDay]) -> Result<Self, SequenceError> {
        let first = days.first().ok_or(SequenceError::Empty)?;
        let mut categories = Vec::with_capacity(days.len());
        categories.push(first.category);
        let mut previous = first.date;
        for (index, day) in days.iter().enumerate().skip(1) {
            let expected = previous
                .succ_opt()
                .ok_or(SequenceError::DateOutOfRange { index })?;
            if day.date != expected {
                return Err(SequenceError::Gap {
                    index,
                    expected,
                    found: day.date,
                });
            }
            categories.push(day.category);
            previous = day.date;
        }
        Ok(Self::new(first.date, categories))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[DayCategory] {
        &self.categories
    }

    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + TimeDelta::days(index as i64)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.start).num_days();
        usize::try_from(offset).ok().filter(|idx| *idx < self.len())
    }

    pub fn get(&self, index: usize) -> Option<CalendarDay> {
        self.categories.get(index).map(|category| CalendarDay {
            date: self.date_at(index),
            category: *category,
        })
    }

    pub fn category_on(&self, date: NaiveDate) -> Option<DayCategory> {
        self.index_of(date).map(|idx| self.categories[idx])
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.categories
            .iter()
            .enumerate()
            .map(|(idx, category)| CalendarDay {
                date: self.date_at(idx),
                category: *category,
            })
    }

    /// Days of one calendar year, in order.
    pub fn year(&self, year: i32) -> impl Iterator<Item = CalendarDay> + '_ {
        self.days().filter(move |day| day.date.year() == year)
    }

    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.days().map(|day| day.date.year()).collect();
        years.dedup();
        years
    }

    pub fn count(&self, category: DayCategory) -> usize {
        self.categories.iter().filter(|c| **c == category).count()
    }

    /// Same dates, different categories.
    pub fn with_categories(&self, categories: Vec<DayCategory>) -> Self {
        Self::new(self.start, categories)
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let dates: Vec<i32> = self
            .days()
            .map(|day| (day.date - epoch).num_days() as i32)
            .collect();
        let values: Vec<i32> = self
            .categories
            .iter()
            .map(|c| i32::from(c.ordinal()))
            .collect();
        let ds = Series::new(PlSmallStr::from_static("ds"), dates).cast(&DataType::Date)?;
        let value = Series::new(PlSmallStr::from_static("value"), values);
        DataFrame::new(vec![ds.into_column(), value.into_column()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    Start,
    End,
}

/// A semester start or end, with the class days counted up to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterBoundary {
    pub date: NaiveDate,
    pub kind: BoundaryKind,
    pub class_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub boundaries: Vec<SemesterBoundary>,
    pub strike_days: usize,
}

/// Classify `days` consecutive dates starting at `start`.
pub fn build_range(
    calendar: &AcademicCalendar,
    start: NaiveDate,
    days: usize,
) -> (DaySequence, BuildSummary) {
    let mut categories = Vec::with_capacity(days);
    let mut summary = BuildSummary::default();
    let mut class_days: u32 = 0;

    for date in start.iter_days().take(days) {
        let classification = calendar.classify(date);
        if classification.counts_as_class_day {
            class_days += 1;
        }

        match classification.category {
            DayCategory::SemesterStart => {
                info!(%date, class_days, "semester start");
                summary.boundaries.push(SemesterBoundary {
                    date,
                    kind: BoundaryKind::Start,
                    class_days,
                });
                class_days = 1;
            }
            DayCategory::SemesterEnd => {
                info!(%date, class_days, "semester end");
                summary.boundaries.push(SemesterBoundary {
                    date,
                    kind: BoundaryKind::End,
                    class_days,
                });
                class_days = 0;
            }
            DayCategory::Strike => summary.strike_days += 1,
            _ => {}
        }

        categories.push(classification.category);
    }

    info!(strike_days = summary.strike_days, "class days lost to strike");
    (DaySequence::new(start, categories), summary)
}

/// Classify the whole 2024-2026 period.
pub fn build_sequence(vacation_offset: i64) -> (DaySequence, BuildSummary) {
    build_range(
        &AcademicCalendar::new(vacation_offset),
        period_start(),
        PERIOD_DAYS,
    )
}
