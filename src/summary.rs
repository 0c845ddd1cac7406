use crate::category::DayCategory;
use crate::sequence::DaySequence;
use chrono::Datelike;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of days of each category in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCounts {
    pub year: i32,
    /// Indexed by category ordinal.
    pub counts: [u32; 7],
}

impl YearCounts {
    pub fn get(&self, category: DayCategory) -> u32 {
        self.counts[category.ordinal() as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

pub fn category_counts(sequence: &DaySequence) -> Vec<YearCounts> {
    let mut rows: Vec<YearCounts> = Vec::new();
    for day in sequence.days() {
        let year = day.date.year();
        if rows.last().map(|row| row.year) != Some(year) {
            rows.push(YearCounts {
                year,
                counts: [0; 7],
            });
        }
        if let Some(row) = rows.last_mut() {
            row.counts[day.category.ordinal() as usize] += 1;
        }
    }
    rows
}

const COLUMN_NAMES: [&str; 7] = [
    "sunday", "workday", "vacation", "pf", "pini", "pfim", "strike",
];

/// Per-year category counts as a polars table, one row per year in order.
pub fn summary_dataframe(sequence: &DaySequence) -> PolarsResult<DataFrame> {
    let counts: Vec<Expr> = COLUMN_NAMES
        .iter()
        .enumerate()
        .map(|(ordinal, name)| {
            col("value")
                .eq(lit(ordinal as i32))
                .sum()
                .cast(DataType::UInt32)
                .alias(*name)
        })
        .collect();
    sequence
        .to_dataframe()?
        .lazy()
        .group_by([col("ds").dt().year().alias("year")])
        .agg(counts)
        .sort(["year"], SortMultipleOptions::default())
        .collect()
}
