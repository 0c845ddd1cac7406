//! Calendar heatmaps: one grid per year, weeks as columns and weekdays
//! (Monday first) as rows, each cell filled with its category colour.

use crate::category::DayCategory;
use crate::sequence::{CalendarDay, DaySequence};
use crate::simulation::InputRangeError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapConfig {
    /// Fill colour per category ordinal.
    pub palette: [String; 7],
    pub month_labels: [String; 12],
    /// Monday first.
    pub day_labels: [String; 7],
    pub font_family: String,
    pub cell_size: u32,
    pub cell_gap: u32,
    pub original_title: String,
    pub rescheduled_title: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            palette: ["blue", "#DDD", "#618CCF", "yellow", "green", "#F1C196", "red"]
                .map(String::from),
            month_labels: [
                "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dec",
            ]
            .map(String::from),
            day_labels: ["Seg", "Ter", "Qua", "Qui", "Sex", "Sab", "Dom"].map(String::from),
            font_family: "Avenir, sans-serif".to_string(),
            cell_size: 14,
            cell_gap: 2,
            original_title: "Calendário Cefet/RJ original com a Greve".to_string(),
            rescheduled_title: "Calendário Cefet/RJ reposição".to_string(),
        }
    }
}

pub const CELL_SIZE_MAX: u32 = 64;
pub const CELL_GAP_MAX: u32 = 16;

impl HeatmapConfig {
    /// Checks the cell geometry, which is the only numeric input.
    pub fn validate(&self) -> Result<(), InputRangeError> {
        if !(1..=CELL_SIZE_MAX).contains(&self.cell_size) {
            return Err(InputRangeError {
                name: "cell_size",
                value: self.cell_size,
                min: 1,
                max: CELL_SIZE_MAX,
            });
        }
        if self.cell_gap > CELL_GAP_MAX {
            return Err(InputRangeError {
                name: "cell_gap",
                value: self.cell_gap,
                min: 0,
                max: CELL_GAP_MAX,
            });
        }
        Ok(())
    }

    pub fn color(&self, category: DayCategory) -> &str {
        &self.palette[category.ordinal() as usize]
    }
}

/// Column of `date` in its year's grid.
fn week_column(date: NaiveDate) -> u32 {
    let jan_first = date.with_ordinal(1).unwrap_or(date);
    (date.ordinal0() + jan_first.weekday().num_days_from_monday()) / 7
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const LEFT_MARGIN: u32 = 36;
const TOP_MARGIN: u32 = 44;

/// Render the days of `year` as a standalone SVG document.
pub fn render_year_svg(
    sequence: &DaySequence,
    year: i32,
    title: &str,
    config: &HeatmapConfig,
) -> String {
    let days: Vec<CalendarDay> = sequence.year(year).collect();
    // Geometry saturates so an unvalidated config cannot overflow.
    let pitch = config.cell_size.saturating_add(config.cell_gap);
    let weeks = days
        .last()
        .map(|day| week_column(day.date) + 1)
        .unwrap_or(53);
    let width = LEFT_MARGIN
        .saturating_add(weeks.saturating_mul(pitch))
        .saturating_add(config.cell_gap);
    let height = TOP_MARGIN
        .saturating_add(pitch.saturating_mul(7))
        .saturating_add(config.cell_gap);
    let font = escape(&config.font_family);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="16" font-family="{font}" font-size="14" text-anchor="middle">{} {year}</text>"#,
        width / 2,
        escape(title)
    );

    for (month_idx, label) in config.month_labels.iter().enumerate() {
        let Some(first) = NaiveDate::from_ymd_opt(year, month_idx as u32 + 1, 1) else {
            continue;
        };
        let x = LEFT_MARGIN.saturating_add(week_column(first).saturating_mul(pitch));
        let _ = writeln!(
            svg,
            r#"<text x="{x}" y="{}" font-family="{font}" font-size="10">{}</text>"#,
            TOP_MARGIN - 6,
            escape(label)
        );
    }

    for (row, label) in config.day_labels.iter().enumerate() {
        let y = TOP_MARGIN
            .saturating_add((row as u32).saturating_mul(pitch))
            .saturating_add(config.cell_size)
            .saturating_sub(3);
        let _ = writeln!(
            svg,
            r#"<text x="2" y="{y}" font-family="{font}" font-size="9">{}</text>"#,
            escape(label)
        );
    }

    for day in &days {
        let x = LEFT_MARGIN.saturating_add(week_column(day.date).saturating_mul(pitch));
        let y = TOP_MARGIN.saturating_add(
            day.date
                .weekday()
                .num_days_from_monday()
                .saturating_mul(pitch),
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{size}" height="{size}" fill="{fill}" data-date="{date}" data-value="{value}"/>"#,
            size = config.cell_size,
            fill = escape(config.color(day.category)),
            date = day.date,
            value = day.category.ordinal(),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn glyph(category: DayCategory) -> char {
    match category {
        DayCategory::Sunday => '.',
        DayCategory::Workday => '#',
        DayCategory::Vacation => 'v',
        DayCategory::PreSemesterBreak => 'p',
        DayCategory::SemesterStart => 'I',
        DayCategory::SemesterEnd => 'F',
        DayCategory::Strike => 'X',
    }
}

/// Terminal rendering of one year: a line per weekday, a glyph per day.
pub fn render_year_text(sequence: &DaySequence, year: i32, config: &HeatmapConfig) -> String {
    let days: Vec<CalendarDay> = sequence.year(year).collect();
    let weeks = days
        .last()
        .map(|day| week_column(day.date) as usize + 1)
        .unwrap_or(0);
    let mut grid = vec![vec![' '; weeks]; 7];
    for day in &days {
        let row = day.date.weekday().num_days_from_monday() as usize;
        grid[row][week_column(day.date) as usize] = glyph(day.category);
    }

    let mut header = vec![' '; weeks];
    for (month_idx, label) in config.month_labels.iter().enumerate() {
        if let Some(first) = NaiveDate::from_ymd_opt(year, month_idx as u32 + 1, 1) {
            let col = week_column(first) as usize;
            for (offset, ch) in label.chars().take(3).enumerate() {
                if let Some(cell) = header.get_mut(col + offset) {
                    *cell = ch;
                }
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{year}");
    let _ = writeln!(out, "    {}", header.into_iter().collect::<String>());
    for (row, label) in config.day_labels.iter().enumerate() {
        let line: String = grid[row].iter().collect();
        let _ = writeln!(out, "{label:<3} {}", line.trim_end());
    }
    let legend = DayCategory::ALL
        .iter()
        .map(|category| format!("{}={}", glyph(*category), category.code()))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "    {legend}");
    out
}
