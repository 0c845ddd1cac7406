use chrono::{Datelike, NaiveDate, Weekday};
use makeup_calendar::{AcademicCalendar, Classification, DayCategory, classify, rules_for_year};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn new_year_2024_is_vacation_and_not_counted() {
    let c = classify(d(2024, 1, 1), 0);
    assert_eq!(c.category, DayCategory::Vacation);
    assert!(!c.counts_as_class_day);
}

#[test]
fn semester_start_counts_as_class_day() {
    let c = classify(d(2024, 2, 21), 0);
    assert_eq!(c.category, DayCategory::SemesterStart);
    assert!(c.counts_as_class_day);

    let end = classify(d(2024, 12, 7), 0);
    assert_eq!(end.category, DayCategory::SemesterEnd);
    assert!(end.counts_as_class_day);
}

#[test]
fn strike_overrides_overlapping_holiday() {
    // 2024-05-30 is also listed as a holiday; the strike rule comes first.
    let c = classify(d(2024, 5, 30), 0);
    assert_eq!(c.category, DayCategory::Strike);
    assert!(!c.counts_as_class_day);
}

#[test]
fn sunday_wins_over_every_rule() {
    // Sundays inside the January vacation and inside the strike.
    for date in [d(2024, 1, 7), d(2024, 5, 5), d(2024, 6, 23)] {
        assert_eq!(date.weekday(), Weekday::Sun);
        assert_eq!(classify(date, 0).category, DayCategory::Sunday);
    }
}

#[test]
fn pre_semester_break_is_not_counted() {
    for date in [d(2024, 6, 27), d(2024, 7, 2), d(2024, 12, 10)] {
        let c = classify(date, 0);
        assert_eq!(c.category, DayCategory::PreSemesterBreak);
        assert!(!c.counts_as_class_day);
    }
}

#[test]
fn day_after_strike_is_a_workday() {
    let c = classify(d(2024, 6, 24), 0);
    assert_eq!(c.category, DayCategory::Workday);
    assert!(c.counts_as_class_day);
}

#[test]
fn vacation_offset_moves_the_2025_window() {
    assert_eq!(classify(d(2025, 1, 1), 0).category, DayCategory::Vacation);
    assert_eq!(classify(d(2025, 1, 28), 0).category, DayCategory::Vacation);
    assert_eq!(classify(d(2025, 1, 29), 0).category, DayCategory::Workday);

    let shifted = classify(d(2025, 1, 1), 29);
    assert_eq!(shifted.category, DayCategory::Workday);
    assert!(shifted.counts_as_class_day);

    let cal = AcademicCalendar::new(60);
    assert_eq!(
        cal.vacation_window_2025(),
        Some((d(2025, 3, 2), d(2025, 3, 29)))
    );
    assert_eq!(cal.classify(d(2025, 3, 29)).category, DayCategory::Vacation);
}

#[test]
fn offset_does_not_touch_2024_rules() {
    assert_eq!(classify(d(2024, 1, 1), 60).category, DayCategory::Vacation);
    assert_eq!(classify(d(2024, 3, 1), 60).category, DayCategory::Workday);
}

#[test]
fn carnival_2025_is_vacation_regardless_of_offset() {
    for offset in [0, 29, 60] {
        assert_eq!(classify(d(2025, 2, 28), offset).category, DayCategory::Vacation);
        assert_eq!(classify(d(2025, 3, 3), offset).category, DayCategory::Vacation);
    }
}

#[test]
fn years_without_rules_are_workdays_or_sundays() {
    assert!(rules_for_year(2026).is_empty());
    let cal = AcademicCalendar::default();
    for date in d(2026, 1, 1).iter_days().take_while(|date| date.year() == 2026) {
        let expected = if date.weekday() == Weekday::Sun {
            DayCategory::Sunday
        } else {
            DayCategory::Workday
        };
        assert_eq!(cal.classify(date).category, expected, "{date}");
    }
}

#[test]
fn class_day_count_over_range() {
    let cal = AcademicCalendar::default();
    // Mon 2024-06-24 .. Wed 2024-06-26: two workdays plus the semester end.
    assert_eq!(cal.count_class_days(d(2024, 6, 24), d(2024, 6, 26)), 3);
    // Strike week.
    assert_eq!(cal.count_class_days(d(2024, 5, 6), d(2024, 5, 11)), 0);
    assert!(!cal.is_class_day(d(2024, 6, 27)));
}

#[test]
fn classification_is_deterministic_and_first_rule_wins() {
    for offset in [0, 29, 60] {
        for date in d(2024, 1, 1).iter_days().take_while(|date| date.year() <= 2025) {
            let first = classify(date, offset);
            assert_eq!(first, classify(date, offset), "{date} offset {offset}");

            let expected = if date.weekday() == Weekday::Sun {
                Classification::new(DayCategory::Sunday, false)
            } else {
                rules_for_year(date.year())
                    .iter()
                    .find(|rule| rule.matches(date, offset))
                    .map(|rule| rule.classification)
                    .unwrap_or(Classification::new(DayCategory::Workday, true))
            };
            assert_eq!(first, expected, "{date} offset {offset}");
        }
    }
}

#[test]
fn overlapping_rules_resolve_to_the_earliest_entry() {
    let mut overlaps = 0;
    for date in d(2024, 1, 1).iter_days().take_while(|date| date.year() <= 2025) {
        if date.weekday() == Weekday::Sun {
            continue;
        }
        let matching: Vec<_> = rules_for_year(date.year())
            .iter()
            .filter(|rule| rule.matches(date, 0))
            .collect();
        if matching.len() > 1 {
            overlaps += 1;
            assert_eq!(classify(date, 0), matching[0].classification, "{date}");
        }
    }
    // 2024-05-30 and 2024-05-31: strike over the listed holidays.
    assert_eq!(overlaps, 2);
}
