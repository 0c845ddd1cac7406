use super::{PersistenceError, PersistenceResult};
use crate::category::DayCategory;
use crate::sequence::{CalendarDay, DaySequence};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One `ds,value` row.
#[derive(Debug, Serialize, Deserialize)]
struct DayCsvRecord {
    ds: String,
    value: i64,
}

impl From<CalendarDay> for DayCsvRecord {
    fn from(day: CalendarDay) -> Self {
        Self {
            ds: format_date(day.date),
            value: i64::from(day.category.ordinal()),
        }
    }
}

impl DayCsvRecord {
    fn into_day(self) -> PersistenceResult<CalendarDay> {
        let date = parse_date(&self.ds)?;
        let category = u8::try_from(self.value)
            .ok()
            .and_then(DayCategory::from_ordinal)
            .ok_or_else(|| {
                PersistenceError::InvalidData(format!(
                    "invalid category value {} for {} (must be 0..=6)",
                    self.value, self.ds
                ))
            })?;
        Ok(CalendarDay { date, category })
    }
}

#[derive(Serialize, Deserialize)]
struct SequenceSnapshot {
    start: NaiveDate,
    values: Vec<DayCategory>,
}

impl From<&DaySequence> for SequenceSnapshot {
    fn from(sequence: &DaySequence) -> Self {
        Self {
            start: sequence.start(),
            values: sequence.categories().to_vec(),
        }
    }
}

pub fn write_sequence_csv<W: Write>(sequence: &DaySequence, writer: W) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for day in sequence.days() {
        writer.serialize(DayCsvRecord::from(day))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_sequence_csv<R: Read>(reader: R) -> PersistenceResult<DaySequence> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut days = Vec::new();
    for record in reader.deserialize::<DayCsvRecord>() {
        days.push(record?.into_day()?);
    }
    if days.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no days".into(),
        ));
    }
    Ok(DaySequence::from_days(&days)?)
}

pub fn save_sequence_to_csv<P: AsRef<Path>>(
    sequence: &DaySequence,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    write_sequence_csv(sequence, file)
}

pub fn load_sequence_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<DaySequence> {
    let file = File::open(path)?;
    read_sequence_csv(file)
}

pub fn save_sequence_to_json<P: AsRef<Path>>(
    sequence: &DaySequence,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &SequenceSnapshot::from(sequence))?;
    Ok(())
}

pub fn load_sequence_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<DaySequence> {
    let file = File::open(path)?;
    let snapshot: SequenceSnapshot = serde_json::from_reader(file)?;
    if snapshot.values.is_empty() {
        return Err(PersistenceError::InvalidData(
            "JSON snapshot contained no days".into(),
        ));
    }
    Ok(DaySequence::try_new(snapshot.start, snapshot.values)?)
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_ordinals() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        let sequence = DaySequence::new(
            start,
            vec![DayCategory::Workday, DayCategory::SemesterStart],
        );
        let mut buf = Vec::new();
        write_sequence_csv(&sequence, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "ds,value\n2024-02-20,1\n2024-02-21,4\n");
    }

    #[test]
    fn rejects_unknown_category() {
        let input = "ds,value\n2024-01-01,7\n";
        let err = read_sequence_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidData(_)));
    }

    #[test]
    fn rejects_gaps() {
        let input = "ds,value\n2024-01-01,2\n2024-01-03,1\n";
        let err = read_sequence_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistenceError::Sequence(_)));
    }

    #[test]
    fn rejects_bad_dates() {
        let input = "ds,value\n01/01/2024,2\n";
        let err = read_sequence_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidData(_)));
    }
}
