use super::file::{format_date, parse_date};
use super::{PersistenceError, PersistenceResult, SequenceStore};
use crate::category::DayCategory;
use crate::sequence::{CalendarDay, DaySequence};
use rusqlite::{Connection, params};
use std::sync::Mutex;

pub struct SqliteSequenceStore {
    connection: Mutex<Connection>,
}

impl SqliteSequenceStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS day_sequence (
                name TEXT NOT NULL,
                ds TEXT NOT NULL,
                value INTEGER NOT NULL CHECK (value BETWEEN 0 AND 6),
                PRIMARY KEY (name, ds)
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl SequenceStore for SqliteSequenceStore {
    fn save_sequence(&self, name: &str, sequence: &DaySequence) -> PersistenceResult<()> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM day_sequence WHERE name = ?1", params![name])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO day_sequence (name, ds, value) VALUES (?1, ?2, ?3)")?;
            for day in sequence.days() {
                stmt.execute(params![
                    name,
                    format_date(day.date),
                    i64::from(day.category.ordinal())
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_sequence(&self, name: &str) -> PersistenceResult<Option<DaySequence>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT ds, value FROM day_sequence WHERE name = ?1 ORDER BY ds ASC")?;
        let rows = stmt.query_map(params![name], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut days = Vec::new();
        for row in rows {
            let (ds, value) = row?;
            let category = u8::try_from(value)
                .ok()
                .and_then(DayCategory::from_ordinal)
                .ok_or_else(|| {
                    PersistenceError::InvalidData(format!("invalid category value {value} for {ds}"))
                })?;
            days.push(CalendarDay {
                date: parse_date(&ds)?,
                category,
            });
        }

        if days.is_empty() {
            return Ok(None);
        }
        Ok(Some(DaySequence::from_days(&days)?))
    }
}
