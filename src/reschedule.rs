//! Make-up day rescheduling.
//!
//! Each round scans the fixed window `SCAN_ORIGIN..=SCAN_CEILING` of the
//! previous round's output and pushes every day forward by the current
//! shift. Whenever the scanned day occupies a teaching slot, the shift is
//! recomputed as the distance to the next teaching slot in the output being
//! written. The shift survives between positions and between rounds; when no
//! teaching slot is found within `MAX_LOOKAHEAD` days the previous shift is
//! kept.

use crate::category::DayCategory;
use crate::sequence::DaySequence;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// First index eligible for relocation (2024-06-24, the day after the strike).
pub const SCAN_ORIGIN: usize = 175;
/// Last scanned index (2025-08-23).
pub const SCAN_CEILING: usize = 600;
/// Farthest distance searched for a teaching slot.
pub const MAX_LOOKAHEAD: usize = 39;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RescheduleError {
    /// A scan, lookahead or write index fell outside the sequence.
    SequenceBounds { index: usize, len: usize },
}

impl fmt::Display for RescheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RescheduleError::SequenceBounds { index, len } => write!(
                f,
                "reschedule index {index} is outside the day sequence (length {len})"
            ),
        }
    }
}

impl std::error::Error for RescheduleError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleReport {
    pub rounds: usize,
    /// Scan steps taken; every step performs exactly one write.
    pub steps: usize,
    /// Lookaheads that found no teaching slot and reused the previous shift.
    pub unreachable_lookaheads: usize,
}

#[derive(Debug, Clone)]
pub struct Rescheduler {
    origin: usize,
    ceiling: usize,
    max_lookahead: usize,
    shift: usize,
    report: RescheduleReport,
}

impl Default for Rescheduler {
    fn default() -> Self {
        Self::with_window(SCAN_ORIGIN, SCAN_CEILING, MAX_LOOKAHEAD)
    }
}

impl Rescheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(origin: usize, ceiling: usize, max_lookahead: usize) -> Self {
        Self {
            origin,
            ceiling,
            max_lookahead,
            shift: 1,
            report: RescheduleReport::default(),
        }
    }

    pub fn report(&self) -> RescheduleReport {
        self.report
    }

    /// Current shift; 1 until the first successful lookahead.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Run `rounds` rounds, each consuming the previous round's output.
    pub fn run(
        &mut self,
        sequence: &DaySequence,
        rounds: usize,
    ) -> Result<DaySequence, RescheduleError> {
        let mut categories = sequence.categories().to_vec();
        for _ in 0..rounds {
            categories = self.round(categories)?;
        }
        Ok(sequence.with_categories(categories))
    }

    /// One forward scan. `source` is only read; the result is a new vector.
    pub fn round(&mut self, source: Vec<DayCategory>) -> Result<Vec<DayCategory>, RescheduleError> {
        let len = source.len();
        let mut dest = source.clone();
        let mut steps = 0;
        let mut i = self.origin;

        while i <= self.ceiling {
            let current = *source
                .get(i)
                .ok_or(RescheduleError::SequenceBounds { index: i, len })?;

            if current.is_workday_compatible() {
                match self.next_teaching_slot(&dest, i)? {
                    Some(distance) => self.shift = distance,
                    None => {
                        self.report.unreachable_lookaheads += 1;
                        warn!(
                            index = i,
                            shift = self.shift,
                            max_lookahead = self.max_lookahead,
                            "no teaching slot within lookahead, reusing previous shift"
                        );
                    }
                }
            }

            let target = i + self.shift;
            let slot = dest
                .get_mut(target)
                .ok_or(RescheduleError::SequenceBounds { index: target, len })?;
            *slot = current;
            steps += 1;
            i = target;
        }

        self.report.rounds += 1;
        self.report.steps += steps;
        debug!(round = self.report.rounds, steps, shift = self.shift, "reschedule round done");
        Ok(dest)
    }

    fn next_teaching_slot(
        &self,
        dest: &[DayCategory],
        from: usize,
    ) -> Result<Option<usize>, RescheduleError> {
        for distance in 1..=self.max_lookahead {
            let index = from + distance;
            let category = dest.get(index).ok_or(RescheduleError::SequenceBounds {
                index,
                len: dest.len(),
            })?;
            if category.is_workday_compatible() {
                return Ok(Some(distance));
            }
        }
        Ok(None)
    }
}

/// Reschedule with the standard scan window.
pub fn reschedule(
    sequence: &DaySequence,
    rounds: usize,
) -> Result<(DaySequence, RescheduleReport), RescheduleError> {
    let mut rescheduler = Rescheduler::new();
    let rescheduled = rescheduler.run(sequence, rounds)?;
    Ok((rescheduled, rescheduler.report()))
}
