use crate::category::DayCategory;
use crate::reschedule::{RescheduleError, RescheduleReport, reschedule};
use crate::sequence::{BuildSummary, DaySequence, build_sequence};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

pub const VACATION_OFFSET_MAX: u32 = 60;
pub const RESCHEDULE_OFFSET_MAX: u32 = 30;
pub const MAKEUP_DAYS_MAX: u32 = 60;

/// The interactive controls of the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationParams {
    /// Days the 2025 vacation window is pushed back.
    #[serde(default)]
    pub vacation_offset: u32,
    /// Extra rounds on top of the make-up days.
    #[serde(default)]
    pub reschedule_offset: u32,
    /// Make-up days to relocate; defaults to the number of strike days.
    #[serde(default)]
    pub makeup_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRangeError {
    pub name: &'static str,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl fmt::Display for InputRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the allowed range {}..={}",
            self.name, self.value, self.min, self.max
        )
    }
}

impl std::error::Error for InputRangeError {}

fn check_range(name: &'static str, value: u32, max: u32) -> Result<(), InputRangeError> {
    if value > max {
        return Err(InputRangeError {
            name,
            value,
            min: 0,
            max,
        });
    }
    Ok(())
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), InputRangeError> {
        check_range("vacation_offset", self.vacation_offset, VACATION_OFFSET_MAX)?;
        check_range(
            "reschedule_offset",
            self.reschedule_offset,
            RESCHEDULE_OFFSET_MAX,
        )?;
        if let Some(makeup_days) = self.makeup_days {
            check_range("makeup_days", makeup_days, MAKEUP_DAYS_MAX)?;
        }
        Ok(())
    }

    /// Number of reschedule rounds for a calendar with `strike_days` strike days.
    pub fn reschedule_count(&self, strike_days: usize) -> usize {
        let makeup = self
            .makeup_days
            .map(|days| days as usize)
            .unwrap_or(strike_days);
        makeup + self.reschedule_offset as usize
    }
}

#[derive(Debug)]
pub enum SimulationError {
    InputRange(InputRangeError),
    Reschedule(RescheduleError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InputRange(err) => write!(f, "invalid input: {err}"),
            SimulationError::Reschedule(err) => write!(f, "reschedule failed: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InputRange(err) => Some(err),
            SimulationError::Reschedule(err) => Some(err),
        }
    }
}

impl From<InputRangeError> for SimulationError {
    fn from(value: InputRangeError) -> Self {
        Self::InputRange(value)
    }
}

impl From<RescheduleError> for SimulationError {
    fn from(value: RescheduleError) -> Self {
        Self::Reschedule(value)
    }
}

/// Original and rescheduled calendars for one set of parameters.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub params: SimulationParams,
    pub original: DaySequence,
    pub rescheduled: DaySequence,
    pub build: BuildSummary,
    pub reschedule_count: usize,
    pub report: RescheduleReport,
}

impl Simulation {
    pub fn strike_days(&self) -> usize {
        self.build.strike_days
    }

    /// Dates whose category differs between the two calendars.
    pub fn changed_days(&self) -> usize {
        self.original
            .categories()
            .iter()
            .zip(self.rescheduled.categories())
            .filter(|(a, b)| a != b)
            .count()
    }

    pub fn rescheduled_strike_days(&self) -> usize {
        self.rescheduled.count(DayCategory::Strike)
    }
}

/// Recompute both calendars from scratch.
pub fn simulate(params: &SimulationParams) -> Result<Simulation, SimulationError> {
    params.validate()?;
    let (original, build) = build_sequence(i64::from(params.vacation_offset));
    run(params, original, build)
}

/// Reschedule an already classified sequence, e.g. one loaded from CSV.
///
/// The vacation offset is not applied; semester boundaries are unknown and
/// the strike total is counted from the sequence itself.
pub fn simulate_sequence(
    params: &SimulationParams,
    original: DaySequence,
) -> Result<Simulation, SimulationError> {
    params.validate()?;
    let build = BuildSummary {
        boundaries: Vec::new(),
        strike_days: original.count(DayCategory::Strike),
    };
    run(params, original, build)
}

fn run(
    params: &SimulationParams,
    original: DaySequence,
    build: BuildSummary,
) -> Result<Simulation, SimulationError> {
    let reschedule_count = params.reschedule_count(build.strike_days);
    let (rescheduled, report) = reschedule(&original, reschedule_count)?;
    info!(
        vacation_offset = params.vacation_offset,
        reschedule_count,
        steps = report.steps,
        unreachable_lookaheads = report.unreachable_lookaheads,
        "simulation complete"
    );
    Ok(Simulation {
        params: *params,
        original,
        rescheduled,
        build,
        reschedule_count,
        report,
    })
}
