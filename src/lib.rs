pub mod calendar;
pub mod category;
pub mod heatmap;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod persistence;
pub mod reschedule;
pub mod sequence;
pub mod simulation;
pub mod summary;

pub use calendar::{AcademicCalendar, DayRule, RuleSpan, classify, rules_for_year};
pub use category::{Classification, DayCategory};
pub use heatmap::{HeatmapConfig, render_year_svg, render_year_text};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteSequenceStore;
pub use persistence::{
    PersistenceError, SequenceStore, load_sequence_from_csv, load_sequence_from_json,
    read_sequence_csv, save_sequence_to_csv, save_sequence_to_json, write_sequence_csv,
};
pub use reschedule::{RescheduleError, RescheduleReport, Rescheduler, reschedule};
pub use sequence::{
    BoundaryKind, BuildSummary, CalendarDay, DaySequence, PERIOD_DAYS, SemesterBoundary,
    SequenceError, build_range, build_sequence, period_start,
};
pub use simulation::{
    InputRangeError, Simulation, SimulationError, SimulationParams, simulate, simulate_sequence,
};
pub use summary::{YearCounts, category_counts, summary_dataframe};
