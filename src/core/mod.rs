//! The computation core: attendance grid parsing, schedule resolution and
//! statistics. Everything here is synchronous, allocation-only and pure over
//! its inputs; persistence and transport live elsewhere.

pub mod analysis;
pub mod grid;
pub mod parser;
pub mod schedule;
pub mod stats;

pub use analysis::{missing_checkouts, week_timesheet, CheckoutAnomaly, TimesheetDay};
pub use grid::{Cell, Grid};
pub use parser::{parse, AttendanceBlock, ParsedReport};
pub use schedule::{CalculationContext, DaySchedule, WeeklySchedule};
pub use stats::{compute_batch, compute_statistics, EmployeeStatistics, GlobalStatistics};
