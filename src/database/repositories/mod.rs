pub mod employee;
pub mod report;
pub mod schedule;

pub use employee::EmployeeRepository;
pub use report::ReportRepository;
pub use schedule::ScheduleRepository;
