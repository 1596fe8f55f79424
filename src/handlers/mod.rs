pub mod dashboard;
pub mod employees;
pub mod reports;
pub mod schedules;
pub mod shared;
