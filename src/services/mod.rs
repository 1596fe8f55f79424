pub mod import;
pub mod report_store;

pub use report_store::{ReportStore, StoredReport};
