pub mod log_file;

pub use log_file::{DailySubmissions, FileSummary, LogDate};
