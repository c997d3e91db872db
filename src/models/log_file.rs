use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day key of a log file. Always rendered as zero-padded `YYYY-MM-DD`, so
/// string order and chronological order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogDate(NaiveDate);

impl LogDate {
    /// Strict parse: anything that does not round-trip through `YYYY-MM-DD`
    /// is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 10 {
            return None;
        }
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
        let date = LogDate(date);
        (date.to_string() == s).then_some(date)
    }
}

impl fmt::Display for LogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for LogDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub file_name: String,
    pub date: LogDate,
    pub submission_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySubmissions {
    pub date: LogDate,
    pub submissions: Vec<serde_json::Value>,
}
