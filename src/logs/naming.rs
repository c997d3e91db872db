use crate::models::LogDate;

/// Maps between a log day and its file name: `<prefix><YYYY-MM-DD><suffix>`.
#[derive(Debug, Clone)]
pub struct LogFileNaming {
    prefix: String,
    suffix: String,
}

impl LogFileNaming {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn file_name(&self, date: LogDate) -> String {
        format!("{}{date}{}", self.prefix, self.suffix)
    }

    /// Returns the day a file name belongs to, or `None` when the name does
    /// not follow the convention.
    pub fn parse_file_name(&self, name: &str) -> Option<LogDate> {
        let stem = name
            .strip_suffix(self.suffix.as_str())?
            .strip_prefix(self.prefix.as_str())?;
        LogDate::parse(stem)
    }
}
