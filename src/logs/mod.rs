pub mod naming;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppError;
use crate::models::{DailySubmissions, FileSummary, LogDate};

pub use naming::LogFileNaming;

/// Read-only view over a directory of per-day newline-delimited JSON logs.
///
/// Nothing is cached: every call re-reads the directory, so results always
/// reflect what the external writer has appended so far.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
    naming: LogFileNaming,
}

impl LogStore {
    pub fn new(dir: impl Into<PathBuf>, naming: LogFileNaming) -> Self {
        Self {
            dir: dir.into(),
            naming,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Summaries of every log file in the directory, newest day first.
    pub async fn list_files(&self) -> Result<Vec<FileSummary>, AppError> {
        self.ensure_dir().await?;

        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| self.dir_error(e))?;

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.dir_error(e))?
        {
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            if !file_name.ends_with(self.naming.suffix()) {
                continue;
            }
            let Some(date) = self.naming.parse_file_name(&file_name) else {
                tracing::debug!("Skipping {file_name}: name does not match log convention");
                continue;
            };

            let path = entry.path();
            if !tokio::fs::metadata(&path)
                .await
                .map_err(|e| read_error(&file_name, e))?
                .is_file()
            {
                tracing::debug!("Skipping {file_name}: not a regular file");
                continue;
            }

            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| read_error(&file_name, e))?;

            summaries.push(FileSummary {
                submission_count: record_lines(&content).count(),
                file_name,
                date,
            });
        }

        summaries.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });

        tracing::debug!("Listed {} log files in {}", summaries.len(), self.dir.display());
        Ok(summaries)
    }

    /// Every record logged on `date`, in append order. A single malformed
    /// line fails the whole read.
    pub async fn submissions_for(&self, date: &str) -> Result<DailySubmissions, AppError> {
        self.ensure_dir().await?;

        let date = LogDate::parse(date).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid date '{date}': expected YYYY-MM-DD"))
        })?;

        let file_name = self.naming.file_name(date);
        let path = self.dir.join(&file_name);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "No submission log found for date {date}"
                )));
            }
            Err(e) => return Err(read_error(&file_name, e)),
        };

        let submissions = parse_records(&file_name, &content)?;

        tracing::debug!("Read {} submissions from {file_name}", submissions.len());
        Ok(DailySubmissions { date, submissions })
    }

    async fn ensure_dir(&self) -> Result<(), AppError> {
        match tokio::fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(self.missing_dir()),
            Err(e) => Err(self.dir_error(e)),
        }
    }

    fn missing_dir(&self) -> AppError {
        AppError::NotFound(format!(
            "Logs directory not found: {}",
            self.dir.display()
        ))
    }

    fn dir_error(&self, err: std::io::Error) -> AppError {
        if err.kind() == std::io::ErrorKind::NotFound {
            self.missing_dir()
        } else {
            AppError::internal("Failed to read logs directory", err)
        }
    }
}

/// Non-blank lines, each expected to hold one JSON record.
fn record_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_records(file_name: &str, content: &str) -> Result<Vec<Value>, AppError> {
    record_lines(content)
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| {
                AppError::internal(
                    "Failed to parse submission log",
                    format!("{file_name} line {}: {e}", idx + 1),
                )
            })
        })
        .collect()
}

fn read_error(file_name: &str, err: std::io::Error) -> AppError {
    AppError::internal("Failed to read submission log", format!("{file_name}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_lines_skips_blank_and_whitespace_lines() {
        let content = "{\"a\":1}\n\n   \n{\"b\":2}\r\n\t\n";
        let lines: Vec<_> = record_lines(content).collect();
        assert_eq!(lines, vec![(0, "{\"a\":1}"), (3, "{\"b\":2}")]);
    }

    #[test]
    fn parse_records_reports_line_number() {
        let content = "{\"ok\":true}\n\nnot json\n";
        let err = parse_records("submissions-2024-01-01.jsonl", content).unwrap_err();
        match err {
            AppError::Internal { details, .. } => {
                assert!(details.contains("submissions-2024-01-01.jsonl line 3"), "{details}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
