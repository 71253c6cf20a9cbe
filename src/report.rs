//! Leveled log entries for pipeline observability.
//!
//! The cleaner reports what it corrected through an injected [`CleaningLog`]
//! owned by the caller; nothing here is global state. Entries are collected
//! in memory (for summaries and tests) and optionally echoed to stderr.

use serde::{Deserialize, Serialize};

/// Log level for display and filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into() }
    }
}

/// Collector for pipeline log entries.
///
/// Created by the caller and passed into [`crate::clean::CampaignCleaner`],
/// which records every correction it makes. After the run the caller can
/// inspect, print, or serialize the entries.
#[derive(Debug, Default)]
pub struct CleaningLog {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl CleaningLog {
    /// A silent log that only collects entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that also echoes each entry to stderr as it arrives.
    pub fn with_stderr() -> Self {
        Self { entries: Vec::new(), echo: true }
    }

    /// Record an entry.
    pub fn log(&mut self, entry: LogEntry) {
        if self.echo {
            let prefix = match entry.level {
                LogLevel::Info => "   ",
                LogLevel::Success => "   ✓",
                LogLevel::Warning => "   ⚠️",
                LogLevel::Error => "   ❌",
            };
            eprintln!("{} {}", prefix, entry.message);
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::info(msg));
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::success(msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::warning(msg));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::error(msg));
    }

    /// All entries recorded so far.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries at a given level.
    pub fn entries_at(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }

    /// Number of warnings recorded.
    pub fn warning_count(&self) -> usize {
        self.entries_at(LogLevel::Warning).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_entries() {
        let mut log = CleaningLog::new();
        log.info("starting");
        log.warning("3 duplicates removed");
        log.success("done");

        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.warning_count(), 1);
        assert_eq!(log.entries()[1].message, "3 duplicates removed");
    }

    #[test]
    fn test_level_filter() {
        let mut log = CleaningLog::new();
        log.warning("a");
        log.warning("b");
        log.info("c");

        let warnings: Vec<_> = log.entries_at(LogLevel::Warning).collect();
        assert_eq!(warnings.len(), 2);
    }
}
