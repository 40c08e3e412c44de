//! Activity Log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

impl LogEntry {
    pub fn render(&self) -> String {
        let level_str = match self.level {
            LogLevel::Info => "🟢",
            LogLevel::Error => "🔴",
        };
        let code_str = self.code.as_deref().unwrap_or("*");
        let details_str = self.details.as_deref().unwrap_or("");

        format!(
            "{} {} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level_str,
            self.event,
            code_str,
            details_str
        )
    }
}

/// Lifecycle and failure log. Always echoes to stderr unless built with
/// [`ActivityLogger::file_only`]; optionally appends to a log file.
pub struct ActivityLogger {
    log_path: Option<PathBuf>,
    echo: bool,
}

impl ActivityLogger {
    /// Stderr only.
    pub fn stderr() -> Self {
        Self {
            log_path: None,
            echo: true,
        }
    }

    /// Stderr plus `~/.skuprobe/activity.log`.
    pub fn with_activity_file() -> crate::Result<Self> {
        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            crate::ProbeError::invalid_config("could not determine home directory for activity log")
        })?;
        let dir = user_dirs.home_dir().join(".skuprobe");
        fs::create_dir_all(&dir)?;

        Ok(Self {
            log_path: Some(dir.join("activity.log")),
            echo: true,
        })
    }

    /// Append to `path` without echoing.
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: Some(path.into()),
            echo: false,
        }
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn log(
        &self,
        level: LogLevel,
        code: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            code: code.map(|c| c.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };
        let line = entry.render();

        if self.echo {
            eprintln!("{line}");
        }
        if let Some(path) = &self.log_path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{line}")?;
        }

        Ok(())
    }

    pub fn info(&self, code: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Info, code, event, details)
    }

    pub fn error(&self, code: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Error, code, event, details)
    }
}
