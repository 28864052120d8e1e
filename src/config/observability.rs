//! `[logging]` section
//!
//! Decides what reaches the log filter and where the optional JSON log file
//! lives. Bad values degrade to defaults instead of failing startup, since
//! logging is not up yet when they are read.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// How often the JSON log file starts over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    /// Unknown names mean daily
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Verbosity for deckview's own targets
    pub level: LevelFilter,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File names are `<prefix>.<date>.jsonl`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            file_enabled: false,
            file_dir: default_log_dir(),
            file_rotation: LogRotation::Daily,
            file_prefix: "deckview".to_string(),
        }
    }
}

/// `~/.local/share/deckview/logs` or the platform equivalent
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("deckview").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file
                .level
                .and_then(|level| LevelFilter::from_str(level.trim()).ok())
                .unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|rotation| LogRotation::parse(&rotation))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file
                .file_prefix
                .filter(|prefix| !prefix.trim().is_empty())
                .unwrap_or(defaults.file_prefix),
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub fn filter_directive(&self) -> String {
        format!("deckview={}", self.level)
    }

    /// Open the rolling JSON log file, or `None` when file logging is off
    pub fn open_file_appender(&self) -> Result<Option<RollingFileAppender>> {
        if !self.file_enabled {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.file_dir).with_context(|| {
            format!("Could not create log directory {}", self.file_dir.display())
        })?;

        RollingFileAppender::builder()
            .rotation(self.file_rotation.into())
            .filename_prefix(self.file_prefix.as_str())
            .filename_suffix("jsonl")
            .build(&self.file_dir)
            .map(Some)
            .with_context(|| format!("Could not open log file in {}", self.file_dir.display()))
    }
}
