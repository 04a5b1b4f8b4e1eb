//! Logging configuration.

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// How log events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Timestamp, level, target and message.
    #[default]
    Full,
    /// Level and message.
    Compact,
    /// One JSON object per line.
    Json,
    /// `key=value` pairs.
    Logfmt,
}

/// When the log file is rolled over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogRotation {
    /// Every hour.
    Hourly,
    /// Every day at midnight UTC.
    Daily,
    /// One file per run directory, never rolled.
    #[default]
    Never,
}

/// File output of a deployment log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogConfig {
    /// Directory holding `deployer.log*` files.
    pub directory: PathBuf,
    /// Rendering of file events.
    pub format: LogFormat,
    /// Roll-over schedule.
    pub rotation: LogRotation,
}

/// Resolved logging setup, see [`crate::LogArgs::config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level; `RUST_LOG` directives win over it.
    pub level: LevelFilter,
    /// Terminal format, `None` when quiet.
    pub stdout: Option<LogFormat>,
    /// File output, `None` without `--log-dir`.
    pub file: Option<FileLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: LevelFilter::INFO, stdout: Some(LogFormat::Full), file: None }
    }
}

/// Maps a `-v` count to a level: 0 is off, 1 error, 2 warn, 3 info, 4 debug, more is trace.
pub const fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        4 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::off(0, LevelFilter::OFF)]
    #[case::errors(1, LevelFilter::ERROR)]
    #[case::info(3, LevelFilter::INFO)]
    #[case::debug(4, LevelFilter::DEBUG)]
    #[case::saturates(9, LevelFilter::TRACE)]
    fn verbosity_maps_to_level(#[case] verbosity: u8, #[case] expected: LevelFilter) {
        assert_eq!(level_filter(verbosity), expected);
    }

    #[test]
    fn default_logs_info_to_terminal() {
        let config = LogConfig::default();
        assert_eq!(config.level, level_filter(3));
        assert_eq!(config.stdout, Some(LogFormat::Full));
        assert!(config.file.is_none());
    }
}
