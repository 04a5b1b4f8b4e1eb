//! Logging flags shared by every deployer command.

use std::path::PathBuf;

use clap::{ArgAction, Args};

use crate::{FileLogConfig, LogConfig, LogFormat, LogRotation, level_filter};

/// Logging flags.
///
/// `-v` sets the level by count (`-v` error, `-vvv` info, `-vvvvv` trace); without it the
/// deployer logs at info.
#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Logging")]
pub struct LogArgs {
    /// Verbosity, repeat for more output.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        default_value = "3",
        env = "DEPLOYER_LOG_LEVEL",
        global = true
    )]
    pub verbosity: u8,

    /// Do not log to the terminal.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Terminal log format.
    #[arg(long, value_enum, default_value_t, env = "DEPLOYER_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Also write logs to files in this directory.
    #[arg(long, env = "DEPLOYER_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// File log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    pub log_file_format: LogFormat,

    /// File roll-over schedule.
    #[arg(long, value_enum, default_value_t, global = true)]
    pub log_rotation: LogRotation,
}

impl LogArgs {
    /// The logging setup these flags describe.
    pub fn config(&self) -> LogConfig {
        LogConfig {
            level: level_filter(self.verbosity),
            stdout: (!self.quiet).then_some(self.log_format),
            file: self.log_dir.clone().map(|directory| FileLogConfig {
                directory,
                format: self.log_file_format,
                rotation: self.log_rotation,
            }),
        }
    }
}
