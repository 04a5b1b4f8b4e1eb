#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod args;
pub use args::LogArgs;

mod logging;
pub use logging::{FileLogConfig, LogConfig, LogFormat, LogRotation, level_filter};

mod subscriber;

mod runtime;
pub use runtime::{build_runtime, enable_backtraces};

mod styles;
pub use styles::help_styles;
