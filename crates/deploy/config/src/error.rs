//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or resolving deployment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested network is not in the registry.
    #[error("unknown network `{name}` (known networks: {known})")]
    UnknownNetwork {
        /// Requested name.
        name: String,
        /// Comma separated registry names.
        known: String,
    },

    /// A required environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The RPC endpoint is not an http(s) URL with a host.
    #[error("invalid RPC URL `{0}`: expected an http or https URL with a host")]
    InvalidRpcUrl(String),

    /// A network defined in the project file lacks a field with no built-in fallback.
    #[error("network `{name}` is missing `{field}` and is not a built-in network")]
    IncompleteNetwork {
        /// Network name.
        name: String,
        /// Missing field.
        field: &'static str,
    },

    /// The project file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The project file is not valid YAML for the expected schema.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}
