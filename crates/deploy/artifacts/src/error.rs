//! Artifact errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading artifacts or encoding constructor arguments.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No artifact with this name exists under the artifacts root.
    #[error(
        "artifact for `{name}` not found under {}; compile the contracts first",
        root.display()
    )]
    NotFound {
        /// Requested contract.
        name: String,
        /// Artifacts root.
        root: PathBuf,
    },

    /// A bare contract name matched several sources.
    #[error("`{name}` is ambiguous, use a fully qualified name: {}", candidates.join(", "))]
    Ambiguous {
        /// Requested contract.
        name: String,
        /// Fully qualified names that matched.
        candidates: Vec<String>,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file is not the JSON shape expected.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        /// File path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The contract has no creation code (interface or abstract contract).
    #[error("`{0}` has no bytecode; interfaces and abstract contracts cannot be deployed")]
    EmptyBytecode(String),

    /// The bytecode still contains library placeholders.
    #[error("`{contract}` needs linked libraries: {}", libraries.join(", "))]
    UnlinkedLibraries {
        /// Contract name.
        contract: String,
        /// Fully qualified library names.
        libraries: Vec<String>,
    },

    /// The bytecode string is not hex.
    #[error("`{contract}` has malformed bytecode: {reason}")]
    MalformedBytecode {
        /// Contract name.
        contract: String,
        /// Decoder message.
        reason: String,
    },

    /// Wrong number of constructor arguments.
    #[error("constructor expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Parameters in the ABI.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },

    /// An argument does not fit its parameter type.
    #[error("constructor argument #{index} `{name}` is not a valid {ty}: {reason}")]
    InvalidArgument {
        /// Zero-based position.
        index: usize,
        /// Parameter name from the ABI.
        name: String,
        /// Solidity type.
        ty: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A constructor parameter type could not be resolved.
    #[error(transparent)]
    Abi(#[from] alloy_dyn_abi::Error),
}
