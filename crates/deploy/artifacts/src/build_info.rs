//! Hardhat build-info files (`hh-sol-build-info-1`).

use serde::Deserialize;
use serde_json::Value;

/// The compiler run that produced a set of artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Build identifier (the file stem).
    #[serde(default)]
    pub id: String,
    /// Short compiler version, e.g. `0.8.24`.
    pub solc_version: String,
    /// Full compiler version, e.g. `0.8.24+commit.e11b9ed9`.
    pub solc_long_version: String,
    /// The solc standard-JSON input, as submitted to block-explorer verifiers.
    pub input: Value,
}

impl BuildInfo {
    /// The `settings` object of the compiler input.
    pub fn settings(&self) -> &Value {
        &self.input["settings"]
    }

    /// Version string in the `v0.8.24+commit.e11b9ed9` form explorers expect.
    pub fn explorer_compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version)
    }
}
