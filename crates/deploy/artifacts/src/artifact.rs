//! Hardhat contract artifacts (`hh-sol-artifact-1`).

use std::collections::BTreeMap;

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Bytes, hex};
use serde::Deserialize;

use crate::{ArtifactError, encode_constructor_args};

/// A compiled contract as written by the build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// Contract name, e.g. `LabelFactory`.
    pub contract_name: String,
    /// Source path relative to the project, e.g. `contracts/LabelFactory.sol`.
    pub source_name: String,
    /// Contract ABI.
    pub abi: JsonAbi,
    /// Creation bytecode as hex. Left undecoded because unlinked bytecode carries
    /// `__$…$__` placeholders that are not hex.
    pub bytecode: String,
    /// Source path → library name → placeholder positions.
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl ContractArtifact {
    /// `source:Contract`, the form verifiers and the artifact store accept.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Decoded creation bytecode.
    pub fn creation_code(&self) -> Result<Bytes, ArtifactError> {
        if !self.link_references.is_empty() {
            let libraries = self
                .link_references
                .iter()
                .flat_map(|(source, libs)| libs.keys().map(move |lib| format!("{source}:{lib}")))
                .collect();
            return Err(ArtifactError::UnlinkedLibraries {
                contract: self.contract_name.clone(),
                libraries,
            });
        }

        let code = hex::decode(&self.bytecode).map_err(|err| ArtifactError::MalformedBytecode {
            contract: self.contract_name.clone(),
            reason: err.to_string(),
        })?;
        if code.is_empty() {
            return Err(ArtifactError::EmptyBytecode(self.contract_name.clone()));
        }
        Ok(code.into())
    }

    /// ABI-encoded constructor arguments for this contract.
    pub fn encode_args(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
        encode_constructor_args(&self.abi, args)
    }

    /// Creation bytecode followed by the encoded constructor arguments: the input of
    /// the deployment transaction.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
        let code = self.creation_code()?;
        let encoded = self.encode_args(args)?;
        let mut input = Vec::with_capacity(code.len() + encoded.len());
        input.extend_from_slice(&code);
        input.extend_from_slice(&encoded);
        Ok(input.into())
    }
}
