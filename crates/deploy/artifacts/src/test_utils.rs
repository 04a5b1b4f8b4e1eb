//! Fixture artifacts for tests in this and downstream crates.

use std::{fs, path::Path};

use tempfile::TempDir;

use crate::{ArtifactStore, ContractArtifact};

/// `LabelFactory(_feeToken, _launchFee, _uniswapFactory, initialOwner)`.
pub const LABEL_FACTORY_JSON: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "LabelFactory",
  "sourceName": "contracts/LabelFactory.sol",
  "abi": [
    {
      "type": "constructor",
      "stateMutability": "nonpayable",
      "inputs": [
        { "name": "_feeToken", "type": "address", "internalType": "address" },
        { "name": "_launchFee", "type": "uint256", "internalType": "uint256" },
        { "name": "_uniswapFactory", "type": "address", "internalType": "address" },
        { "name": "initialOwner", "type": "address", "internalType": "address" }
      ]
    },
    {
      "type": "function",
      "name": "launchFee",
      "stateMutability": "view",
      "inputs": [],
      "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
    }
  ],
  "bytecode": "0x60806040",
  "deployedBytecode": "0x6080",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

/// `ArtChartFactory(bool _onlyAllowOwner)`.
pub const ART_CHART_FACTORY_JSON: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "ArtChartFactory",
  "sourceName": "contracts/ArtChartFactory.sol",
  "abi": [
    {
      "type": "constructor",
      "stateMutability": "nonpayable",
      "inputs": [{ "name": "_onlyAllowOwner", "type": "bool", "internalType": "bool" }]
    }
  ],
  "bytecode": "0x6080604052",
  "deployedBytecode": "0x6080",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

/// Build-info both fixture artifacts point at.
pub const BUILD_INFO_JSON: &str = r#"{
  "_format": "hh-sol-build-info-1",
  "solcVersion": "0.8.24",
  "solcLongVersion": "0.8.24+commit.e11b9ed9",
  "input": {
    "language": "Solidity",
    "sources": {
      "contracts/ArtChartFactory.sol": { "content": "pragma solidity ^0.8.20;" },
      "contracts/LabelFactory.sol": { "content": "pragma solidity ^0.8.20;" }
    },
    "settings": {
      "optimizer": { "enabled": true, "runs": 200 },
      "viaIR": true,
      "outputSelection": { "*": { "*": ["abi", "evm.bytecode"] } }
    }
  },
  "output": {}
}"#;

/// Id (file stem) of [`BUILD_INFO_JSON`] inside an [`ArtifactFixture`].
pub const BUILD_INFO_ID: &str = "4f2e1b";

/// Parses an artifact constant.
pub fn artifact_from_json(json: &str) -> ContractArtifact {
    serde_json::from_str(json).expect("fixture artifact is valid")
}

/// A temporary `artifacts/` tree holding both fixture contracts and their build-info.
#[derive(Debug)]
pub struct ArtifactFixture {
    dir: TempDir,
}

impl Default for ArtifactFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactFixture {
    /// Writes the fixture tree.
    pub fn new() -> Self {
        let fixture = Self { dir: TempDir::new().expect("create temp dir") };
        let build_info_dir = fixture.path().join("build-info");
        fs::create_dir_all(&build_info_dir).expect("create build-info dir");
        fs::write(build_info_dir.join(format!("{BUILD_INFO_ID}.json")), BUILD_INFO_JSON)
            .expect("write build-info");

        fixture.write_artifact("contracts/LabelFactory.sol", "LabelFactory", LABEL_FACTORY_JSON);
        fixture.write_artifact(
            "contracts/ArtChartFactory.sol",
            "ArtChartFactory",
            ART_CHART_FACTORY_JSON,
        );
        fixture
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A store over the tree.
    pub fn store(&self) -> ArtifactStore {
        ArtifactStore::new(self.path())
    }

    /// Writes `<source>/<contract>.json` plus a `.dbg.json` pointing at the fixture build-info.
    pub fn write_artifact(&self, source: &str, contract: &str, json: &str) {
        let dir = self.path().join(source);
        fs::create_dir_all(&dir).expect("create artifact dir");
        fs::write(dir.join(format!("{contract}.json")), json).expect("write artifact");

        let depth = Path::new(source).components().count();
        let build_info = format!("{}build-info/{BUILD_INFO_ID}.json", "../".repeat(depth));
        let debug = format!(r#"{{"_format":"hh-sol-dbg-1","buildInfo":"{build_info}"}}"#);
        fs::write(dir.join(format!("{contract}.dbg.json")), debug).expect("write dbg file");
    }
}
