//! Source verification of deployed contracts.

use alloy_primitives::{Address, Bytes};
use deploy_artifacts::{ArtifactStore, ContractArtifact};
use deploy_config::CompilerConfig;
use deploy_verify::{VerificationOutcome, VerificationRequest};
use serde::Serialize;
use tracing::warn;

use crate::DeployError;

/// Builds the verification payload for `artifact` at `address` from its build-info.
///
/// The build-info's compiler and settings are compared against `compilers` first.
/// Differences are logged as warnings only.
pub fn verification_request(
    store: &ArtifactStore,
    compilers: &CompilerConfig,
    artifact: &ContractArtifact,
    address: Address,
    constructor_args: Bytes,
) -> Result<VerificationRequest, DeployError> {
    let build_info = store.build_info(artifact)?;

    let (source, version) = (&artifact.source_name, &build_info.solc_version);
    for mismatch in compilers.check_build(source, version, build_info.settings()) {
        warn!(
            contract = %artifact.contract_name,
            build_info = %build_info.id,
            "Build does not match the compiler configuration: {mismatch}"
        );
    }

    Ok(VerificationRequest {
        address,
        contract_name: artifact.fully_qualified_name(),
        compiler_version: build_info.explorer_compiler_version(),
        standard_json_input: build_info.input,
        constructor_args,
    })
}

/// How a verification ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationState {
    /// Verified by this run.
    Verified,
    /// The explorer already had the source.
    AlreadyVerified,
    /// Not attempted: local network or no verification step.
    Skipped,
}

/// Verification part of a deployment report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Outcome.
    pub state: VerificationState,
    /// Explorer submission id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Explorer page of the contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

impl VerificationReport {
    /// A skipped verification.
    pub const fn skipped() -> Self {
        Self { state: VerificationState::Skipped, guid: None, explorer_url: None }
    }

    pub(crate) fn from_outcome(outcome: VerificationOutcome, explorer_url: Option<String>) -> Self {
        match outcome {
            VerificationOutcome::Verified { guid } => {
                Self { state: VerificationState::Verified, guid: Some(guid), explorer_url }
            }
            VerificationOutcome::AlreadyVerified => {
                Self { state: VerificationState::AlreadyVerified, guid: None, explorer_url }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use deploy_artifacts::test_utils::ArtifactFixture;
    use deploy_config::{CompilerProfile, TICK_MATH_SOURCE};

    use super::*;

    const ADDRESS: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    #[test]
    fn request_comes_from_build_info() {
        let fixture = ArtifactFixture::new();
        let store = fixture.store();
        let artifact = store.load("ArtChartFactory").unwrap();
        let args = artifact.encode_args(&[alloy_dyn_abi::DynSolValue::Bool(false)]).unwrap();

        let request =
            verification_request(&store, &CompilerConfig::default(), &artifact, ADDRESS, args)
                .unwrap();

        assert_eq!(request.address, ADDRESS);
        assert_eq!(request.contract_name, "contracts/ArtChartFactory.sol:ArtChartFactory");
        assert_eq!(request.compiler_version, "v0.8.24+commit.e11b9ed9");
        assert_eq!(request.standard_json_input["settings"]["viaIR"], true);
        assert_eq!(request.constructor_args, Bytes::from(vec![0u8; 32]));
    }

    #[test]
    fn mismatched_build_still_verifies() {
        let fixture = ArtifactFixture::new();
        let store = fixture.store();
        let artifact = store.load("LabelFactory").unwrap();
        let compilers = CompilerConfig {
            compilers: vec![CompilerProfile::plain("0.8.28")],
            overrides: [(TICK_MATH_SOURCE.to_string(), CompilerProfile::plain("0.7.6"))].into(),
        };

        let request =
            verification_request(&store, &compilers, &artifact, ADDRESS, Bytes::new()).unwrap();
        assert_eq!(request.compiler_version, "v0.8.24+commit.e11b9ed9");
    }

    #[test]
    fn report_serializes_for_json_output() {
        let report = VerificationReport::from_outcome(
            VerificationOutcome::Verified { guid: "abc".to_string() },
            Some("https://sepolia.etherscan.io/address/0x1#code".to_string()),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["state"], "verified");
        assert_eq!(json["guid"], "abc");

        let skipped = serde_json::to_value(VerificationReport::skipped()).unwrap();
        assert_eq!(skipped["state"], "skipped");
    }
}
