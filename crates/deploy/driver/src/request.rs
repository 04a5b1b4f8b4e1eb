//! Contract-creation transactions.

use alloy_dyn_abi::DynSolValue;
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes};
use alloy_rpc_types_eth::TransactionRequest;
use deploy_artifacts::ContractArtifact;

use crate::DeployError;

/// A contract to create and the exact input of its creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Fully qualified contract name.
    pub contract: String,
    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    pub code: Bytes,
}

impl DeployRequest {
    /// Builds the request for `artifact` with `args` in declaration order.
    pub fn new(artifact: &ContractArtifact, args: &[DynSolValue]) -> Result<Self, DeployError> {
        Ok(Self { contract: artifact.fully_qualified_name(), code: artifact.deploy_code(args)? })
    }

    /// The creation transaction sent from `from`. Nonce, gas and fees are left to the
    /// provider's fillers.
    pub fn transaction(&self, from: Address) -> TransactionRequest {
        TransactionRequest::default().from(from).with_deploy_code(self.code.clone())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{TxKind, U256, address, hex};
    use deploy_artifacts::test_utils::{
        ART_CHART_FACTORY_JSON, LABEL_FACTORY_JSON, artifact_from_json,
    };

    use super::*;

    #[test]
    fn creation_input_is_bytecode_then_args_in_order() {
        let artifact = artifact_from_json(LABEL_FACTORY_JSON);
        let owner = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let args = [
            DynSolValue::Address(address!("0xA61152baa58478e1089c000e84755f889aC3D442")),
            DynSolValue::Uint(U256::from(500), 256),
            DynSolValue::Address(address!("0x1F98431c8aD98523631AE4a59f267346ea31F984")),
            DynSolValue::Address(owner),
        ];

        let request = DeployRequest::new(&artifact, &args).unwrap();
        let tx = request.transaction(owner);

        assert_eq!(tx.to, Some(TxKind::Create));
        assert_eq!(tx.from, Some(owner));

        let input = tx.input.input().unwrap();
        assert_eq!(input.len(), 4 + 4 * 32);
        assert_eq!(&input[..4], hex!("60806040"));
        assert_eq!(&input[4 + 12..4 + 32], hex!("A61152baa58478e1089c000e84755f889aC3D442"));
        assert_eq!(U256::from_be_slice(&input[36..68]), U256::from(500));
        assert_eq!(&input[68 + 12..100], hex!("1F98431c8aD98523631AE4a59f267346ea31F984"));
        assert_eq!(&input[100 + 12..132], owner.as_slice());
    }

    #[test]
    fn bool_constructor_arg_is_one_word() {
        let artifact = artifact_from_json(ART_CHART_FACTORY_JSON);
        let request = DeployRequest::new(&artifact, &[DynSolValue::Bool(true)]).unwrap();

        assert_eq!(request.contract, "contracts/ArtChartFactory.sol:ArtChartFactory");
        assert_eq!(request.code.len(), 5 + 32);
        assert_eq!(request.code[request.code.len() - 1], 1);
    }

    #[test]
    fn wrong_argument_count_is_rejected_before_sending() {
        let artifact = artifact_from_json(ART_CHART_FACTORY_JSON);
        let err = DeployRequest::new(&artifact, &[]).unwrap_err();
        assert!(matches!(err, DeployError::Artifact(_)));
    }
}
