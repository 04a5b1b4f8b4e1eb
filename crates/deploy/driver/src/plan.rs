//! What to deploy, with which arguments, and whether to verify it.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{
    Address, U256, address,
    utils::{Unit, UnitsError, parse_units},
};
use deploy_artifacts::{ContractArtifact, parse_constructor_args};

use crate::DeployError;

/// Token charged by `LabelFactory` for launches.
pub const DEFAULT_FEE_TOKEN: Address = address!("0xA61152baa58478e1089c000e84755f889aC3D442");

/// Uniswap V3 factory, same address on every chain it is deployed to.
pub const DEFAULT_UNISWAP_V3_FACTORY: Address =
    address!("0x1F98431c8aD98523631AE4a59f267346ea31F984");

const DEFAULT_LAUNCH_FEE_TOKENS: u64 = 500;

/// Confirmations to wait for before submitting a source for verification.
const DEFAULT_VERIFY_CONFIRMATIONS: u64 = 5;

/// Converts a decimal token amount to base units, e.g. `"500"` at 18 decimals.
pub fn parse_token_amount(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    parse_units(amount, decimals).map(|units| units.get_absolute())
}

/// Constructor arguments of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorArgs {
    /// Already typed values, in declaration order.
    Values(Vec<DynSolValue>),
    /// Strings coerced against the artifact's constructor.
    Raw(Vec<String>),
}

impl ConstructorArgs {
    /// Typed values for `artifact`.
    pub fn resolve(&self, artifact: &ContractArtifact) -> Result<Vec<DynSolValue>, DeployError> {
        match self {
            Self::Values(values) => Ok(values.clone()),
            Self::Raw(raw) => Ok(parse_constructor_args(&artifact.abi, raw)?),
        }
    }
}

/// Verification after deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyStep {
    /// Confirmations to wait for first, so the explorer has indexed the contract.
    pub confirmations: u64,
}

impl Default for VerifyStep {
    fn default() -> Self {
        Self { confirmations: DEFAULT_VERIFY_CONFIRMATIONS }
    }
}

/// One contract deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentPlan {
    /// Artifact name, bare or fully qualified.
    pub contract: String,
    /// Constructor arguments.
    pub args: ConstructorArgs,
    /// Verification step; skipped on local networks.
    pub verify: Option<VerifyStep>,
}

impl DeploymentPlan {
    /// Deploys any artifact with string arguments.
    pub fn generic(
        contract: impl Into<String>,
        args: Vec<String>,
        verify: Option<VerifyStep>,
    ) -> Self {
        Self { contract: contract.into(), args: ConstructorArgs::Raw(args), verify }
    }

    /// `LabelFactory(feeToken, launchFee, uniswapFactory, owner)`. Not verified.
    pub fn label_factory(params: &LabelFactoryParams, deployer: Address) -> Self {
        Self {
            contract: "LabelFactory".to_string(),
            args: ConstructorArgs::Values(params.constructor_args(deployer)),
            verify: None,
        }
    }

    /// `ArtChartFactory(onlyAllowOwner)`.
    pub fn art_chart_factory(params: &ArtChartFactoryParams) -> Self {
        Self {
            contract: "ArtChartFactory".to_string(),
            args: ConstructorArgs::Values(vec![DynSolValue::Bool(params.only_allow_owner)]),
            verify: params.verify,
        }
    }
}

/// Constructor inputs of `LabelFactory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFactoryParams {
    /// ERC-20 the launch fee is paid in.
    pub fee_token: Address,
    /// Launch fee in the fee token's base units.
    pub launch_fee: U256,
    /// Uniswap V3 factory pools are created on.
    pub uniswap_factory: Address,
    /// Initial owner; the deployer when unset.
    pub owner: Option<Address>,
}

impl Default for LabelFactoryParams {
    fn default() -> Self {
        Self {
            fee_token: DEFAULT_FEE_TOKEN,
            launch_fee: U256::from(DEFAULT_LAUNCH_FEE_TOKENS) * Unit::ETHER.wei(),
            uniswap_factory: DEFAULT_UNISWAP_V3_FACTORY,
            owner: None,
        }
    }
}

impl LabelFactoryParams {
    /// Arguments in declaration order.
    pub fn constructor_args(&self, deployer: Address) -> Vec<DynSolValue> {
        vec![
            DynSolValue::Address(self.fee_token),
            DynSolValue::Uint(self.launch_fee, 256),
            DynSolValue::Address(self.uniswap_factory),
            DynSolValue::Address(self.owner.unwrap_or(deployer)),
        ]
    }
}

/// Constructor input and verification of `ArtChartFactory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtChartFactoryParams {
    /// Restrict chart creation to the owner.
    pub only_allow_owner: bool,
    /// Verification step, on by default.
    pub verify: Option<VerifyStep>,
}

impl Default for ArtChartFactoryParams {
    fn default() -> Self {
        Self { only_allow_owner: false, verify: Some(VerifyStep::default()) }
    }
}
