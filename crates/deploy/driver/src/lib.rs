#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::DeployError;

mod signer;
pub use signer::{DEV_PRIVATE_KEY, resolve_signer};

mod request;
pub use request::DeployRequest;

mod client;
pub use client::{DEFAULT_CONFIRMATION_POLL_INTERVAL, DeployClient, Deployment, confirmations_at};

mod plan;
pub use plan::{
    ArtChartFactoryParams, ConstructorArgs, DEFAULT_FEE_TOKEN, DEFAULT_UNISWAP_V3_FACTORY,
    DeploymentPlan, LabelFactoryParams, VerifyStep, parse_token_amount,
};

mod verification;
pub use verification::{VerificationReport, VerificationState, verification_request};

mod runner;
pub use runner::{DeploymentReport, DeploymentRunner};
