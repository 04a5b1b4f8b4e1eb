#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::ConfigError;

mod compiler;
pub use compiler::{
    BuildMismatch, CompilerConfig, CompilerProfile, OptimizerSettings, SolcSettings,
    TICK_MATH_SOURCE,
};

mod network;
pub use network::{ExplorerConfig, NetworkConfig, Networks, ResolvedNetwork, validate_rpc_url};

mod env;
pub use env::{DeployEnv, ETHERSCAN_API_KEY_VAR, PRIVATE_KEY_VAR, RPC_URL_VAR};

mod file;
pub use file::{DEFAULT_CONFIG_FILE, DeployConfig};
