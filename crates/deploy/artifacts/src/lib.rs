#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::ArtifactError;

mod artifact;
pub use artifact::ContractArtifact;

mod build_info;
pub use build_info::BuildInfo;

mod constructor;
pub use constructor::{constructor_params, encode_constructor_args, parse_constructor_args};

mod store;
pub use store::{ArtifactStore, DEFAULT_ARTIFACTS_DIR};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
