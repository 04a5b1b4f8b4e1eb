#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::VerifyError;

mod status;
pub use status::{Submission, VerificationOutcome, VerificationStatus};

mod request;
pub use request::VerificationRequest;

mod client;
pub use client::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, EtherscanClient};
