//! Verification errors.

use thiserror::Error;

/// Errors raised while talking to the verification API.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// No API key was configured for the explorer.
    #[error("ETHERSCAN_API_KEY is required to verify contracts on {0}")]
    MissingApiKey(String),

    /// The network has no explorer to verify against.
    #[error("network {0} has no block explorer configured")]
    NoExplorer(String),

    /// Transport or HTTP status failure.
    #[error("verification request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `status: "0"`.
    #[error("explorer API error: {message}: {result}")]
    Api {
        /// `message` field.
        message: String,
        /// `result` field.
        result: String,
    },

    /// The explorer compiled the source and rejected it.
    #[error("verification failed: {0}")]
    Failed(String),

    /// The explorer kept reporting the submission as pending.
    #[error("verification {guid} still pending after {attempts} status checks")]
    Timeout {
        /// Submission id.
        guid: String,
        /// Status checks performed.
        attempts: u32,
    },
}
