//! Interpretation of explorer status strings.

/// Result of a `checkverifystatus` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Still queued or compiling.
    Pending,
    /// Source matched the deployed bytecode.
    Verified,
    /// The explorer had the source already.
    AlreadyVerified,
    /// The explorer rejected the submission.
    Failed(String),
}

impl VerificationStatus {
    /// Parses the `result` text of a status response.
    ///
    /// Etherscan answers pending checks with `status: "0"`, so only the text is used.
    /// Text that is not a verification state (`Invalid API Key`, rate limits) gives `None`.
    pub fn from_result(result: &str) -> Option<Self> {
        let lower = result.to_ascii_lowercase();
        let status = if lower.starts_with("pending") {
            Self::Pending
        } else if lower.starts_with("pass") {
            Self::Verified
        } else if lower.contains("already verified") {
            Self::AlreadyVerified
        } else if lower.starts_with("fail") {
            Self::Failed(result.to_string())
        } else {
            return None;
        };
        Some(status)
    }
}

/// Result of a `verifysourcecode` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Accepted; poll this id.
    Queued(String),
    /// Nothing to do.
    AlreadyVerified,
}

/// Final state of a verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Verified by this submission.
    Verified {
        /// Submission id.
        guid: String,
    },
    /// The explorer already had the source.
    AlreadyVerified,
}
