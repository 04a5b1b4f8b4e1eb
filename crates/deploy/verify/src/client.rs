//! Etherscan-compatible verification API client.

use std::{fmt, time::Duration};

use alloy_primitives::Address;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::{
    Submission, VerificationOutcome, VerificationRequest, VerificationStatus, VerifyError,
};

/// Delay before each status check.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Status checks before giving up on a pending submission.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: Value,
}

impl ApiResponse {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }

    fn result_text(&self) -> String {
        match &self.result {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    fn into_error(self) -> VerifyError {
        let result = self.result_text();
        VerifyError::Api { message: self.message, result }
    }
}

/// Client for one explorer API and chain.
#[derive(Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    api_url: Url,
    api_key: String,
    chain_id: u64,
    poll_interval: Duration,
    max_attempts: u32,
}

impl fmt::Debug for EtherscanClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtherscanClient")
            .field("api_url", &self.api_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("poll_interval", &self.poll_interval)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl EtherscanClient {
    /// Creates a client for `chain_id` on the API at `api_url`.
    pub fn new(api_url: Url, api_key: impl Into<String>, chain_id: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key: api_key.into(),
            chain_id,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the delay between status checks.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Overrides the number of status checks.
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Whether the explorer already has source code for `address`.
    pub async fn is_verified(&self, address: Address) -> Result<bool, VerifyError> {
        let address = address.to_string();
        let response = self
            .get(&[("action", "getsourcecode"), ("address", address.as_str())])
            .await?;
        if !response.is_ok() {
            return Err(response.into_error());
        }

        let source = response
            .result
            .get(0)
            .and_then(|entry| entry.get("SourceCode"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(!source.is_empty())
    }

    /// Submits sources for verification.
    pub async fn submit(&self, request: &VerificationRequest) -> Result<Submission, VerifyError> {
        let response: ApiResponse = self
            .http
            .post(self.api_url.clone())
            .query(&[
                ("chainid", self.chain_id.to_string().as_str()),
                ("module", "contract"),
                ("action", "verifysourcecode"),
            ])
            .form(&request.form_fields(&self.api_key))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.is_ok() {
            return Ok(Submission::Queued(response.result_text()));
        }
        if response.result_text().to_ascii_lowercase().contains("already verified") {
            return Ok(Submission::AlreadyVerified);
        }
        Err(response.into_error())
    }

    /// Checks the state of a submission. Answers that are not a verification state are
    /// API errors.
    pub async fn check_status(&self, guid: &str) -> Result<VerificationStatus, VerifyError> {
        let response = self.get(&[("action", "checkverifystatus"), ("guid", guid)]).await?;
        VerificationStatus::from_result(&response.result_text())
            .ok_or_else(|| response.into_error())
    }

    /// Verifies a deployed contract: skip if known, submit, then poll until done.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerifyError> {
        if self.is_verified(request.address).await? {
            info!(address = %request.address, "Contract is already verified");
            return Ok(VerificationOutcome::AlreadyVerified);
        }

        let guid = match self.submit(request).await? {
            Submission::Queued(guid) => guid,
            Submission::AlreadyVerified => {
                info!(address = %request.address, "Contract is already verified");
                return Ok(VerificationOutcome::AlreadyVerified);
            }
        };
        info!(
            address = %request.address,
            contract = %request.contract_name,
            %guid,
            "Submitted source code for verification"
        );

        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.poll_interval).await;
            match self.check_status(&guid).await? {
                VerificationStatus::Pending => {
                    debug!(%guid, attempt, "Verification pending");
                }
                VerificationStatus::Verified => {
                    info!(address = %request.address, "Successfully verified contract");
                    return Ok(VerificationOutcome::Verified { guid });
                }
                VerificationStatus::AlreadyVerified => {
                    return Ok(VerificationOutcome::AlreadyVerified);
                }
                VerificationStatus::Failed(reason) => return Err(VerifyError::Failed(reason)),
            }
        }

        Err(VerifyError::Timeout { guid, attempts: self.max_attempts })
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<ApiResponse, VerifyError> {
        let chain_id = self.chain_id.to_string();
        let response = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("chainid", chain_id.as_str()),
                ("module", "contract"),
                ("apikey", self.api_key.as_str()),
            ])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}
