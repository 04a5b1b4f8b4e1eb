//! The payload of a source verification.

use alloy_primitives::{Address, Bytes, hex};
use serde_json::Value;

/// Everything the explorer needs to rebuild and compare a contract.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    /// Deployed contract.
    pub address: Address,
    /// `contracts/Foo.sol:Foo`.
    pub contract_name: String,
    /// `v0.8.24+commit.e11b9ed9`.
    pub compiler_version: String,
    /// solc standard-JSON input the contract was compiled from.
    pub standard_json_input: Value,
    /// ABI-encoded constructor arguments.
    pub constructor_args: Bytes,
}

impl VerificationRequest {
    /// Form fields of a `verifysourcecode` call, minus the routing parameters.
    pub(crate) fn form_fields(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", api_key.to_string()),
            ("contractaddress", self.address.to_string()),
            ("sourceCode", self.standard_json_input.to_string()),
            ("codeformat", "solidity-standard-json-input".to_string()),
            ("contractname", self.contract_name.clone()),
            ("compilerversion", self.compiler_version.clone()),
            // Field name as spelled by the Etherscan API.
            ("constructorArguements", hex::encode(&self.constructor_args)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use serde_json::json;

    use super::*;

    #[test]
    fn form_fields_carry_unprefixed_constructor_args() {
        let request = VerificationRequest {
            address: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            contract_name: "contracts/ArtChartFactory.sol:ArtChartFactory".to_string(),
            compiler_version: "v0.8.24+commit.e11b9ed9".to_string(),
            standard_json_input: json!({"language": "Solidity"}),
            constructor_args: Bytes::from(vec![0xab, 0xcd]),
        };

        let fields = request.form_fields("KEY");
        let get = |name: &str| fields.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str());

        assert_eq!(get("apikey"), Some("KEY"));
        assert_eq!(get("constructorArguements"), Some("abcd"));
        assert_eq!(get("sourceCode"), Some(r#"{"language":"Solidity"}"#));
        assert_eq!(get("contractaddress"), Some("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
    }
}
