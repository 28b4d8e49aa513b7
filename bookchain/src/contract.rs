//! BookChain contract binding over a JSON ABI artifact

use alloy::network::TransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use alloy_contract::{ContractInstance, Interface};
use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{DynProvider, Provider};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::book::{BookInput, BookSummary};
use crate::error::{BookChainError, Result};
use crate::provider::ProviderManager;

/// Compiled contract artifact: the ABI plus, for Hardhat-style
/// artifacts, the deployment bytecode.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub abi: JsonAbi,
    pub bytecode: Option<Bytes>,
}

impl ContractArtifact {
    /// Load an artifact from a JSON file. Accepts either a bare ABI
    /// array or a Hardhat artifact object with `abi` and `bytecode`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BookChainError::ArtifactLoad(format!(
                "Failed to read artifact file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    /// Parse an artifact from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| BookChainError::ArtifactLoad(format!("Invalid artifact JSON: {}", e)))?;

        if value.is_array() {
            let abi: JsonAbi = serde_json::from_value(value)
                .map_err(|e| BookChainError::ArtifactLoad(format!("Failed to parse ABI: {}", e)))?;
            return Ok(Self { abi, bytecode: None });
        }

        let abi_value = value
            .get("abi")
            .cloned()
            .ok_or_else(|| BookChainError::ArtifactLoad("Artifact has no 'abi' field".to_string()))?;
        let abi: JsonAbi = serde_json::from_value(abi_value)
            .map_err(|e| BookChainError::ArtifactLoad(format!("Failed to parse ABI: {}", e)))?;

        let bytecode = match value.get("bytecode").and_then(|b| b.as_str()) {
            Some(code) => Some(parse_bytecode(code)?),
            None => None,
        };

        Ok(Self { abi, bytecode })
    }

    /// Fail fast if the ABI does not expose the given function
    pub fn ensure_function(&self, name: &str) -> Result<&Function> {
        self.abi.function(name).and_then(|f| f.first()).ok_or_else(|| {
            BookChainError::ArtifactLoad(format!("Contract ABI does not include '{}' method", name))
        })
    }

    /// List all function names in the ABI
    pub fn function_names(&self) -> Vec<String> {
        self.abi.functions().map(|f| f.name.clone()).collect()
    }
}

fn parse_bytecode(code: &str) -> Result<Bytes> {
    let stripped = code.strip_prefix("0x").unwrap_or(code);
    let bytes = hex::decode(stripped)
        .map_err(|e| BookChainError::ArtifactLoad(format!("Invalid bytecode hex: {}", e)))?;
    Ok(Bytes::from(bytes))
}

/// A BookChain contract bound to an address and a provider
pub struct BookChainClient {
    address: Address,
    instance: ContractInstance<DynProvider>,
    provider: Arc<ProviderManager>,
}

impl BookChainClient {
    /// Bind the contract. Verifies up front that the ABI carries the
    /// `addBook` method.
    pub fn new(
        address: Address,
        artifact: &ContractArtifact,
        provider: Arc<ProviderManager>,
    ) -> Result<Self> {
        artifact.ensure_function("addBook")?;

        let interface = Interface::new(artifact.abi.clone());
        let instance = ContractInstance::new(address, provider.provider(), interface);

        Ok(Self {
            address,
            instance,
            provider,
        })
    }

    /// Get contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Estimate the fee for an `addBook` call: gas estimate times the
    /// current gas price, in wei.
    pub async fn estimate_add_book_fee(&self, book: &BookInput) -> Result<U256> {
        let args = [book.to_sol_value()];
        let call = self
            .instance
            .function("addBook", &args)
            .map_err(|e| BookChainError::ContractCall(format!("Failed to create call: {}", e)))?;

        let gas = call
            .estimate_gas()
            .await
            .map_err(|e| BookChainError::ContractCall(format!("Gas estimation failed: {}", e)))?;
        let price = self.provider.gas_price().await?;

        Ok(U256::from(gas) * U256::from(price))
    }

    /// Submit an `addBook` transaction and wait for confirmation.
    /// The wait is bounded by the provider's confirmation timeout.
    pub async fn add_book(&self, book: &BookInput) -> Result<B256> {
        let args = [book.to_sol_value()];
        let call = self
            .instance
            .function("addBook", &args)
            .map_err(|e| BookChainError::ContractCall(format!("Failed to create call: {}", e)))?;

        let pending = call
            .send()
            .await
            .map_err(|e| BookChainError::Transaction(format!("Transaction failed: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "transaction submitted");

        let receipt = pending
            .with_timeout(Some(self.provider.confirm_timeout()))
            .get_receipt()
            .await
            .map_err(|e| BookChainError::Transaction(format!("Failed to get receipt: {}", e)))?;

        Ok(receipt.transaction_hash)
    }

    /// Look up a book by ISBN
    pub async fn get_book(&self, isbn: &str) -> Result<BookSummary> {
        let args = [DynSolValue::String(isbn.to_string())];
        let call = self
            .instance
            .function("getBook", &args)
            .map_err(|e| BookChainError::ContractCall(format!("Failed to create call: {}", e)))?;

        let result = call
            .call()
            .await
            .map_err(|e| BookChainError::ContractCall(format!("Function call failed: {}", e)))?;

        if result.len() != 4 {
            return Err(BookChainError::Decoding(format!(
                "getBook returned {} values, expected 4",
                result.len()
            )));
        }

        Ok(BookSummary {
            title: decode::as_string(&result[0])?,
            author: decode::as_string(&result[1])?,
            publisher: decode::as_string(&result[2])?,
            year: decode::as_u64(&result[3])?,
        })
    }

    /// Check whether a book with the given ISBN exists
    pub async fn book_exists(&self, isbn: &str) -> Result<bool> {
        let args = [DynSolValue::String(isbn.to_string())];
        let call = self
            .instance
            .function("bookExists", &args)
            .map_err(|e| BookChainError::ContractCall(format!("Failed to create call: {}", e)))?;

        let result = call
            .call()
            .await
            .map_err(|e| BookChainError::ContractCall(format!("Function call failed: {}", e)))?;

        result
            .first()
            .ok_or_else(|| BookChainError::Decoding("bookExists returned no value".to_string()))
            .and_then(decode::as_bool)
    }
}

/// Deploy the contract from artifact bytecode and return its address
pub async fn deploy(artifact: &ContractArtifact, provider: &ProviderManager) -> Result<Address> {
    let bytecode = artifact.bytecode.clone().ok_or_else(|| {
        BookChainError::ArtifactLoad("Artifact has no bytecode to deploy".to_string())
    })?;

    let tx = TransactionRequest::default().with_deploy_code(bytecode);
    let pending = provider
        .provider()
        .send_transaction(tx)
        .await
        .map_err(|e| BookChainError::Transaction(format!("Deployment failed: {}", e)))?;

    let receipt = pending
        .with_timeout(Some(provider.confirm_timeout()))
        .get_receipt()
        .await
        .map_err(|e| BookChainError::Transaction(format!("Failed to get receipt: {}", e)))?;

    receipt.contract_address.ok_or_else(|| {
        BookChainError::Transaction("Deployment receipt carries no contract address".to_string())
    })
}

/// Helpers for decoding dynamic ABI return values
pub(crate) mod decode {
    use super::*;

    pub fn as_string(value: &DynSolValue) -> Result<String> {
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| BookChainError::Decoding("Expected string value".to_string()))
    }

    pub fn as_bool(value: &DynSolValue) -> Result<bool> {
        value
            .as_bool()
            .ok_or_else(|| BookChainError::Decoding("Expected bool value".to_string()))
    }

    pub fn as_u64(value: &DynSolValue) -> Result<u64> {
        let (uint, _) = value
            .as_uint()
            .ok_or_else(|| BookChainError::Decoding("Expected uint value".to_string()))?;
        u64::try_from(uint)
            .map_err(|_| BookChainError::Decoding("Uint value out of u64 range".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE_ABI: &str = r#"[
        {
            "type": "function",
            "name": "addBook",
            "inputs": [
                {
                    "name": "book",
                    "type": "tuple",
                    "components": [
                        {"name": "id", "type": "string"},
                        {"name": "eTag", "type": "string"},
                        {"name": "title", "type": "string"},
                        {"name": "subtitle", "type": "string"},
                        {"name": "author", "type": "string"},
                        {"name": "publisher", "type": "string"},
                        {"name": "publishedDate", "type": "string"},
                        {"name": "description", "type": "string"},
                        {"name": "ISBN_10", "type": "string"},
                        {"name": "ISBN_13", "type": "string"},
                        {"name": "pageCount", "type": "uint256"},
                        {"name": "categories", "type": "string[]"},
                        {"name": "language", "type": "string"},
                        {"name": "saleInfo", "type": "string"},
                        {"name": "saleability", "type": "string"},
                        {"name": "isEBook", "type": "bool"},
                        {"name": "epub", "type": "bool"},
                        {"name": "pdf", "type": "bool"},
                        {"name": "accessInfo", "type": "string"},
                        {"name": "viewability", "type": "string"},
                        {"name": "publicDomain", "type": "bool"}
                    ]
                }
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ]"#;

    #[test]
    fn test_bare_abi_array() {
        let artifact = ContractArtifact::from_json(BARE_ABI).unwrap();
        assert!(artifact.bytecode.is_none());
        assert!(artifact.ensure_function("addBook").is_ok());
        assert!(artifact.ensure_function("burnBook").is_err());
    }

    #[test]
    fn test_hardhat_artifact_object() {
        let raw = format!(r#"{{"abi": {}, "bytecode": "0x6080"}}"#, BARE_ABI);
        let artifact = ContractArtifact::from_json(&raw).unwrap();
        assert_eq!(artifact.bytecode, Some(Bytes::from(vec![0x60, 0x80])));
        assert_eq!(artifact.function_names(), vec!["addBook".to_string()]);
    }

    #[test]
    fn test_artifact_without_abi_field() {
        let result = ContractArtifact::from_json(r#"{"bytecode": "0x00"}"#);
        assert!(matches!(result, Err(BookChainError::ArtifactLoad(_))));
    }

    #[test]
    fn test_invalid_bytecode_hex() {
        let raw = format!(r#"{{"abi": {}, "bytecode": "0xzz"}}"#, BARE_ABI);
        assert!(matches!(
            ContractArtifact::from_json(&raw),
            Err(BookChainError::ArtifactLoad(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ContractArtifact::load("nonexistent.json");
        assert!(matches!(result, Err(BookChainError::ArtifactLoad(_))));
    }
}
