//! Provider configuration and management

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{BookChainError, Result};

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// RPC endpoint URL (HTTP)
    pub rpc_url: String,
    /// Chain ID
    pub chain_id: u64,
    /// Bound on the transaction confirmation wait, in seconds
    #[serde(default = "default_confirm_timeout")]
    pub confirm_timeout_secs: u64,
}

fn default_confirm_timeout() -> u64 {
    120
}

/// Provider builder and manager
#[derive(Clone)]
pub struct ProviderManager {
    config: ProviderConfig,
    provider: DynProvider,
    signer: Option<Address>,
}

impl ProviderManager {
    /// Create a new read-only provider manager
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let url = parse_rpc_url(&config.rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self {
            config,
            provider,
            signer: None,
        })
    }

    /// Attach a signer; transactions sent through this provider are
    /// signed locally and paid for by the signer account.
    pub fn with_signer(mut self, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| BookChainError::Configuration(format!("Invalid private key: {}", e)))?;

        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url = parse_rpc_url(&self.config.rpc_url)?;
        self.provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased();
        self.signer = Some(address);

        Ok(self)
    }

    /// Get the provider
    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Get chain ID
    pub fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    /// Get provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Confirmation wait bound
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.config.confirm_timeout_secs)
    }

    /// Check connection to the RPC endpoint
    pub async fn check_connection(&self) -> Result<u64> {
        let block_number = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| BookChainError::Provider(format!("Failed to get block number: {}", e)))?;

        Ok(block_number)
    }

    /// Verify that contract code exists at the given address
    pub async fn ensure_code_at(&self, address: Address) -> Result<()> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| BookChainError::Provider(format!("Failed to get code: {}", e)))?;

        if code.is_empty() {
            return Err(BookChainError::Provider(format!(
                "No contract found at address: {}",
                address
            )));
        }

        Ok(())
    }

    /// Current network gas price, in wei
    pub async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| BookChainError::Provider(format!("Failed to get gas price: {}", e)))
    }

    /// Get signer address (if a signer is attached)
    pub fn signer_address(&self) -> Option<Address> {
        self.signer
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<reqwest::Url> {
    rpc_url
        .parse()
        .map_err(|e| BookChainError::Configuration(format!("Invalid RPC URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            confirm_timeout_secs: default_confirm_timeout(),
        }
    }

    #[test]
    fn test_provider_config_default_timeout() {
        let config = test_config();
        assert_eq!(config.confirm_timeout_secs, 120);
    }

    #[test]
    fn test_provider_manager_creation() {
        let manager = ProviderManager::new(test_config());
        assert!(manager.is_ok());
        assert!(manager.unwrap().signer_address().is_none());
    }

    #[test]
    fn test_invalid_rpc_url() {
        let config = ProviderConfig {
            rpc_url: "not a url".to_string(),
            chain_id: 1,
            confirm_timeout_secs: 30,
        };
        assert!(matches!(
            ProviderManager::new(config),
            Err(BookChainError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_private_key() {
        let manager = ProviderManager::new(test_config()).unwrap();
        assert!(matches!(
            manager.with_signer("0xnothex"),
            Err(BookChainError::Configuration(_))
        ));
    }

    #[test]
    fn test_with_signer_records_address() {
        // Well-known Hardhat/Anvil development key
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let manager = ProviderManager::new(test_config())
            .unwrap()
            .with_signer(key)
            .unwrap();
        assert!(manager.signer_address().is_some());
    }
}
