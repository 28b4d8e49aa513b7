//! BookChain Loader Library
//!
//! A library for interacting with the BookChain registry contract,
//! built on top of Alloy 1.0.38.
//!
//! # Features
//!
//! - Provider management with local signing
//! - Contract binding from Hardhat artifacts or bare JSON ABI files
//! - Typed book records with CSV-to-ABI conversion
//! - Bulk CSV ingestion: one transaction per row, sequential, with
//!   per-row failure isolation and an aggregated report
//!
//! # Example
//!
//! ```rust,no_run
//! use bookchain::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Configure provider
//!     let provider_config = ProviderConfig {
//!         rpc_url: "http://127.0.0.1:8545".to_string(),
//!         chain_id: 31337,
//!         confirm_timeout_secs: 120,
//!     };
//!
//!     // Create provider manager with signer
//!     let provider = Arc::new(
//!         ProviderManager::new(provider_config)?
//!             .with_signer("0x...")?,
//!     );
//!
//!     // Bind the deployed contract
//!     let artifact = ContractArtifact::load("artifacts/contracts/BookChain.sol/BookChain.json")?;
//!     let contract = BookChainClient::new("0x...".parse().unwrap(), &artifact, provider)?;
//!
//!     // Bulk-load a CSV export
//!     let report = ingest_csv("searching.csv", &contract).await?;
//!     println!(
//!         "Ingestion done: {} succeeded, {} failed",
//!         report.succeeded, report.failed
//!     );
//!
//!     Ok(())
//! }
//! ```

pub mod book;
pub mod contract;
pub mod error;
pub mod ingest;
pub mod provider;

// Re-export commonly used types
pub use book::{BookInput, BookRecord, BookSummary};
pub use contract::{deploy, BookChainClient, ContractArtifact};
pub use error::{BookChainError, Result};
pub use ingest::{ingest_csv, ingest_reader, BookSubmitter, IngestReport, RowFailure};
pub use provider::{ProviderConfig, ProviderManager};

// Re-export Alloy types for convenience
pub use alloy_primitives::{Address, B256, U256};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::book::{BookInput, BookRecord, BookSummary};
    pub use crate::contract::{deploy, BookChainClient, ContractArtifact};
    pub use crate::error::{BookChainError, Result};
    pub use crate::ingest::{ingest_csv, ingest_reader, BookSubmitter, IngestReport, RowFailure};
    pub use crate::provider::{ProviderConfig, ProviderManager};
    pub use alloy_primitives::{Address, B256, U256};
}
