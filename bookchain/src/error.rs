//! Error types for the BookChain library

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, BookChainError>;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum BookChainError {
    /// Configuration error (bad URL, missing key, bad address)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider / connectivity error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Contract artifact loading error
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    /// Contract call error
    #[error("Contract call error: {0}")]
    ContractCall(String),

    /// Transaction error (submission or confirmation)
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Decoding error
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid book record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// CSV stream error; aborts the whole ingestion run
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
