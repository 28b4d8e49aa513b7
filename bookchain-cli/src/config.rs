//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;

/// Resolved application configuration, built once at startup and
/// passed into the runner. No ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub rpc_url: String,
    pub contract_address: Option<String>,
    pub private_key: Option<String>,
    pub chain_id: u64,
    pub artifact_path: PathBuf,
    pub confirm_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            rpc_url: cli.rpc_url.clone(),
            contract_address: cli.contract.clone(),
            private_key: cli.private_key.clone(),
            chain_id: cli.chain_id,
            artifact_path: cli.artifact.clone(),
            confirm_timeout_secs: cli.confirm_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "bookchain",
            "--rpc-url",
            "http://10.0.0.1:8545",
            "--chain-id",
            "1337",
            "--confirm-timeout",
            "30",
            "deploy",
        ])
        .unwrap();

        let config = AppConfig::from_cli(&cli);
        assert_eq!(config.rpc_url, "http://10.0.0.1:8545");
        assert_eq!(config.chain_id, 1337);
        assert_eq!(config.confirm_timeout_secs, 30);
    }
}
