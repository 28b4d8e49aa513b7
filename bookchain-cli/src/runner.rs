//! Command execution over the bookchain library

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use bookchain::prelude::*;

use crate::cli::Command;
use crate::config::AppConfig;

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(self, command: Command) -> Result<()> {
        match command {
            Command::Ingest { csv } => self.ingest(csv).await,
            Command::Add {
                title,
                author,
                publisher,
                published_date,
                isbn_10,
                isbn_13,
                page_count,
                categories,
                language,
                ebook,
                epub,
                pdf,
                public_domain,
            } => {
                let book = BookInput {
                    title,
                    author,
                    publisher,
                    published_date,
                    isbn_10,
                    isbn_13,
                    page_count,
                    categories: categories
                        .as_deref()
                        .map(|raw| {
                            raw.split(',')
                                .map(str::trim)
                                .filter(|c| !c.is_empty())
                                .map(String::from)
                                .collect()
                        })
                        .unwrap_or_default(),
                    language,
                    is_ebook: ebook,
                    epub,
                    pdf,
                    public_domain,
                    ..Default::default()
                };
                self.add(book).await
            }
            Command::Get { isbn } => self.get(isbn).await,
            Command::Exists { isbn } => self.exists(isbn).await,
            Command::Deploy => self.deploy().await,
        }
    }

    async fn ingest(&self, csv: PathBuf) -> Result<()> {
        let provider = self.provider(true).await?;
        let contract = self.contract(provider).await?;

        let report = ingest_csv(&csv, &contract)
            .await
            .context("CSV ingestion aborted")?;

        println!(
            "Ingestion finished: {} rows, {} succeeded, {} failed",
            report.total, report.succeeded, report.failed
        );
        for failure in &report.failures {
            warn!(
                row = failure.row,
                title = %failure.title,
                error = %failure.error,
                "row failed"
            );
        }

        Ok(())
    }

    async fn add(&self, book: BookInput) -> Result<()> {
        let provider = self.provider(true).await?;
        let contract = self.contract(provider).await?;

        let fee = contract.estimate_add_book_fee(&book).await?;
        info!(title = %book.title, fee_wei = %fee, "estimated gas cost");

        let tx_hash = contract.add_book(&book).await?;
        println!("Book added: {}, hash: {}", book.title, tx_hash);
        Ok(())
    }

    async fn get(&self, isbn: String) -> Result<()> {
        let provider = self.provider(false).await?;
        let contract = self.contract(provider).await?;

        let book = contract.get_book(&isbn).await?;
        println!(
            "{} by {} ({}, {})",
            book.title, book.author, book.publisher, book.year
        );
        Ok(())
    }

    async fn exists(&self, isbn: String) -> Result<()> {
        let provider = self.provider(false).await?;
        let contract = self.contract(provider).await?;

        let exists = contract.book_exists(&isbn).await?;
        println!("{}", exists);
        Ok(())
    }

    async fn deploy(&self) -> Result<()> {
        let provider = self.provider(true).await?;
        let artifact = self.artifact()?;

        let address = bookchain::deploy(&artifact, &provider)
            .await
            .context("Deployment failed")?;
        println!("BookChain deployed to: {}", address);
        Ok(())
    }

    /// Build the provider and verify connectivity. State-changing
    /// commands require a signer.
    async fn provider(&self, need_signer: bool) -> Result<Arc<ProviderManager>> {
        let provider_config = ProviderConfig {
            rpc_url: self.config.rpc_url.clone(),
            chain_id: self.config.chain_id,
            confirm_timeout_secs: self.config.confirm_timeout_secs,
        };

        let mut manager = ProviderManager::new(provider_config).context("Failed to create provider")?;

        if need_signer {
            let key = self
                .config
                .private_key
                .as_deref()
                .context("Missing required environment variable: PRIVATE_KEY")?;
            manager = manager.with_signer(key).context("Failed to add signer")?;
        }

        let block_number = manager
            .check_connection()
            .await
            .context("Cannot connect to the network")?;
        info!(block_number, "connected to network");

        Ok(Arc::new(manager))
    }

    /// Bind the deployed contract after the startup checks: code must
    /// exist at the address and the ABI must carry `addBook`.
    async fn contract(&self, provider: Arc<ProviderManager>) -> Result<BookChainClient> {
        let address: Address = self
            .config
            .contract_address
            .as_deref()
            .context("Missing required environment variable: CONTRACT_ADDRESS")?
            .parse()
            .context("Invalid contract address")?;

        provider.ensure_code_at(address).await?;
        info!(%address, "contract found at address");

        let artifact = self.artifact()?;
        let contract = BookChainClient::new(address, &artifact, provider)
            .context("Failed to create contract client")?;
        Ok(contract)
    }

    fn artifact(&self) -> Result<ContractArtifact> {
        ContractArtifact::load(&self.config.artifact_path).with_context(|| {
            format!(
                "Failed to load contract artifact from {}. Did you run 'npx hardhat compile'?",
                self.config.artifact_path.display()
            )
        })
    }
}
