//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookchain")]
#[command(about = "Load and query book records on the BookChain contract", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RPC endpoint URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// Deployed contract address
    #[arg(short, long, env = "CONTRACT_ADDRESS")]
    pub contract: Option<String>,

    /// Private key for signing transactions
    #[arg(short = 'k', long, env = "PRIVATE_KEY")]
    pub private_key: Option<String>,

    /// Chain ID
    #[arg(long, env = "CHAIN_ID", default_value = "31337")]
    pub chain_id: u64,

    /// Path to the compiled contract artifact (Hardhat JSON or bare ABI)
    #[arg(
        short,
        long,
        default_value = "artifacts/contracts/BookChain.sol/BookChain.json"
    )]
    pub artifact: PathBuf,

    /// Confirmation wait timeout in seconds
    #[arg(long, default_value = "120")]
    pub confirm_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bulk-load book rows from a CSV file, one transaction per row
    Ingest {
        /// Path to the CSV file
        #[arg(short, long)]
        csv: PathBuf,
    },

    /// Add a single book
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        author: String,

        #[arg(long, default_value = "")]
        publisher: String,

        #[arg(long, default_value = "")]
        published_date: String,

        #[arg(long, default_value = "")]
        isbn_10: String,

        #[arg(long, default_value = "")]
        isbn_13: String,

        #[arg(long, default_value = "0")]
        page_count: u64,

        /// Comma-separated category list
        #[arg(long)]
        categories: Option<String>,

        #[arg(long, default_value = "")]
        language: String,

        /// Mark the book as an e-book
        #[arg(long)]
        ebook: bool,

        /// Mark the book as available in EPUB
        #[arg(long)]
        epub: bool,

        /// Mark the book as available in PDF
        #[arg(long)]
        pdf: bool,

        /// Mark the book as public domain
        #[arg(long)]
        public_domain: bool,
    },

    /// Look up a book by ISBN
    Get {
        #[arg(short, long)]
        isbn: String,
    },

    /// Check whether a book with the given ISBN exists
    Exists {
        #[arg(short, long)]
        isbn: String,
    },

    /// Deploy the contract from the artifact bytecode
    Deploy,
}
