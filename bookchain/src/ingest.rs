//! CSV bulk ingestion pipeline
//!
//! Reads book rows from a CSV file and submits one `addBook`
//! transaction per row, strictly in file order. A failing row is
//! logged and skipped; only a CSV stream error aborts the run.

use alloy_primitives::utils::format_ether;
use alloy_primitives::{B256, U256};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use tracing::{error, info};

use crate::book::{BookInput, BookRecord};
use crate::contract::BookChainClient;
use crate::error::Result;

/// Seam over the chain-bound operations, so the pipeline can run
/// against anything that accepts book submissions.
#[async_trait]
pub trait BookSubmitter: Send + Sync {
    /// Estimated fee for submitting the book, in wei
    async fn estimate_fee(&self, book: &BookInput) -> Result<U256>;

    /// Submit the book and wait for confirmation; returns the
    /// confirmed transaction hash.
    async fn submit(&self, book: &BookInput) -> Result<B256>;
}

#[async_trait]
impl BookSubmitter for BookChainClient {
    async fn estimate_fee(&self, book: &BookInput) -> Result<U256> {
        self.estimate_add_book_fee(book).await
    }

    async fn submit(&self, book: &BookInput) -> Result<B256> {
        self.add_book(book).await
    }
}

/// One failed row
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// 1-indexed data row number
    pub row: usize,
    pub title: String,
    pub error: String,
}

/// Aggregated outcome of one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
}

impl IngestReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Ingest a CSV file at the given path
pub async fn ingest_csv<S: BookSubmitter + ?Sized>(
    path: impl AsRef<Path>,
    submitter: &S,
) -> Result<IngestReport> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    ingest_records(reader, submitter).await
}

/// Ingest CSV rows from any reader
pub async fn ingest_reader<R, S>(reader: R, submitter: &S) -> Result<IngestReport>
where
    R: io::Read,
    S: BookSubmitter + ?Sized,
{
    ingest_records(csv::Reader::from_reader(reader), submitter).await
}

async fn ingest_records<R, S>(mut reader: csv::Reader<R>, submitter: &S) -> Result<IngestReport>
where
    R: io::Read,
    S: BookSubmitter + ?Sized,
{
    let mut report = IngestReport::default();

    for (index, row) in reader.deserialize::<BookRecord>().enumerate() {
        // A malformed record is a stream error and aborts the run.
        let record = row?;
        let book = BookInput::from(record);
        let row_number = index + 1;
        report.total += 1;

        info!(row = row_number, title = %book.title, "processing book");

        match attempt_row(submitter, &book).await {
            Ok(tx_hash) => {
                info!(title = %book.title, %tx_hash, "book added");
                report.succeeded += 1;
            }
            Err(e) => {
                error!(title = %book.title, error = %e, "failed to add book");
                report.failed += 1;
                report.failures.push(RowFailure {
                    row: row_number,
                    title: book.title.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed,
        "ingestion finished"
    );

    Ok(report)
}

async fn attempt_row<S: BookSubmitter + ?Sized>(submitter: &S, book: &BookInput) -> Result<B256> {
    let fee = submitter.estimate_fee(book).await?;
    info!(title = %book.title, fee_eth = %format_ether(fee), "estimated gas cost");

    submitter.submit(book).await
}
