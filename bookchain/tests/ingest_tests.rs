//! Integration tests for the CSV ingestion pipeline

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

use bookchain::prelude::*;

/// In-memory submitter standing in for a bound contract
struct RecordingSubmitter {
    fail_titles: Vec<String>,
    books: Mutex<Vec<BookInput>>,
}

impl RecordingSubmitter {
    fn new(fail_titles: &[&str]) -> Self {
        Self {
            fail_titles: fail_titles.iter().map(|s| s.to_string()).collect(),
            books: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookSubmitter for RecordingSubmitter {
    async fn estimate_fee(&self, _book: &BookInput) -> Result<U256> {
        Ok(U256::from(1_000_000u64))
    }

    async fn submit(&self, book: &BookInput) -> Result<B256> {
        if self.fail_titles.contains(&book.title) {
            return Err(BookChainError::Transaction(format!(
                "execution reverted for {}",
                book.title
            )));
        }
        self.books.lock().unwrap().push(book.clone());
        Ok(B256::from([0x42u8; 32]))
    }
}

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

const FULL_HEADER: &str = "Id,eTag,Title,Subtitle,Author,Publisher,Published-Date,Description,\
ISBN_10,ISBN_13,PageCount,Categories,Language,Sale_Info,Saleability,isEBook,epub,pdf,\
Access_Info,Viewability,PublicDomain";

#[tokio::test]
async fn test_full_header_row_conversion() {
    let csv = format!(
        "{FULL_HEADER}\n\
         1,tag1,Dune,,Frank Herbert,Chilton,1965-08-01,Desert planet epic,0441172717,\
         9780441172719,412,\"Sci-Fi, Classic\",en,FOR_SALE,FOR_SALE,True,True,False,\
         SAMPLE,PARTIAL,False\n"
    );
    let file = write_csv(&csv);
    let submitter = RecordingSubmitter::new(&[]);

    let report = ingest_csv(file.path(), &submitter).await.unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.succeeded, 1);

    let books = submitter.books.lock().unwrap();
    let book = &books[0];
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.categories, vec!["Sci-Fi", "Classic"]);
    assert_eq!(book.page_count, 412);
    assert!(book.is_ebook);
    assert!(book.epub);
    assert!(!book.pdf);
    assert!(!book.public_domain);
}

#[tokio::test]
async fn test_failed_rows_are_reported_not_fatal() {
    let csv = "Title,PageCount\nAlpha,100\nBeta,200\nGamma,300\n";
    let file = write_csv(csv);
    let submitter = RecordingSubmitter::new(&["Alpha", "Gamma"]);

    let report = ingest_csv(file.path(), &submitter).await.unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 2);
    assert!(!report.all_succeeded());

    let failed_titles: Vec<&str> = report.failures.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(failed_titles, vec!["Alpha", "Gamma"]);
    assert!(report.failures[0].error.contains("execution reverted"));
}

#[tokio::test]
async fn test_non_numeric_page_count_defaults_to_zero() {
    let csv = "Title,PageCount\nMystery,unknown\n";
    let file = write_csv(csv);
    let submitter = RecordingSubmitter::new(&[]);

    let report = ingest_csv(file.path(), &submitter).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(submitter.books.lock().unwrap()[0].page_count, 0);
}

#[tokio::test]
async fn test_empty_file_yields_empty_report() {
    let file = write_csv("Title,PageCount\n");
    let submitter = RecordingSubmitter::new(&[]);

    let report = ingest_csv(file.path(), &submitter).await.unwrap();
    assert_eq!(report.total, 0);
    assert!(report.all_succeeded());
    assert!(submitter.books.lock().unwrap().is_empty());
}
