//! Book record model and CSV-to-ABI conversion

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::U256;
use serde::Deserialize;
use tracing::warn;

/// A raw CSV row. Column names match the export header; every column is
/// optional so partial exports still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookRecord {
    #[serde(default, rename = "Id")]
    pub id: String,
    #[serde(default, rename = "eTag")]
    pub etag: String,
    #[serde(default, rename = "Title")]
    pub title: String,
    #[serde(default, rename = "Subtitle")]
    pub subtitle: String,
    #[serde(default, rename = "Author")]
    pub author: String,
    #[serde(default, rename = "Publisher")]
    pub publisher: String,
    #[serde(default, rename = "Published-Date")]
    pub published_date: String,
    #[serde(default, rename = "Description")]
    pub description: String,
    #[serde(default, rename = "ISBN_10")]
    pub isbn_10: String,
    #[serde(default, rename = "ISBN_13")]
    pub isbn_13: String,
    #[serde(default, rename = "PageCount")]
    pub page_count: String,
    #[serde(default, rename = "Categories")]
    pub categories: String,
    #[serde(default, rename = "Language")]
    pub language: String,
    #[serde(default, rename = "Sale_Info")]
    pub sale_info: String,
    #[serde(default, rename = "Saleability")]
    pub saleability: String,
    #[serde(default, rename = "isEBook")]
    pub is_ebook: String,
    #[serde(default, rename = "epub")]
    pub epub: String,
    #[serde(default, rename = "pdf")]
    pub pdf: String,
    #[serde(default, rename = "Access_Info")]
    pub access_info: String,
    #[serde(default, rename = "Viewability")]
    pub viewability: String,
    #[serde(default, rename = "PublicDomain")]
    pub public_domain: String,
}

/// Typed contract-call input, one per CSV row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInput {
    pub id: String,
    pub etag: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub publisher: String,
    pub published_date: String,
    pub description: String,
    pub isbn_10: String,
    pub isbn_13: String,
    pub page_count: u64,
    pub categories: Vec<String>,
    pub language: String,
    pub sale_info: String,
    pub saleability: String,
    pub is_ebook: bool,
    pub epub: bool,
    pub pdf: bool,
    pub access_info: String,
    pub viewability: String,
    pub public_domain: bool,
}

impl From<BookRecord> for BookInput {
    fn from(record: BookRecord) -> Self {
        let page_count = parse_page_count(&record.title, &record.page_count);
        Self {
            id: record.id,
            etag: record.etag,
            title: record.title,
            subtitle: record.subtitle,
            author: record.author,
            publisher: record.publisher,
            published_date: record.published_date,
            description: record.description,
            isbn_10: record.isbn_10,
            isbn_13: record.isbn_13,
            page_count,
            categories: split_categories(&record.categories),
            language: record.language,
            sale_info: record.sale_info,
            saleability: record.saleability,
            is_ebook: parse_flag(&record.is_ebook),
            epub: parse_flag(&record.epub),
            pdf: parse_flag(&record.pdf),
            access_info: record.access_info,
            viewability: record.viewability,
            public_domain: parse_flag(&record.public_domain),
        }
    }
}

impl BookInput {
    /// Encode as the `addBook` ABI tuple. Field order matches the
    /// contract's struct definition.
    pub fn to_sol_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::String(self.id.clone()),
            DynSolValue::String(self.etag.clone()),
            DynSolValue::String(self.title.clone()),
            DynSolValue::String(self.subtitle.clone()),
            DynSolValue::String(self.author.clone()),
            DynSolValue::String(self.publisher.clone()),
            DynSolValue::String(self.published_date.clone()),
            DynSolValue::String(self.description.clone()),
            DynSolValue::String(self.isbn_10.clone()),
            DynSolValue::String(self.isbn_13.clone()),
            DynSolValue::Uint(U256::from(self.page_count), 256),
            DynSolValue::Array(
                self.categories
                    .iter()
                    .map(|c| DynSolValue::String(c.clone()))
                    .collect(),
            ),
            DynSolValue::String(self.language.clone()),
            DynSolValue::String(self.sale_info.clone()),
            DynSolValue::String(self.saleability.clone()),
            DynSolValue::Bool(self.is_ebook),
            DynSolValue::Bool(self.epub),
            DynSolValue::Bool(self.pdf),
            DynSolValue::String(self.access_info.clone()),
            DynSolValue::String(self.viewability.clone()),
            DynSolValue::Bool(self.public_domain),
        ])
    }
}

/// Decoded `getBook` result
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: u64,
}

/// Boolean columns use the literal string "True"; anything else is false.
fn parse_flag(raw: &str) -> bool {
    raw == "True"
}

/// Comma-split and trim the Categories column; empty column yields an
/// empty sequence.
fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

/// A non-numeric or empty PageCount does not fail the row; it defaults
/// to zero with a warning.
fn parse_page_count(title: &str, raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse() {
        Ok(count) => count,
        Err(_) => {
            warn!(title, page_count = raw, "non-numeric PageCount, defaulting to 0");
            0
        }
    }
}
