//! Book record model and request/response shapes.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

/// Length of generated book identifiers
pub const BOOK_ID_LEN: usize = 16;

/// URL-safe identifier alphabet (64 symbols)
const BOOK_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a new random book identifier.
pub fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LEN)
        .map(|_| BOOK_ID_ALPHABET[rng.gen_range(0..BOOK_ID_ALPHABET.len())] as char)
        .collect()
}

/// Book record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub page_count: i64,
    pub read_page: i64,
    /// Set at creation from `readPage == pageCount`; updates leave it alone
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from validated details.
    pub fn new(id: String, details: BookDetails, now: DateTime<Utc>) -> Self {
        Self {
            id,
            finished: details.page_count == details.read_page,
            name: details.name,
            year: details.year,
            author: details.author,
            summary: details.summary,
            publisher: details.publisher,
            page_count: details.page_count,
            read_page: details.read_page,
            reading: details.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every client-editable field and bump `updated_at`.
    pub fn apply(&mut self, details: BookDetails, now: DateTime<Utc>) {
        self.name = details.name;
        self.year = details.year;
        self.author = details.author;
        self.summary = details.summary;
        self.publisher = details.publisher;
        self.page_count = details.page_count;
        self.read_page = details.read_page;
        self.reading = details.reading;
        self.updated_at = now;
    }

    pub fn summary_view(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Short book representation used in listings
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Create / update request body.
///
/// Every field is optional here so that validation decides which error
/// a request receives.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    pub reading: Option<bool>,
}

/// Payload fields after validation
#[derive(Debug, Clone)]
pub struct BookDetails {
    pub name: String,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: Option<bool>,
}

/// List filters.
///
/// A key may repeat in the query string; only its first value is used.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// `0` or `1`; takes precedence over the other filters
    #[serde(default)]
    pub reading: Vec<String>,
    /// `0` or `1`; takes precedence over `name`
    #[serde(default)]
    pub finished: Vec<String>,
    /// Case-insensitive substring of the book name
    #[serde(default)]
    pub name: Vec<String>,
}

/// Active filter resolved from a [`BookQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Reading(bool),
    Finished(bool),
    Name(String),
    All,
}

impl BookQuery {
    /// Resolve the single filter that applies, in precedence order.
    pub fn filter(&self) -> BookFilter {
        if let Some(flag) = self.reading.first().and_then(|raw| parse_flag(raw)) {
            return BookFilter::Reading(flag != 0);
        }
        if let Some(flag) = self.finished.first().and_then(|raw| parse_flag(raw)) {
            return BookFilter::Finished(flag != 0);
        }
        match self.name.first().map(String::as_str) {
            Some(name) if !name.is_empty() => BookFilter::Name(name.to_lowercase()),
            _ => BookFilter::All,
        }
    }
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Reading(flag) => book.reading == Some(*flag),
            BookFilter::Finished(flag) => book.finished == *flag,
            BookFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::All => true,
        }
    }
}

/// Parse the leading integer of a query flag.
///
/// Leading whitespace and a sign are accepted, trailing garbage is
/// ignored. Text without leading digits yields `None`.
fn parse_flag(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // Only zero vs non-zero matters, so overflow saturates
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// ISO 8601 timestamp with millisecond precision and a `Z` suffix
fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
