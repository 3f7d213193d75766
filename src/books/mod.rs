//! books.toscrape.com modules for HTTP client, parsing, and data models.

pub mod client;
pub mod error;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{BookSource, BooksClient};
pub use error::ScrapeError;
pub use models::{Book, Categories, Rating};
pub use parser::Parser;

/// Root of the demo bookstore.
pub const BASE_URL: &str = "http://books.toscrape.com/";

/// Path under the root where book detail pages live.
pub const CATALOGUE_PATH: &str = "catalogue/";

/// Book fetched when no path is given.
pub const DEFAULT_BOOK_PATH: &str = "a-light-in-the-attic_1000/";

/// Ensures a base URL ends with exactly one '/'.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}
