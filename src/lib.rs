//! books-scraper - book and category scraper for books.toscrape.com
//!
//! Fetches book detail pages and the category index over plain HTTP and
//! extracts typed records from their HTML.

pub mod books;
pub mod commands;
pub mod config;
pub mod format;

pub use books::models::{Book, Categories, Rating};
pub use books::{BookSource, BooksClient, Parser, ScrapeError};
pub use config::Config;
