//! Error types for fetching and extracting book pages.

use thiserror::Error;

/// Errors raised by the fetcher and the extractor.
///
/// Nothing in the library recovers from these; they surface to the caller
/// as-is.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The request could not complete (connection failure, timeout, body read).
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("Request to {url} failed with status: {status}")]
    Status { url: String, status: u16 },

    /// An expected element is absent from the document.
    #[error("Could not find {field} (selector: '{selector}')")]
    MissingElement { field: &'static str, selector: &'static str },

    /// The element exists but its text cannot be turned into the field's type.
    #[error("Invalid {field} value: '{text}'")]
    InvalidValue { field: &'static str, text: String },

    /// The star-rating class token is not one of the five known words.
    #[error("Unknown rating word: '{0}'")]
    UnknownRating(String),
}

impl ScrapeError {
    /// Returns true for transport and HTTP status failures.
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Network { .. } | ScrapeError::Status { .. })
    }

    /// Returns true when the page structure did not match the extraction rules.
    pub fn is_extraction(&self) -> bool {
        matches!(self, ScrapeError::MissingElement { .. } | ScrapeError::InvalidValue { .. })
    }

    /// Returns true when a lookup in the rating vocabulary failed.
    pub fn is_lookup(&self) -> bool {
        matches!(self, ScrapeError::UnknownRating(_))
    }
}
