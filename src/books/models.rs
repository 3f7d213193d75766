//! Data models for book records, ratings and category listings.

use crate::books::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single book detail page, fully extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Catalogue URL the record was fetched from
    pub product_page_url: String,
    /// Universal Product Code from the metadata table
    pub universal_product_code: String,
    /// Book title
    pub title: String,
    /// Price including tax, currency symbol stripped
    pub price_including_tax: f64,
    /// Price excluding tax, currency symbol stripped
    pub price_excluding_tax: f64,
    /// Copies in stock
    pub number_available: u32,
    /// Description paragraph (empty when the page has none)
    pub product_description: String,
    /// Category name from the breadcrumb
    pub category: String,
    /// Star rating
    pub review_rating: Rating,
    /// Absolute cover image URL
    pub image_url: String,
}

impl Book {
    /// Tax paid on top of the base price.
    pub fn tax(&self) -> f64 {
        self.price_including_tax - self.price_excluding_tax
    }
}

/// Star rating, encoded on the site as an English word in a class attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    /// Numeric value, 1 to 5.
    pub fn value(self) -> u8 {
        match self {
            Rating::One => 1,
            Rating::Two => 2,
            Rating::Three => 3,
            Rating::Four => 4,
            Rating::Five => 5,
        }
    }
}

impl FromStr for Rating {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one" => Ok(Rating::One),
            "two" => Ok(Rating::Two),
            "three" => Ok(Rating::Three),
            "four" => Ok(Rating::Four),
            "five" => Ok(Rating::Five),
            _ => Err(ScrapeError::UnknownRating(s.to_string())),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::One),
            2 => Ok(Rating::Two),
            3 => Ok(Rating::Three),
            4 => Ok(Rating::Four),
            5 => Ok(Rating::Five),
            _ => Err(format!("Rating out of range: {}. Expected 1-5", value)),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Category names from the index sidebar.
///
/// Single pass: names are split out of the sidebar text as the iterator
/// advances. Iterating again means parsing the page again.
#[derive(Debug)]
pub struct Categories {
    text: String,
    offset: usize,
}

impl Categories {
    pub(crate) fn from_text(text: String) -> Self {
        Self { text, offset: 0 }
    }
}

impl Iterator for Categories {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.offset < self.text.len() {
            let rest = &self.text[self.offset..];
            let end = rest.find('\n').unwrap_or(rest.len());
            let candidate = rest[..end].trim();
            // '\n' is one byte, so this stays on a char boundary
            self.offset += end + 1;

            if !candidate.is_empty() {
                return Some(candidate.to_string());
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Categories {}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_book() -> Book {
        Book {
            product_page_url: "http://books.toscrape.com/catalogue/a-light-in-the-attic_1000/"
                .to_string(),
            universal_product_code: "a897fe39b1053632".to_string(),
            title: "A Light in the Attic".to_string(),
            price_including_tax: 51.77,
            price_excluding_tax: 51.77,
            number_available: 22,
            product_description: "It's hard to imagine a world without it.".to_string(),
            category: "Poetry".to_string(),
            review_rating: Rating::Three,
            image_url: "http://books.toscrape.com/media/cache/fe/72/cover.jpg".to_string(),
        }
    }

    #[test]
    fn test_rating_from_str() {
        assert_eq!("one".parse::<Rating>().unwrap(), Rating::One);
        assert_eq!("Two".parse::<Rating>().unwrap(), Rating::Two);
        assert_eq!("THREE".parse::<Rating>().unwrap(), Rating::Three);
        assert_eq!("fOuR".parse::<Rating>().unwrap(), Rating::Four);
        assert_eq!("Five".parse::<Rating>().unwrap(), Rating::Five);
    }

    #[test]
    fn test_rating_from_str_unknown() {
        for word in ["zero", "six", "", "3", "star-rating", "onee"] {
            let err = word.parse::<Rating>().unwrap_err();
            assert!(err.is_lookup(), "expected lookup failure for {:?}", word);
        }
    }

    #[test]
    fn test_rating_values() {
        let ratings = [Rating::One, Rating::Two, Rating::Three, Rating::Four, Rating::Five];
        let values: Vec<u8> = ratings.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(Rating::Four.to_string(), "4");
    }

    #[test]
    fn test_rating_try_from() {
        assert_eq!(Rating::try_from(1).unwrap(), Rating::One);
        assert_eq!(Rating::try_from(5).unwrap(), Rating::Five);
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(6).is_err());
    }

    #[test]
    fn test_rating_serde() {
        let json = serde_json::to_string(&Rating::Three).unwrap();
        assert_eq!(json, "3");

        let parsed: Rating = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, Rating::Five);

        assert!(serde_json::from_str::<Rating>("7").is_err());
    }

    #[test]
    fn test_book_serde() {
        let book = make_test_book();
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"universal_product_code\":\"a897fe39b1053632\""));
        assert!(json.contains("\"review_rating\":3"));
        assert!(json.contains("\"number_available\":22"));

        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn test_book_tax() {
        let mut book = make_test_book();
        assert_eq!(book.tax(), 0.0);

        book.price_including_tax = 12.0;
        book.price_excluding_tax = 10.0;
        assert_eq!(book.tax(), 2.0);
    }

    #[test]
    fn test_categories_skip_blank_lines() {
        let text = "\n\n   Books\n\n\n      Travel\n   \n\t\n   Mystery\n\n".to_string();
        let names: Vec<String> = Categories::from_text(text).collect();
        assert_eq!(names, vec!["Books", "Travel", "Mystery"]);
    }

    #[test]
    fn test_categories_handles_crlf_and_no_trailing_newline() {
        let text = "Books\r\n\r\nHistorical Fiction\r\nPoetry".to_string();
        let names: Vec<String> = Categories::from_text(text).collect();
        assert_eq!(names, vec!["Books", "Historical Fiction", "Poetry"]);
    }

    #[test]
    fn test_categories_single_pass() {
        let mut categories = Categories::from_text("Books\nTravel\n".to_string());
        assert_eq!(categories.next().as_deref(), Some("Books"));
        assert_eq!(categories.next().as_deref(), Some("Travel"));
        assert_eq!(categories.next(), None);
        assert_eq!(categories.next(), None);
    }

    #[test]
    fn test_categories_empty() {
        assert_eq!(Categories::from_text(String::new()).count(), 0);
        assert_eq!(Categories::from_text(" \n \n\t".to_string()).count(), 0);
    }
}
