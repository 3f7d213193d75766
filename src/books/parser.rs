//! HTML extraction for book detail pages and the category sidebar.

use crate::books::error::ScrapeError;
use crate::books::models::{Book, Categories, Rating};
use crate::books::selectors::{book, index};
use crate::books::{normalize_base_url, BASE_URL, CATALOGUE_PATH};
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::{debug, trace};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Parser for books.toscrape.com pages.
///
/// Holds the site root so relative image paths and the record's source URL
/// can be made absolute.
#[derive(Debug, Clone)]
pub struct Parser {
    base_url: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl Parser {
    /// Creates a parser resolving URLs against `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self { base_url: normalize_base_url(base_url.as_ref()) }
    }

    /// Site root, always ending in '/'.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Root under which book pages live.
    pub fn catalogue_url(&self) -> String {
        format!("{}{}", self.base_url, CATALOGUE_PATH)
    }

    /// Parses a book detail page fetched from `path` (relative to the catalogue).
    pub fn parse_book(&self, html: &str, path: &str) -> Result<Book, ScrapeError> {
        let document = Html::parse_document(html);

        let table = document.select(&book::METADATA_TABLE).next().ok_or(
            ScrapeError::MissingElement {
                field: "metadata table",
                selector: book::METADATA_TABLE_CSS,
            },
        )?;

        let title = self.parse_title(&document)?;
        let universal_product_code = self.metadata_value(table, book::UPC_LABEL)?;
        let price_including_tax =
            parse_price(&self.metadata_value(table, book::PRICE_INCL_TAX_LABEL)?)?;
        let price_excluding_tax =
            parse_price(&self.metadata_value(table, book::PRICE_EXCL_TAX_LABEL)?)?;
        let number_available = self.parse_number_available(&document)?;
        let product_description = self.parse_description(&document);
        let category = self.parse_category(&document)?;
        let review_rating = self.parse_rating(&document)?;
        let image_url = self.parse_image_url(&document)?;

        let book = Book {
            product_page_url: format!("{}{}", self.catalogue_url(), path.trim_start_matches('/')),
            universal_product_code,
            title,
            price_including_tax,
            price_excluding_tax,
            number_available,
            product_description,
            category,
            review_rating,
            image_url,
        };

        debug!("Parsed book: {} ({})", book.title, book.universal_product_code);

        Ok(book)
    }

    /// Parses the index page sidebar into category names.
    ///
    /// The returned iterator is single pass; parse the page again to re-read it.
    pub fn parse_categories(&self, html: &str) -> Result<Categories, ScrapeError> {
        let document = Html::parse_document(html);

        let sidebar = document.select(&index::SIDEBAR).next().ok_or(
            ScrapeError::MissingElement { field: "category sidebar", selector: index::SIDEBAR_CSS },
        )?;

        Ok(Categories::from_text(sidebar.text().collect()))
    }

    fn parse_title(&self, document: &Html) -> Result<String, ScrapeError> {
        document
            .select(&book::TITLE)
            .next()
            .map(|e| text_of(e).trim().to_string())
            .ok_or(ScrapeError::MissingElement { field: "title", selector: book::TITLE_CSS })
    }

    /// Reads the value cell of the metadata row labelled `label`.
    fn metadata_value(&self, table: ElementRef, label: &'static str) -> Result<String, ScrapeError> {
        let value = table
            .select(&book::TABLE_ROW)
            .find(|row| {
                row.select(&book::TABLE_HEADER)
                    .next()
                    .is_some_and(|th| text_of(th).trim() == label)
            })
            .and_then(|row| row.select(&book::TABLE_CELL).next())
            .map(|td| text_of(td).trim().to_string())
            .ok_or(ScrapeError::MissingElement {
                field: label,
                selector: book::METADATA_TABLE_CSS,
            })?;

        trace!("Metadata {}: {}", label, value);
        Ok(value)
    }

    fn parse_number_available(&self, document: &Html) -> Result<u32, ScrapeError> {
        let text = document.select(&book::AVAILABILITY).next().map(text_of).ok_or(
            ScrapeError::MissingElement { field: "availability", selector: book::AVAILABILITY_CSS },
        )?;

        parse_stock(&text)
    }

    /// Empty when the page has no description block.
    fn parse_description(&self, document: &Html) -> String {
        let Some(anchor) = document.select(&book::DESCRIPTION_ANCHOR).next() else {
            debug!("No description block, using empty description");
            return String::new();
        };

        anchor
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "p")
            .map(|p| text_of(p).trim().to_string())
            .unwrap_or_default()
    }

    fn parse_category(&self, document: &Html) -> Result<String, ScrapeError> {
        document
            .select(&book::BREADCRUMB_ITEM)
            .nth(book::CATEGORY_BREADCRUMB_INDEX)
            .map(|li| text_of(li).trim().to_string())
            .ok_or(ScrapeError::MissingElement {
                field: "category",
                selector: book::BREADCRUMB_ITEM_CSS,
            })
    }

    fn parse_rating(&self, document: &Html) -> Result<Rating, ScrapeError> {
        let element = document.select(&book::STAR_RATING).next().ok_or(
            ScrapeError::MissingElement { field: "rating", selector: book::STAR_RATING_CSS },
        )?;

        element
            .value()
            .attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .find(|class| *class != book::STAR_RATING_CLASS)
            .unwrap_or_default()
            .parse()
    }

    fn parse_image_url(&self, document: &Html) -> Result<String, ScrapeError> {
        let src = document
            .select(&book::THUMBNAIL_IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .ok_or(ScrapeError::MissingElement {
                field: "image",
                selector: book::THUMBNAIL_IMAGE_CSS,
            })?;

        let relative = src.replace("../", "");
        Ok(format!("{}{}", self.base_url, relative.trim_start_matches('/')))
    }
}

/// Strips the one-character currency symbol and parses the amount.
///
/// "£51.77" parses to 51.77. Negative or non-numeric amounts are rejected.
pub fn parse_price(text: &str) -> Result<f64, ScrapeError> {
    let text = text.trim();
    let mut chars = text.chars();
    chars.next();

    let invalid = || ScrapeError::InvalidValue { field: "price", text: text.to_string() };

    let value: f64 = chars.as_str().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    Ok(value)
}

/// Extracts the first run of digits, e.g. 22 from "In stock (22 available)".
pub fn parse_stock(text: &str) -> Result<u32, ScrapeError> {
    let invalid = || ScrapeError::InvalidValue { field: "stock", text: text.trim().to_string() };

    DIGITS.find(text).ok_or_else(invalid)?.as_str().parse().map_err(|_| invalid())
}

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}
