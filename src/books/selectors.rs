//! CSS selectors for books.toscrape.com pages.
//!
//! Every selector is paired with its source string so extraction errors can
//! name the rule that failed. Update both together when the markup changes.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for a single book detail page.
pub mod book {
    use super::*;

    pub const TITLE_CSS: &str = "div.product_main h1";
    /// Heading inside the main product container.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(TITLE_CSS).unwrap());

    pub const METADATA_TABLE_CSS: &str = "table.table.table-striped";
    /// Key/value table with UPC, prices, tax and availability.
    pub static METADATA_TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(METADATA_TABLE_CSS).unwrap());

    pub static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
    pub static TABLE_HEADER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
    pub static TABLE_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

    /// Row labels in the metadata table.
    pub const UPC_LABEL: &str = "UPC";
    pub const PRICE_INCL_TAX_LABEL: &str = "Price (incl. tax)";
    pub const PRICE_EXCL_TAX_LABEL: &str = "Price (excl. tax)";

    pub const AVAILABILITY_CSS: &str = "p.instock.availability";
    /// "In stock (22 available)" paragraph.
    pub static AVAILABILITY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(AVAILABILITY_CSS).unwrap());

    pub const DESCRIPTION_ANCHOR_CSS: &str = "#product_description";
    /// Header block preceding the description paragraph.
    pub static DESCRIPTION_ANCHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(DESCRIPTION_ANCHOR_CSS).unwrap());

    pub const BREADCRUMB_ITEM_CSS: &str = "ul.breadcrumb li";
    /// Breadcrumb entries: Home / Books / <category> / <title>.
    pub static BREADCRUMB_ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(BREADCRUMB_ITEM_CSS).unwrap());

    /// Position of the category in the breadcrumb trail.
    pub const CATEGORY_BREADCRUMB_INDEX: usize = 2;

    pub const STAR_RATING_CSS: &str = "p.star-rating";
    /// Paragraph whose class list encodes the rating as a word.
    pub static STAR_RATING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(STAR_RATING_CSS).unwrap());

    /// Class shared by every rating paragraph; the other token is the rating.
    pub const STAR_RATING_CLASS: &str = "star-rating";

    pub const THUMBNAIL_IMAGE_CSS: &str = "div.thumbnail img";
    /// Cover image.
    pub static THUMBNAIL_IMAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(THUMBNAIL_IMAGE_CSS).unwrap());
}

/// Selectors for the site index page.
pub mod index {
    use super::*;

    pub const SIDEBAR_CSS: &str = "div.side_categories";
    /// Sidebar listing every category under the "Books" umbrella entry.
    pub static SIDEBAR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(SIDEBAR_CSS).unwrap());
}
