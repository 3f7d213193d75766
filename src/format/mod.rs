//! Output formatting for books and categories (table, JSON, markdown, CSV).

use crate::books::Book;
use crate::config::OutputFormat;

/// Formats records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single book.
    pub fn format_book(&self, book: &Book) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(book),
            OutputFormat::Table => self.table_single(book),
            OutputFormat::Markdown => self.markdown_single(book),
            OutputFormat::Csv => self.csv_books(std::slice::from_ref(book)),
        }
    }

    /// Formats multiple books.
    pub fn format_books(&self, books: &[Book]) -> String {
        if books.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No books found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_books(books),
            OutputFormat::Table => self.table_books(books),
            OutputFormat::Markdown => self.markdown_books(books),
            OutputFormat::Csv => self.csv_books(books),
        }
    }

    /// Formats category names; table output is one name per line.
    pub fn format_categories(&self, categories: &[String]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(categories).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => categories.join("\n"),
            OutputFormat::Markdown => {
                categories.iter().map(|c| format!("- {}", c)).collect::<Vec<_>>().join("\n")
            }
            OutputFormat::Csv => std::iter::once("category".to_string())
                .chain(categories.iter().map(|c| Self::csv_escape(c)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    // JSON formatting

    fn json_single(&self, book: &Book) -> String {
        serde_json::to_string_pretty(book).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_books(&self, books: &[Book]) -> String {
        serde_json::to_string_pretty(books).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, book: &Book) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:       {}", book.title));
        lines.push(format!("UPC:         {}", book.universal_product_code));
        lines.push(format!("URL:         {}", book.product_page_url));
        lines.push(format!(
            "Price:       {:.2} incl. tax / {:.2} excl. tax",
            book.price_including_tax, book.price_excluding_tax
        ));
        lines.push(format!("Tax:         {:.2}", book.tax()));
        lines.push(format!("Stock:       {} available", book.number_available));
        lines.push(format!("Rating:      {}/5", book.review_rating));
        lines.push(format!("Category:    {}", book.category));
        lines.push(format!("Image:       {}", book.image_url));

        if book.product_description.is_empty() {
            lines.push("Description: N/A".to_string());
        } else {
            lines.push(format!("Description: {}", book.product_description));
        }

        lines.join("\n")
    }

    fn table_books(&self, books: &[Book]) -> String {
        let upc_width = 16;
        let price_width = 8;
        let stock_width = 5;
        let rating_width = 6;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<upc_width$}  {:<price_width$}  {:<stock_width$}  {:<rating_width$}  {}",
            "UPC", "Price", "Stock", "Rating", "Title"
        ));
        lines.push(format!(
            "{:-<upc_width$}  {:-<price_width$}  {:-<stock_width$}  {:-<rating_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for book in books {
            lines.push(format!(
                "{:<upc_width$}  {:>price_width$.2}  {:>stock_width$}  {:>rating_width$}  {}",
                book.universal_product_code,
                book.price_including_tax,
                book.number_available,
                book.review_rating.to_string(),
                Self::truncate(&book.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} books", books.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, book: &Book) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", book.title));
        lines.push(String::new());

        lines.push(format!("- **UPC:** {}", book.universal_product_code));
        lines.push(format!("- **URL:** [View on site]({})", book.product_page_url));
        lines.push(format!(
            "- **Price:** {:.2} (excl. tax {:.2})",
            book.price_including_tax, book.price_excluding_tax
        ));
        lines.push(format!("- **Stock:** {}", book.number_available));
        lines.push(format!("- **Rating:** {}", "★".repeat(book.review_rating.value() as usize)));
        lines.push(format!("- **Category:** {}", book.category));
        lines.push(format!("- **Image:** ![cover]({})", book.image_url));

        if !book.product_description.is_empty() {
            lines.push(String::new());
            lines.push(format!("> {}", book.product_description));
        }

        lines.join("\n")
    }

    fn markdown_books(&self, books: &[Book]) -> String {
        let mut lines = Vec::new();

        lines.push("| UPC | Price | Stock | Rating | Title |".to_string());
        lines.push("|-----|-------|-------|--------|-------|".to_string());

        for book in books {
            lines.push(format!(
                "| {} | {:.2} | {} | {} | [{}]({}) |",
                book.universal_product_code,
                book.price_including_tax,
                book.number_available,
                book.review_rating,
                Self::truncate(&book.title, 40),
                book.product_page_url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} books found*", books.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "product_page_url,universal_product_code,title,price_including_tax,price_excluding_tax,number_available,product_description,category,review_rating,image_url"
            .to_string()
    }

    fn csv_books(&self, books: &[Book]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for book in books {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&book.product_page_url),
                Self::csv_escape(&book.universal_product_code),
                Self::csv_escape(&book.title),
                book.price_including_tax,
                book.price_excluding_tax,
                book.number_available,
                Self::csv_escape(&book.product_description),
                Self::csv_escape(&book.category),
                book.review_rating,
                Self::csv_escape(&book.image_url)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    fn truncate(s: &str, width: usize) -> String {
        if s.chars().count() > width {
            format!("{}...", s.chars().take(width - 3).collect::<String>())
        } else {
            s.to_string()
        }
    }
}
