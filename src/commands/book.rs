//! Book lookup command implementation.

use crate::books::{Book, BookSource, BooksClient, Parser, CATALOGUE_PATH};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Fetches book pages and renders their records.
pub struct BookCommand {
    config: Config,
}

impl BookCommand {
    /// Creates a new book command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a book by catalogue path and returns formatted output.
    pub async fn execute(&self, path: &str) -> Result<String> {
        let client = BooksClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(&client, path).await
    }

    /// Fetches a book with a provided source (for testing).
    pub async fn execute_with_source(&self, source: &impl BookSource, path: &str) -> Result<String> {
        let book = self.fetch(source, path).await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_book(&book))
    }

    /// Fetches several books, reporting and skipping the ones that fail.
    pub async fn execute_batch(&self, paths: &[String]) -> Result<String> {
        let client = BooksClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_batch_with_source(&client, paths).await
    }

    /// Fetches several books with a provided source (for testing).
    pub async fn execute_batch_with_source(
        &self,
        source: &impl BookSource,
        paths: &[String],
    ) -> Result<String> {
        let mut books: Vec<Book> = Vec::new();

        for path in paths {
            match self.fetch(source, path).await {
                Ok(book) => books.push(book),
                Err(e) => eprintln!("Failed to scrape {}: {:#}", path, e),
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_books(&books))
    }

    /// Fetches and parses one book page.
    pub async fn fetch(&self, source: &impl BookSource, path: &str) -> Result<Book> {
        let path = relative_path(source.base_url(), path)?;

        info!("Looking up book: {}", path);

        let html = source.book_page(&path).await?;
        let book = Parser::new(source.base_url())
            .parse_book(&html, &path)
            .with_context(|| format!("Failed to parse book page {}", path))?;

        Ok(book)
    }
}

/// Reduces a full catalogue URL or a slash-prefixed path to a catalogue-relative path.
fn relative_path(base_url: &str, path: &str) -> Result<String> {
    let catalogue_url = format!("{}{}", base_url, CATALOGUE_PATH);
    let path = path.trim();
    let path = path.strip_prefix(catalogue_url.as_str()).unwrap_or(path).trim_start_matches('/');

    if path.is_empty() {
        anyhow::bail!("Book path cannot be empty. Expected e.g. 'a-light-in-the-attic_1000/'");
    }

    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::{ScrapeError, BASE_URL};
    use crate::config::OutputFormat;
    use async_trait::async_trait;

    /// Mock source for testing.
    struct MockSource {
        book_html: String,
        should_fail: bool,
    }

    impl MockSource {
        fn new(book_html: String) -> Self {
            Self { book_html, should_fail: false }
        }

        fn failing() -> Self {
            Self { book_html: String::new(), should_fail: true }
        }
    }

    #[async_trait]
    impl BookSource for MockSource {
        async fn book_page(&self, path: &str) -> Result<String, ScrapeError> {
            if self.should_fail {
                Err(ScrapeError::Network {
                    url: format!("{}catalogue/{}", BASE_URL, path),
                    message: "Simulated network error".to_string(),
                })
            } else {
                Ok(self.book_html.clone())
            }
        }

        async fn index_page(&self) -> Result<String, ScrapeError> {
            Ok("<html></html>".to_string())
        }

        fn base_url(&self) -> &str {
            BASE_URL
        }
    }

    fn make_book_html(title: &str, price: f64) -> String {
        format!(
            r#"<html><body>
                <ul class="breadcrumb">
                    <li>Home</li><li>Books</li><li>Travel</li><li>{title}</li>
                </ul>
                <div class="thumbnail"><img src="../../media/cache/00/11/cover.jpg"></div>
                <div class="product_main">
                    <h1>{title}</h1>
                    <p class="instock availability">In stock (4 available)</p>
                    <p class="star-rating Five"></p>
                </div>
                <table class="table table-striped">
                    <tr><th>UPC</th><td>0123456789abcdef</td></tr>
                    <tr><th>Price (excl. tax)</th><td>£{price:.2}</td></tr>
                    <tr><th>Price (incl. tax)</th><td>£{price:.2}</td></tr>
                </table>
            </body></html>"#
        )
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path(BASE_URL, "sapiens_996/").unwrap(), "sapiens_996/");
        assert_eq!(relative_path(BASE_URL, "  /sapiens_996/ ").unwrap(), "sapiens_996/");
        assert_eq!(
            relative_path(BASE_URL, "http://books.toscrape.com/catalogue/sapiens_996/index.html")
                .unwrap(),
            "sapiens_996/index.html"
        );
        assert!(relative_path(BASE_URL, "   ").is_err());
        assert!(relative_path(BASE_URL, "/").is_err());
    }

    #[tokio::test]
    async fn test_book_command_basic() {
        let source = MockSource::new(make_book_html("The Road Less Travelled", 19.99));
        let cmd = BookCommand::new(Config::default());

        let output = cmd.execute_with_source(&source, "the-road_7/").await.unwrap();
        assert!(output.contains("The Road Less Travelled"));
        assert!(output.contains("0123456789abcdef"));
        assert!(output.contains("Rating:      5/5"));
        assert!(output.contains("http://books.toscrape.com/catalogue/the-road_7/"));
    }

    #[tokio::test]
    async fn test_book_command_json_format() {
        let source = MockSource::new(make_book_html("Json Book", 5.5));
        let config = Config { format: OutputFormat::Json, ..Config::default() };
        let cmd = BookCommand::new(config);

        let output = cmd.execute_with_source(&source, "json-book_1/").await.unwrap();
        assert!(output.starts_with('{'));
        assert!(output.contains("\"universal_product_code\""));
        assert!(output.contains("\"price_excluding_tax\": 5.5"));
    }

    #[tokio::test]
    async fn test_book_command_empty_path() {
        let source = MockSource::new(String::new());
        let cmd = BookCommand::new(Config::default());

        let err = cmd.execute_with_source(&source, "").await.unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[tokio::test]
    async fn test_book_command_network_error() {
        let source = MockSource::failing();
        let cmd = BookCommand::new(Config::default());

        let err = cmd.execute_with_source(&source, "a-light-in-the-attic_1000/").await.unwrap_err();
        assert!(err.to_string().contains("Simulated network error"));
        assert!(err.downcast_ref::<ScrapeError>().is_some_and(|e| e.is_network()));
    }

    #[tokio::test]
    async fn test_book_command_parse_error() {
        let source = MockSource::new("<html><body>Not a book</body></html>".to_string());
        let cmd = BookCommand::new(Config::default());

        let err = cmd.execute_with_source(&source, "broken_1/").await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse book page broken_1/"));
        assert!(err.root_cause().to_string().contains("metadata table"));
    }

    #[tokio::test]
    async fn test_book_command_batch() {
        let source = MockSource::new(make_book_html("Batch Book", 10.0));
        let cmd = BookCommand::new(Config::default());

        let paths = vec!["one_1/".to_string(), "".to_string(), "two_2/".to_string()];
        let output = cmd.execute_batch_with_source(&source, &paths).await.unwrap();
        // The empty path is skipped, the other two are rendered
        assert!(output.contains("Total: 2 books"));
    }

    #[tokio::test]
    async fn test_book_command_batch_all_fail() {
        let source = MockSource::failing();
        let cmd = BookCommand::new(Config::default());

        let paths = vec!["one_1/".to_string()];
        let output = cmd.execute_batch_with_source(&source, &paths).await.unwrap();
        assert_eq!(output, "No books found.");
    }
}
