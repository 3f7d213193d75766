//! Category listing command implementation.

use crate::books::{BookSource, BooksClient, Parser};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::debug;

/// Fetches the site index and lists its sidebar categories.
pub struct CategoriesCommand {
    config: Config,
}

impl CategoriesCommand {
    /// Creates a new categories command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the category list and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = BooksClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(&client).await
    }

    /// Fetches the category list with a provided source (for testing).
    pub async fn execute_with_source(&self, source: &impl BookSource) -> Result<String> {
        let html = source.index_page().await?;
        let categories: Vec<String> = Parser::new(source.base_url())
            .parse_categories(&html)
            .context("Failed to parse category index")?
            .collect();

        debug!("Found {} categories", categories.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_categories(&categories))
    }
}
