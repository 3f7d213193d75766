//! books-scraper - book and category scraper for books.toscrape.com
//!
//! With no arguments, prints the default book's record followed by the
//! category list.

use anyhow::Result;
use books_scraper::commands::{BookCommand, CategoriesCommand};
use books_scraper::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "books-scraper",
    version,
    about = "Book and category scraper for books.toscrape.com",
    long_about = "Fetches book pages and the category index from books.toscrape.com and prints the extracted records. Run without a subcommand to print the default book followed by the category list."
)]
struct Cli {
    /// Site root to fetch from
    #[arg(long, global = true, env = "BOOKS_BASE_URL")]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "BOOKS_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, markdown, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up books by catalogue path (e.g. a-light-in-the-attic_1000/)
    #[command(alias = "b")]
    Book {
        /// Catalogue path(s) or full book URL(s)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List the categories from the site sidebar
    #[command(alias = "c")]
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        None => {
            let path = config.book_path.clone();
            let book = BookCommand::new(config.clone()).execute(&path).await?;
            println!("{}", book);

            let categories = CategoriesCommand::new(config).execute().await?;
            println!("{}", categories);
        }

        Some(Commands::Book { paths }) => {
            let cmd = BookCommand::new(config);

            let output = if paths.len() == 1 {
                cmd.execute(&paths[0]).await?
            } else {
                cmd.execute_batch(&paths).await?
            };

            println!("{}", output);
        }

        Some(Commands::Categories) => {
            let output = CategoriesCommand::new(config).execute().await?;
            println!("{}", output);
        }
    }

    Ok(())
}
