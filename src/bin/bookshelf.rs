//! bookshelf CLI — run the web server or manage books from the shell.

use std::sync::Arc;

use bookshelf::catalog::Catalog;
use bookshelf::config::Config;
use bookshelf::db::Db;
use bookshelf::telemetry::{TelemetryConfig, init_telemetry};
use bookshelf::web;
use bookshelf::web::view::format_rating;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "bookshelf", about = "A small catalogue of rated books")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Listen address (overrides BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Book operations
    Book {
        #[command(subcommand)]
        action: BookAction,
    },
}

#[derive(Subcommand)]
enum BookAction {
    /// Add a new book
    Add {
        title: String,
        author: String,
        /// Rating between 0 and 100
        rating: String,
    },
    /// List all books
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a book by author and title
    Delete { author: String, title: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Serve { bind } => cmd_serve(config, bind).await,
        Command::Book { action } => {
            let catalog = open_catalog(&config).await?;
            match action {
                BookAction::Add {
                    title,
                    author,
                    rating,
                } => cmd_book_add(&catalog, &title, &author, &rating).await,
                BookAction::List { json } => cmd_book_list(&catalog, json).await,
                BookAction::Delete { author, title } => {
                    cmd_book_delete(&catalog, &author, &title).await
                }
            }
        }
    }
}

async fn open_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let db = Db::connect(config.database_url.expose_secret()).await?;
    db.migrate().await?;
    Ok(Catalog::new(Arc::new(db)))
}

async fn cmd_serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "bookshelf".to_string(),
        default_level: config.log_level.clone(),
    })?;

    let catalog = Arc::new(open_catalog(&config).await?);

    let address = bind.unwrap_or_else(|| config.bind_addr.clone());
    tracing::info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;

    web::serve(listener, catalog.clone()).await?;
    catalog.db().close().await;
    Ok(())
}

async fn cmd_book_add(
    catalog: &Catalog,
    title: &str,
    author: &str,
    rating: &str,
) -> anyhow::Result<()> {
    let book = catalog
        .add_book(Some(title), Some(author), Some(rating))
        .await?;
    println!("Added: {} (id: {})", book.title, book.id);
    Ok(())
}

async fn cmd_book_list(catalog: &Catalog, json: bool) -> anyhow::Result<()> {
    let books = catalog.list_books().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books found.");
        return Ok(());
    }

    println!("{:<6}  {:<40}  {:<30}  RATING", "ID", "TITLE", "AUTHOR");
    println!("{}", "-".repeat(90));
    for book in &books {
        println!(
            "{:<6}  {:<40}  {:<30}  {}",
            book.id.0,
            book.title,
            book.author,
            format_rating(book.rating)
        );
    }

    println!("\n{} book(s)", books.len());
    Ok(())
}

async fn cmd_book_delete(catalog: &Catalog, author: &str, title: &str) -> anyhow::Result<()> {
    match catalog.delete_book(author, title).await? {
        0 => println!("Nothing to delete: no book {title:?} by {author}"),
        _ => println!("Deleted: {title}"),
    }
    Ok(())
}
