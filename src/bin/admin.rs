//! CLI administration tool for book-reviews.
//!
//! Books are not created through the HTTP API; this tool seeds and removes
//! them, prints preset rankings and checks the database.
//!
//! # Usage
//!
//! ```bash
//! # Add a book
//! cargo run --bin admin -- book add "A Wizard of Earthsea"
//!
//! # List books, optionally filtered by title
//! cargo run --bin admin -- book list --title wizard
//!
//! # Delete a book and its reviews
//! cargo run --bin admin -- book delete 3
//!
//! # Print a ranking
//! cargo run --bin admin -- ranking popular_last_month
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`.

use book_reviews::application::services::{BookQuery, BookService};
use book_reviews::config;
use book_reviews::domain::clock::SystemClock;
use book_reviews::domain::ranking::{Preset, RankedBook};
use book_reviews::infrastructure::persistence::{PgBookRepository, PgReviewRepository};
use book_reviews::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

type Books = BookService<PgBookRepository, PgReviewRepository>;

/// CLI tool for managing book-reviews.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage books
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Print a preset ranking
    Ranking {
        /// popular_last_month, popular_last_6months,
        /// highest_rated_last_month or highest_rated_last_6months
        preset: Preset,

        /// Maximum number of rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Book management subcommands.
#[derive(Subcommand)]
enum BookAction {
    /// Add a new book
    Add {
        /// Book title (prompted if omitted)
        title: Option<String>,
    },

    /// List books, newest first
    List {
        /// Case-insensitive title fragment
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a book together with its reviews
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Book { action } => handle_book_action(action, &pool).await?,
        Commands::Ranking { preset, limit } => print_ranking(&books(&pool), preset, limit).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn books(pool: &PgPool) -> Books {
    let pool = Arc::new(pool.clone());

    BookService::new(
        Arc::new(PgBookRepository::new(pool.clone())),
        Arc::new(PgReviewRepository::new(pool)),
        Arc::new(SystemClock),
    )
}

/// Dispatches book management commands.
async fn handle_book_action(action: BookAction, pool: &PgPool) -> Result<()> {
    let service = books(pool);

    match action {
        BookAction::Add { title } => add_book(&service, title).await?,
        BookAction::List { title } => list_books(&service, title).await?,
        BookAction::Delete { id, yes } => delete_book(&service, id, yes).await?,
    }

    Ok(())
}

async fn add_book(service: &Books, title: Option<String>) -> Result<()> {
    println!("{}", "📚 Add Book".bright_blue().bold());
    println!();

    let title = match title {
        Some(t) => t,
        None => Input::new().with_prompt("Title").interact_text()?,
    };

    let book = service
        .create_book(&title)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create book: {}", e))?;

    println!(
        "{} {} (id {})",
        "✅ Created".green().bold(),
        book.title.cyan(),
        book.id.to_string().bright_white()
    );

    Ok(())
}

/// Lists books with their all-time review count and average.
///
/// # Output Format
///
/// ```text
/// 📋 Books
///
///   ID    Title                                    Reviews  Avg    Created
///   ──────────────────────────────────────────────────────────────────────────────
///   2     The Dispossessed                         4        4.25   2024-01-16 14:20
/// ```
async fn list_books(service: &Books, title: Option<String>) -> Result<()> {
    println!("{}", "📋 Books".bright_blue().bold());
    println!();

    let books = service
        .list_books(BookQuery {
            title,
            preset: None,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list books: {}", e))?;

    if books.is_empty() {
        println!("{}", "  No books found".yellow());
        println!();
        println!(
            "  Add one with: {} admin book add",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    print_table(&books);

    println!();
    println!("  Total: {}", books.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a book after confirmation (default: No).
async fn delete_book(service: &Books, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Book".bright_blue().bold());
    println!();

    let details = service
        .get_book_details(id)
        .await
        .map_err(|e| anyhow::anyhow!("Book lookup failed: {}", e))?;

    println!("  Book:    {}", details.book.title.cyan());
    println!("  ID:      {}", details.book.id.to_string().bright_black());
    println!(
        "  Reviews: {}",
        details.reviews_count.to_string().bright_white()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this book and all of its reviews?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_book(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete book: {}", e))?;

    println!("{}", "✅ Book deleted".green().bold());
    println!();

    Ok(())
}

async fn print_ranking(service: &Books, preset: Preset, limit: usize) -> Result<()> {
    println!(
        "{} {}",
        "🏆 Ranking".bright_blue().bold(),
        preset.as_str().cyan()
    );
    println!(
        "  Window: last {} month(s), at least {} review(s)",
        preset.window_months(),
        preset.min_reviews()
    );
    println!();

    let books = service
        .list_books(BookQuery {
            title: None,
            preset: Some(preset),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to rank books: {}", e))?;

    if books.is_empty() {
        println!("{}", "  No book qualifies".yellow());
        return Ok(());
    }

    let shown: Vec<RankedBook> = books.into_iter().take(limit).collect();
    print_table(&shown);
    println!();

    Ok(())
}

fn print_table(books: &[RankedBook]) {
    println!(
        "  {:<5} {:<40} {:<8} {:<6} {:<16}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Reviews".bright_white().bold(),
        "Avg".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for ranked in books {
        let avg = ranked
            .avg_rating
            .map(|avg| format!("{avg:.2}"))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<5} {:<40} {:<8} {:<6} {}",
            ranked.book.id.to_string().bright_black(),
            truncate(&ranked.book.title, 40).cyan(),
            ranked.reviews_count.unwrap_or_default().to_string(),
            avg.bright_green(),
            ranked
                .book
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        title.to_string()
    } else {
        let mut short: String = title.chars().take(width - 1).collect();
        short.push('…');
        short
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            books(pool)
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let books_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
                .fetch_one(pool)
                .await?;
            let reviews_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Books:      {}", books_count.to_string().bright_green().bold());
            println!(
                "  Reviews:    {}",
                reviews_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
