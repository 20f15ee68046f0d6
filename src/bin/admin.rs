//! CLI administration tool for redis-shortener.
//!
//! Works directly against the configured store, without going through the
//! HTTP API. Reads the same environment variables as the server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://www.github.com
//!
//! # Look up a code
//! cargo run --bin admin -- resolve d0409d29
//!
//! # Show the ten busiest domains
//! cargo run --bin admin -- top --limit 10
//!
//! # Delete every key in the namespace
//! cargo run --bin admin -- reset
//!
//! # Check store connection
//! cargo run --bin admin -- store check
//! ```

use redis_shortener::application::services::{MappingService, MetricsService};
use redis_shortener::config::{self, MAX_TOP_DOMAINS};
use redis_shortener::domain::repositories::{KeyValueStore, Keyspace};
use redis_shortener::error::AppError;
use redis_shortener::server::connect_store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing redis-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// Absolute http(s) URL
        url: String,
    },

    /// Print the URL behind a short code
    Resolve { code: String },

    /// Show domains with the most shortened links
    Top {
        #[arg(short, long, default_value_t = 3)]
        limit: usize,
    },

    /// Delete every mapping and counter in the namespace
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let store = connect_store(&config).await?;
    let keyspace = Keyspace::new(config.key_namespace.clone());

    match cli.command {
        Commands::Shorten { url } => {
            let service = MappingService::with_fnv(store, keyspace);
            shorten(&service, &url, config.base_url.as_deref()).await?
        }
        Commands::Resolve { code } => {
            let service = MappingService::with_fnv(store, keyspace);
            resolve(&service, &code).await?
        }
        Commands::Top { limit } => {
            let service = MetricsService::new(store, keyspace);
            top(&service, limit).await?
        }
        Commands::Reset { yes } => {
            let service = MappingService::with_fnv(store, keyspace.clone());
            reset(&service, &keyspace, yes).await?
        }
        Commands::Store { action } => handle_store_action(action, store).await?,
    }

    Ok(())
}

/// Turns a service error into a one-line CLI error including its details.
fn cli_error(err: AppError) -> anyhow::Error {
    let info = err.to_error_info();
    anyhow::anyhow!("{} ({}): {}", info.message, info.code, info.details)
}

async fn shorten(service: &MappingService, url: &str, base_url: Option<&str>) -> Result<()> {
    let outcome = service.shorten(url).await.map_err(cli_error)?;

    if outcome.created {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "ℹ️  URL was already shortened".yellow());
    }
    println!();
    println!("  URL:   {}", outcome.mapping.original_url.cyan());
    println!("  Code:  {}", outcome.mapping.code.bright_yellow().bold());
    println!(
        "  Short: {}",
        outcome.mapping.short_url(base_url).bright_white()
    );
    println!();

    Ok(())
}

async fn resolve(service: &MappingService, code: &str) -> Result<()> {
    match service.resolve(code).await {
        Ok(url) => {
            println!("  {} → {}", code.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("❌ No link for code '{}'", code).red());
            Ok(())
        }
        Err(e) => Err(cli_error(e)),
    }
}

/// Prints the top domains table.
///
/// # Output Format
///
/// ```text
/// 📊 Top Domains
///
///   #   Domain                         Links
///   ─────────────────────────────────────────
///   1   speedtest.net                  3
///   2   github.com                     2
/// ```
async fn top(service: &MetricsService, limit: usize) -> Result<()> {
    if limit == 0 || limit > MAX_TOP_DOMAINS {
        anyhow::bail!("--limit must be between 1 and {}", MAX_TOP_DOMAINS);
    }

    println!("{}", "📊 Top Domains".bright_blue().bold());
    println!();

    let domains = service.top_domains(limit).await.map_err(cli_error)?;

    if domains.is_empty() {
        println!("{}", "  No links shortened yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {}",
        "#".bright_white().bold(),
        "Domain".bright_white().bold(),
        "Links".bright_white().bold()
    );
    println!("  {}", "─".repeat(41).bright_black());

    for (rank, entry) in domains.iter().enumerate() {
        println!(
            "  {:<3} {:<30} {}",
            (rank + 1).to_string().bright_black(),
            entry.domain.cyan(),
            entry.count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Deletes every key owned by the namespace after confirmation.
async fn reset(service: &MappingService, keyspace: &Keyspace, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Reset Store".bright_blue().bold());
    println!();

    let scope = if keyspace.namespace().is_empty() {
        "all url:, code: and domain: keys".to_string()
    } else {
        format!("every key under '{}:'", keyspace.namespace())
    };
    println!("  This deletes {}.", scope.red().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all short links and counters?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service.reset().await.map_err(cli_error)?;

    println!();
    println!(
        "{} {}",
        "✅ Deleted keys:".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction, store: Arc<dyn KeyValueStore>) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!(
                "{}",
                format!("🔍 Checking {} store connection...", store.backend()).bright_blue()
            );

            store.ping().await?;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}
