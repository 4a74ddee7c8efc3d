//! Crawl-Ledger command-line entry point
//!
//! Drives the per-page callbacks and the reporter from the shell.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crawl_ledger::config::{load_config_or_default, Config};
use crawl_ledger::crawler::{process_page, LinkExtractor, PageResponse, StatsAggregator};
use crawl_ledger::output::{export_markdown_report, load_report, print_report};
use crawl_ledger::scope::ScopePolicy;
use crawl_ledger::storage::{open_storage, SqliteStorage};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Crawl-Ledger: link scoping and page statistics for a hosted crawler
///
/// The host crawler fetches pages; crawl-ledger decides which outbound links
/// to follow and keeps cumulative word and subdomain statistics.
#[derive(Parser, Debug)]
#[command(name = "crawl-ledger")]
#[command(version = "1.0.0")]
#[command(about = "Link scoping and page statistics for a hosted crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ledger database (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    database: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract links and record statistics for one fetched page
    Process(PageArgs),

    /// Extract crawlable links from one fetched page
    Extract(PageArgs),

    /// Record statistics for one page body
    Record {
        /// URL the page was fetched from
        #[arg(long)]
        url: String,

        /// File holding the page body (stdin if omitted)
        #[arg(long, value_name = "FILE")]
        body: Option<PathBuf>,
    },

    /// Show the scope verdict for each URL
    Check {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print the crawl report
    Report {
        /// Number of top words to show (overrides the configured value)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Write the crawl report as markdown
    ExportSummary {
        /// Output markdown file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// URL the host requested
    #[arg(long)]
    url: String,

    /// URL after redirects (defaults to the requested URL)
    #[arg(long)]
    final_url: Option<String>,

    /// HTTP status of the fetch
    #[arg(long, default_value_t = 200)]
    status: u16,

    /// File holding the page body (stdin if omitted on a 200 response)
    #[arg(long, value_name = "FILE")]
    body: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to build default configuration".to_string(),
        }
    })?;
    if let Some(database) = &cli.database {
        config.storage.database_path = database.display().to_string();
    }
    tracing::debug!("Using ledger database {}", config.storage.database_path);

    match cli.command {
        Command::Process(page) => handle_process(&config, &page),
        Command::Extract(page) => handle_extract(&config, &page),
        Command::Record { url, body } => handle_record(&config, &url, body.as_deref()),
        Command::Check { urls } => handle_check(&config, &urls),
        Command::Report { top } => handle_report(&config, top),
        Command::ExportSummary { output } => handle_export_summary(&config, &output),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_ledger=info,warn"),
            1 => EnvFilter::new("crawl_ledger=debug,info"),
            2 => EnvFilter::new("crawl_ledger=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays parseable link output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads a page body from a file, or from stdin when no file is given
fn read_body(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read page body from {}", path.display())),
        None => {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .context("Failed to read page body from stdin")?;
            Ok(body)
        }
    }
}

fn build_response(page: &PageArgs) -> Result<PageResponse> {
    let final_url = page.final_url.clone().unwrap_or_else(|| page.url.clone());
    let body = if page.status == 200 {
        Some(read_body(page.body.as_deref())?)
    } else {
        None
    };

    Ok(PageResponse::new(page.url.clone(), final_url, page.status, body))
}

fn open_ledger(config: &Config) -> Result<SqliteStorage> {
    open_storage(&config.storage).with_context(|| {
        format!(
            "Failed to open ledger database {}",
            config.storage.database_path
        )
    })
}

fn print_links(links: &[String]) {
    for link in links {
        println!("{}", link);
    }
}

/// Handles `process`: both callbacks, as the host crawler runs them
fn handle_process(config: &Config, page: &PageArgs) -> Result<()> {
    let response = build_response(page)?;
    let mut storage = open_ledger(config)?;
    let extractor = LinkExtractor::from_config(config);
    let aggregator = StatsAggregator::new();

    let outcome = process_page(&mut storage, &extractor, &aggregator, &page.url, &response)
        .with_context(|| format!("Failed to process {}", page.url))?;

    if let Some(summary) = &outcome.summary {
        tracing::info!(
            "Recorded {} ({} words, {} distinct)",
            summary.url,
            summary.word_count,
            summary.distinct_words
        );
    }
    print_links(&outcome.links);

    Ok(())
}

/// Handles `extract`: link extraction only
fn handle_extract(config: &Config, page: &PageArgs) -> Result<()> {
    let response = build_response(page)?;
    let mut storage = open_ledger(config)?;
    let extractor = LinkExtractor::from_config(config);

    let links = extractor
        .extract_links(&mut storage, &page.url, &response)
        .with_context(|| format!("Failed to extract links from {}", page.url))?;

    tracing::info!("{} links accepted from {}", links.len(), page.url);
    print_links(&links);

    Ok(())
}

/// Handles `record`: statistics only
fn handle_record(config: &Config, url: &str, body: Option<&Path>) -> Result<()> {
    let body = read_body(body)?;
    let mut storage = open_ledger(config)?;

    let summary = StatsAggregator::new()
        .record_page(&mut storage, url, &body)
        .with_context(|| format!("Failed to record {}", url))?;

    println!(
        "{}: {} words ({} distinct) under {}{}",
        summary.url,
        summary.word_count,
        summary.distinct_words,
        summary.subdomain,
        if summary.new_longest { ", new longest page" } else { "" }
    );

    Ok(())
}

/// Handles `check`: explains the scope decision for each URL
fn handle_check(config: &Config, urls: &[String]) -> Result<()> {
    let policy = ScopePolicy::from_config(&config.scope);

    for url in urls {
        match policy.check(url) {
            Ok(verdict) => println!("{}\t{}", url, verdict),
            Err(e) => println!("{}\tinvalid: {}", url, e),
        }
    }

    Ok(())
}

/// Opens the ledger for reading
///
/// A database that does not exist yet reads as an empty ledger and is not
/// created.
fn open_ledger_for_report(config: &Config) -> Result<SqliteStorage> {
    let path = Path::new(&config.storage.database_path);
    if path.exists() {
        open_ledger(config)
    } else {
        tracing::warn!(
            "Ledger database {} does not exist, reporting an empty ledger",
            path.display()
        );
        SqliteStorage::new_in_memory().context("Failed to open empty ledger")
    }
}

/// Handles `report`: prints the report to stdout
fn handle_report(config: &Config, top: Option<usize>) -> Result<()> {
    let storage = open_ledger_for_report(config)?;
    let top_n = top.unwrap_or(config.report.top_words);

    let report = load_report(&storage, top_n).context("Failed to load crawl report")?;
    print_report(&report);

    Ok(())
}

/// Handles `export-summary`: writes the report as markdown
fn handle_export_summary(config: &Config, output: &Path) -> Result<()> {
    let storage = open_ledger_for_report(config)?;

    tracing::info!("Loading ledger from {}", config.storage.database_path);
    export_markdown_report(&storage, config.report.top_words, output)
        .with_context(|| format!("Failed to export report to {}", output.display()))?;

    println!("✓ Report exported to: {}", output.display());

    Ok(())
}
