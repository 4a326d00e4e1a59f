//! getver main entry point
//!
//! This is the command-line interface: it merges flags over the optional
//! configuration file, runs the crawl and prints the selected results.

use anyhow::Context;
use clap::Parser;
use getver::config::{load_config, validate, Config};
use getver::output::{postprocess, render, Outcome, Selection, EXIT_NO_RESULTS};
use getver::{find_version_candidates, GetverError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Crawls a given URL and tries to find the version number
///
/// Example: getver golang.org
#[derive(Parser, Debug)]
#[command(name = "getver")]
#[command(version)]
#[command(about = "Crawls a given URL and tries to find the version number", long_about = None)]
struct Cli {
    /// URL of the project site (the scheme defaults to http)
    #[arg(value_name = "URL")]
    url: String,

    /// Use a specific result (1-based)
    #[arg(short = 'u', value_name = "N")]
    use_result: Option<usize>,

    /// Retrieve more results (the default is 1)
    #[arg(short = 'n', value_name = "N")]
    results: Option<usize>,

    /// Crawl depth (the default is 1, the maximum is 3)
    #[arg(short = 'd', value_name = "N")]
    depth: Option<u32>,

    /// Timeout per request, in milliseconds (the default is 10000)
    #[arg(short = 't', value_name = "MS")]
    timeout: Option<u64>,

    /// Don't strip away letters
    #[arg(long)]
    nostrip: bool,

    /// Sort the results in descending order
    #[arg(long)]
    sort: bool,

    /// Number the results
    #[arg(long)]
    number: bool,

    /// Stay on the URL's subdomain instead of its whole domain
    #[arg(long)]
    subdomain: bool,

    /// Maximum number of pages fetched at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Overrides configuration values with the flags that were given
    fn apply(&self, config: &mut Config) {
        if let Some(results) = self.results {
            config.output.max_results = results;
        }
        if let Some(depth) = self.depth {
            config.crawler.depth = depth;
        }
        if let Some(timeout) = self.timeout {
            config.crawler.timeout_ms = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.max_concurrent_fetches = concurrency;
        }
        config.candidates.keep_letters |= self.nostrip;
        config.crawler.same_subdomain |= self.subdomain;
        config.output.sort |= self.sort;
        config.output.numbered |= self.number;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(outcome) => {
            if let Outcome::Found(text) = &outcome {
                print!("{}", text);
            }
            ExitCode::from(outcome.exit_code() as u8)
        }
        Err(e) => {
            if let Some(GetverError::NotEnoughResults { .. }) = e.downcast_ref::<GetverError>() {
                println!("{}", e);
            } else {
                tracing::error!("{:#}", e);
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(EXIT_NO_RESULTS as u8)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout only carries results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("getver=warn,error"),
            1 => EnvFilter::new("getver=info,warn"),
            2 => EnvFilter::new("getver=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration, crawls and renders the results
async fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    cli.apply(&mut config);

    let selection = Selection::from_flags(cli.use_result, config.output.numbered);
    config.output.max_results = selection.results_to_retrieve(config.output.max_results);
    validate(&config)?;

    tracing::info!(
        "Crawling {} (depth {}, timeout {}ms, {} results)",
        cli.url,
        config.crawler.depth,
        config.crawler.timeout_ms,
        config.output.max_results
    );

    let words = find_version_candidates(&cli.url, &config).await?;
    let words = postprocess(words, config.output.sort);

    Ok(render(&words, selection)?)
}
