//! Page-Keeper main entry point
//!
//! This is the command-line interface for fetching and storing web pages.

use anyhow::Context;
use clap::Parser;
use page_keeper::config::{load_settings, RunOptions, Settings};
use page_keeper::fetch::{FetchCommand, Fetcher};
use page_keeper::output::{ConsoleReporter, Reporter, RunSummary};
use page_keeper::storage::FileStore;
use page_keeper::KeeperError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Page-Keeper: fetch web pages and save them for later retrieval and browsing
///
/// Each page is stored in the output directory as `<domain>.html`.
#[derive(Parser, Debug)]
#[command(name = "page-keeper")]
#[command(version = "1.0.0")]
#[command(about = "Fetch web pages and save them for later retrieval and browsing", long_about = None)]
struct Cli {
    /// Space-separated links with the protocol (http or https)
    #[arg(value_name = "LINKS", required = true, num_args = 1..)]
    links: Vec<String>,

    /// Show additional information about the fetched pages: date and time of
    /// retrieval, number of links and number of images
    #[arg(long)]
    metadata: bool,

    /// Allow fetching more than the default maximum of 5 links per command
    #[arg(long)]
    override_max_links: bool,

    /// Overall timeout in minutes for fetching and storing content
    /// (default 5, at most 10)
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    set_max_timeout: Option<f64>,

    /// Path to a TOML settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory to store pages in (overrides the settings file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress diagnostic output; result lines are still printed
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            metadata: self.metadata,
            override_max_links: self.override_max_links,
            set_max_timeout: self.set_max_timeout,
        }
    }

    /// Links from all positional arguments, each split on whitespace
    ///
    /// A blank argument is kept as-is so that it is reported as invalid.
    fn split_links(&self) -> Vec<String> {
        self.links
            .iter()
            .flat_map(|arg| {
                let tokens: Vec<String> = arg.split_whitespace().map(str::to_string).collect();
                if tokens.is_empty() {
                    vec![arg.clone()]
                } else {
                    tokens
                }
            })
            .collect()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let reporter = Arc::new(ConsoleReporter);

    let result = run(&cli, reporter.clone()).await;
    let (code, message) = exit_status(&result);
    if let Some(message) = message {
        reporter.error(&message);
    }

    ExitCode::from(code)
}

/// Maps the outcome of a run to a process exit code and an optional error line
///
/// Per-link failures leave the code at 0. The deadline has already been
/// reported by the command itself, so it yields no further line.
fn exit_status(result: &anyhow::Result<RunSummary>) -> (u8, Option<String>) {
    match result {
        Ok(summary) => {
            tracing::info!("Run finished: {}", summary);
            (0, None)
        }
        Err(e) => match e.downcast_ref::<KeeperError>() {
            Some(KeeperError::DeadlineExceeded { .. }) => (1, None),
            _ => (1, Some(format!("{:#}", e))),
        },
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_keeper=warn"),
            1 => EnvFilter::new("page_keeper=info,warn"),
            2 => EnvFilter::new("page_keeper=debug,info"),
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

/// Loads settings, validates the run and fetches every link
async fn run(cli: &Cli, reporter: Arc<dyn Reporter>) -> anyhow::Result<RunSummary> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(dir) = &cli.output_dir {
        settings.output.directory = dir.clone();
    }

    let links = cli.split_links();
    tracing::debug!("Links: {:?}", links);

    let fetcher = Fetcher::from_settings(&settings.http).map_err(KeeperError::from)?;
    let store = FileStore::new(&settings.output.directory).map_err(KeeperError::from)?;
    tracing::info!("Storing pages in {}", store.root().display());

    let command = FetchCommand::new(
        links,
        &cli.run_options(),
        fetcher,
        Arc::new(store),
        reporter,
    )
    .map_err(KeeperError::from)?;

    Ok(command.execute().await?)
}
