//! CLI entry point for the `gsearch` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use graph_searcher::cli::commands::{self, SearchMode};
use graph_searcher::config::resolve_config;
use graph_searcher::SearchError;

#[derive(Parser)]
#[command(
    name = "gsearch",
    about = "Graph search over adjacency matrices, linked files and web pages"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search an adjacency matrix stored as CSV
    Matrix {
        /// CSV file: header row of labels, then one labelled row per node
        file: PathBuf,
        /// Start node label
        start: String,
        /// Breadth-first instead of depth-first
        #[arg(long)]
        bfs: bool,
    },
    /// Follow linked node files and print the hidden message
    Files {
        /// Start filename, relative to the base directory
        start: String,
        /// Directory holding node files (defaults to config base_dir)
        #[arg(long)]
        base_dir: Option<PathBuf>,
        /// Breadth-first instead of depth-first
        #[arg(long)]
        bfs: bool,
    },
    /// Crawl web pages by their links, collecting the first table of each
    Web {
        /// Start URL
        url: String,
        /// Breadth-first instead of depth-first
        #[arg(long)]
        bfs: bool,
        /// WebDriver endpoint; plain HTTP fetches are used without one
        #[arg(long)]
        webdriver: Option<String>,
        /// Write the combined table to this CSV file
        #[arg(long)]
        table_out: Option<PathBuf>,
    },
    /// Unlock a page with the clues of a travel log and print the location
    Reveal {
        /// Page exposing the password form
        url: String,
        /// CSV travel log containing the clue column
        #[arg(long)]
        travellog: PathBuf,
        /// WebDriver endpoint
        #[arg(long)]
        webdriver: Option<String>,
    },
}

fn mode(bfs: bool) -> SearchMode {
    if bfs {
        SearchMode::Bfs
    } else {
        SearchMode::Dfs
    }
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = resolve_config(cli.config.as_deref()).and_then(|mut config| match cli.command {
        Commands::Matrix { file, start, bfs } => commands::cmd_matrix(&file, &start, mode(bfs), json),
        Commands::Files {
            start,
            base_dir,
            bfs,
        } => {
            let base = base_dir.unwrap_or_else(|| config.base_dir.clone());
            commands::cmd_files(&base, &start, mode(bfs), json)
        }
        Commands::Web {
            url,
            bfs,
            webdriver,
            table_out,
        } => {
            if webdriver.is_some() {
                config.webdriver_url = webdriver;
            }
            commands::cmd_web(&config, &url, mode(bfs), table_out.as_deref(), json)
        }
        Commands::Reveal {
            url,
            travellog,
            webdriver,
        } => {
            if webdriver.is_some() {
                config.webdriver_url = webdriver;
            }
            commands::cmd_reveal(&config, &url, &travellog, json)
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            SearchError::Io(_) => 1,
            SearchError::InvalidMatrix(_)
            | SearchError::Csv(_)
            | SearchError::MissingColumn(_)
            | SearchError::Config(_)
            | SearchError::InvalidUrl(_) => 2,
            SearchError::UnknownNode(_) => 4,
            SearchError::Http(_) | SearchError::WebDriver { .. } => 5,
            SearchError::NotOverridden { .. } => 6,
        };
        process::exit(code);
    }
}
