//! CLI module for build-advisor
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP service
//! - `extract` - Extract requirements from a message once and print them
//! - `recommend` - Run the full pipeline once and print the chosen parts
//! - `catalog` - Show loaded catalogs and their canonical values
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! build-advisor serve
//!
//! # One-off recommendation against the catalogs in ./data
//! GROQ_KEY=... build-advisor recommend "quiet white build for photo editing"
//!
//! # Generate shell completions
//! build-advisor completions bash > ~/.bash_completion.d/build-advisor
//! ```

pub mod catalog;
pub mod completions;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// build-advisor - PC component recommender
#[derive(Parser, Debug)]
#[command(
    name = "build-advisor",
    version,
    about = "Recommend a compatible PC build from a free-text description"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service
    Serve(ServeArgs),
    /// Extract structured requirements from a message
    Extract(ExtractArgs),
    /// Recommend one component per category for a message
    Recommend(RecommendArgs),
    /// Show catalog row counts and canonical values
    Catalog(CatalogArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "ADVISOR_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "ADVISOR_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ADVISOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory holding the five catalog CSV files
    #[arg(short = 'd', long)]
    pub catalog_dir: Option<PathBuf>,
}

/// Options shared by the one-shot pipeline commands.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the five catalog CSV files
    #[arg(short = 'd', long)]
    pub catalog_dir: Option<PathBuf>,

    /// Override the model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Free-text description of the desired build
    pub message: String,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Free-text description of the desired build
    pub message: String,

    /// Show the shortlist fallback categories
    #[arg(long)]
    pub verbose: bool,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the five catalog CSV files
    #[arg(short = 'd', long)]
    pub catalog_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
