use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::source::{DEFAULT_SOURCE_URL, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "hst",
    version,
    about = "HTTP status code lookup backed by a cached Wikipedia catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print status codes as JSON, refreshing the cache when the page has a newer revision
    Lookup(LookupArgs),
    /// Show what the local cache holds
    Status(StatusArgs),
    /// Compare the source page revision with the cached one
    Revision(RevisionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Read the page from a local HTML file instead of the network
    #[arg(long, conflicts_with = "source_url")]
    pub source_file: Option<PathBuf>,

    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
    /// Cache file location (default: $HOME/.hst)
    #[arg(long)]
    pub cache_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Status code category name to filter, e.g. "client" or "nginx"
    #[arg(short = 't', long)]
    pub status_type: Option<String>,

    /// Status code to filter, e.g. 401, 222, 1xx
    #[arg(short = 'c', long)]
    pub code: Option<String>,

    /// Skip the network and use the cached catalog only
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub cache: CacheArgs,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub cache: CacheArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RevisionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub cache: CacheArgs,
}
