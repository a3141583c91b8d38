//! CLI commands and argument parsing

use crate::config::DEFAULT_API_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export every post mentioning an account to line-delimited JSON
#[derive(Parser, Debug)]
#[command(name = "tweet-archive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download all posts mentioning an account
    Download {
        /// Account whose mentions should be downloaded
        #[arg(short, long = "user", visible_alias = "account")]
        account: String,

        /// Directory the archive file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Base URL of the search API
        #[arg(long, env = "TWEET_ARCHIVE_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Records requested per page
        #[arg(long, default_value = "100")]
        page_size: u32,

        /// Also print every record to stdout
        #[arg(long)]
        print: bool,
    },
}
