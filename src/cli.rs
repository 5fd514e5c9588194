use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "kiji")]
#[command(about = "Competitor analysis and SEO scoring for keyword-driven articles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: text or json
    #[arg(short, long, default_value = "text", global = true)]
    pub output: String,

    /// Save report to file
    #[arg(short, long, global = true)]
    pub save: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Ranked-search API key (falls back to offline data when absent)
    #[arg(long, env = "BRAVE_SEARCH_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Ranked-search API endpoint
    #[arg(long, global = true)]
    pub search_endpoint: Option<String>,

    /// Country code passed to the search provider (default: jp)
    #[arg(long, default_value = "jp", global = true)]
    pub country: String,

    /// Number of competitor pages fetched concurrently (default: 5)
    #[arg(short = 'c', long, default_value_t = 5, global = true)]
    pub concurrency: usize,

    /// Per-page fetch timeout in seconds (default: 8)
    #[arg(short = 't', long, default_value_t = 8, global = true)]
    pub timeout: u64,

    /// Rate limit for page fetches per second (optional, e.g., 1.0 for 1 req/s)
    #[arg(short = 'r', long, global = true)]
    pub rate_limit: Option<f64>,

    /// Number of ranked results to analyze (default: 10)
    #[arg(short = 'n', long, default_value_t = 10, global = true)]
    pub max_results: usize,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze the top-ranked pages for a keyword
    Analyze {
        /// Target search keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,
    },

    /// Score a generated article against a keyword
    Score {
        /// Target search keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,

        /// Article HTML file
        #[arg(short, long)]
        file: PathBuf,

        /// Target character count (default: from --analysis, else 5000)
        #[arg(long)]
        target: Option<usize>,

        /// Co-occurrence terms, comma separated
        #[arg(long, value_delimiter = ',')]
        cooccurrence: Vec<String>,

        /// Saved analysis report (JSON) supplying terms and target
        #[arg(long)]
        analysis: Option<PathBuf>,
    },

    /// Find where a site ranks for a keyword
    Rank {
        /// Target search keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,

        /// Any URL on the site to look for
        #[arg(value_name = "URL")]
        url: String,
    },
}
