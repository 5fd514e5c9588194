use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analyzer::AnalyzerConfig;
use crate::cli::Cli;
use crate::cooccurrence::CooccurrenceExtractor;
use crate::search::SearchConfig;

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Output format: text or json
    pub output: Option<String>,

    /// Save report to file
    pub save: Option<String>,

    /// Verbose output
    pub verbose: Option<bool>,

    /// Ranked-search API key
    pub api_key: Option<String>,

    /// Ranked-search API endpoint
    pub search_endpoint: Option<String>,

    /// Country code passed to the search provider
    pub country: Option<String>,

    /// Number of competitor pages fetched concurrently
    pub concurrency: Option<usize>,

    /// Per-page fetch timeout in seconds
    pub timeout: Option<u64>,

    /// Rate limit for page fetches per second
    pub rate_limit: Option<f64>,

    /// Number of ranked results to analyze
    pub max_results: Option<usize>,

    /// User agent for competitor page fetches
    pub user_agent: Option<String>,

    /// Extra co-occurrence stop words
    pub stop_words: Option<Vec<String>>,

    /// Replacement pattern for candidate co-occurrence terms
    pub term_pattern: Option<String>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("kiji.{}", ext)));
            }
        }

        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let kiji_config_dir = config_home.join("kiji");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(kiji_config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Loads the explicit `--config` file, or the first default path found
    pub fn load(cli: &Cli) -> Result<Self> {
        match &cli.config {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::from_default_paths()?.unwrap_or_default()),
        }
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            command: cli.command.clone(),
            output: if cli.output != "text" {
                cli.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| cli.output.clone())
            },
            save: cli.save.clone().or_else(|| self.save.clone()),
            verbose: if cli.verbose {
                cli.verbose
            } else {
                self.verbose.unwrap_or(cli.verbose)
            },
            api_key: cli.api_key.clone().or_else(|| self.api_key.clone()),
            search_endpoint: cli
                .search_endpoint
                .clone()
                .or_else(|| self.search_endpoint.clone()),
            country: if cli.country != "jp" {
                cli.country.clone()
            } else {
                self.country.clone().unwrap_or_else(|| cli.country.clone())
            },
            concurrency: if cli.concurrency != 5 {
                cli.concurrency
            } else {
                self.concurrency.unwrap_or(cli.concurrency)
            },
            timeout: if cli.timeout != 8 {
                cli.timeout
            } else {
                self.timeout.unwrap_or(cli.timeout)
            },
            rate_limit: cli.rate_limit.or(self.rate_limit),
            max_results: if cli.max_results != 10 {
                cli.max_results
            } else {
                self.max_results.unwrap_or(cli.max_results)
            },
            config: cli.config.clone(),
        }
    }

    /// Builds the analyzer configuration from merged CLI arguments
    pub fn analyzer_config(&self, cli: &Cli) -> AnalyzerConfig {
        let defaults = AnalyzerConfig::default();

        let mut search: SearchConfig = defaults.search;
        search.api_key = cli.api_key.clone();
        search.country = cli.country.clone();
        if let Some(endpoint) = &cli.search_endpoint {
            search.endpoint = endpoint.clone();
        }

        AnalyzerConfig {
            search,
            max_results: cli.max_results,
            fetch_timeout: Duration::from_secs(cli.timeout),
            concurrency: cli.concurrency,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            requests_per_second: cli.rate_limit,
        }
    }

    /// Default extractor extended with the configured stop words and pattern
    pub fn cooccurrence_extractor(&self) -> Result<CooccurrenceExtractor> {
        let mut extractor = CooccurrenceExtractor::default();

        if let Some(stop_words) = &self.stop_words {
            extractor = extractor.with_stop_words(stop_words.iter().cloned());
        }
        if let Some(pattern) = &self.term_pattern {
            extractor = extractor.with_term_pattern(pattern)?;
        }

        Ok(extractor)
    }
}
