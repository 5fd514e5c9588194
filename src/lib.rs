pub mod analyzer;
pub mod article;
pub mod batch;
pub mod cli;
pub mod config;
pub mod cooccurrence;
pub mod fallback;
pub mod html_parser;
pub mod http_client;
pub mod models;
pub mod reporter;
pub mod scorer;
pub mod search;

use analyzer::{CompetitorAnalyzer, DEFAULT_AVG_WORD_COUNT};
use anyhow::{Context, Result};
use article::Article;
use cli::{Cli, Command};
use colored::*;
use config::Config;
use models::AnalysisReport;
use reporter::Reporter;
use search::SearchClient;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

const MIN_KEYWORD_CHARS: usize = 2;
const MAX_KEYWORD_CHARS: usize = 100;

/// Trims `keyword` and checks it is 2–100 characters long
pub fn validate_keyword(keyword: &str) -> Result<String> {
    let trimmed = keyword.trim();
    let len = trimmed.chars().count();
    if !(MIN_KEYWORD_CHARS..=MAX_KEYWORD_CHARS).contains(&len) {
        anyhow::bail!(
            "Keyword must be between {} and {} characters",
            MIN_KEYWORD_CHARS,
            MAX_KEYWORD_CHARS
        );
    }
    Ok(trimmed.to_string())
}

pub async fn run(args: Cli) -> Result<()> {
    let file_config = Config::load(&args)?;
    let args = file_config.merge_with_cli(&args);
    let text_output = args.output != "json";

    if text_output {
        println!("{}", "Kiji - Competitor Analysis & SEO Scoring".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!();
    }

    match args.command.clone() {
        Command::Analyze { keyword } => {
            let keyword = validate_keyword(&keyword)?;

            let mut analyzer = CompetitorAnalyzer::new(file_config.analyzer_config(&args))?
                .with_extractor(file_config.cooccurrence_extractor()?);

            if text_output {
                println!("{} {}", "Analyzing:".bright_white().bold(), keyword);
                if !analyzer.search_client().is_configured() {
                    println!(
                        "{}",
                        "No search API key configured, using offline data".yellow()
                    );
                }
                println!();
                analyzer.enable_progress_bar();
            }

            let analysis = analyzer.analyze(&keyword).await;
            let report = Reporter::analysis_report(&keyword, analysis);

            emit(&args, &report, Reporter::print_analysis_report)
        }
        Command::Score {
            keyword,
            file,
            target,
            cooccurrence,
            analysis,
        } => {
            let keyword = validate_keyword(&keyword)?;
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read article: {}", file.display()))?;

            let saved = analysis.map(load_analysis_report).transpose()?;

            let terms = if cooccurrence.is_empty() {
                saved
                    .as_ref()
                    .map(|r| r.analysis.cooccurrence_words())
                    .unwrap_or_default()
            } else {
                cooccurrence
            };
            let target = target
                .or_else(|| saved.as_ref().map(|r| r.recommended_word_count))
                .unwrap_or(DEFAULT_AVG_WORD_COUNT);

            tracing::debug!(
                terms = terms.len(),
                target_word_count = target,
                "Scoring article"
            );

            let article = Article::from_generated_html(&keyword, &raw, None, &terms, target);
            let report = Reporter::score_report(&keyword, article);

            emit(&args, &report, Reporter::print_score_report)
        }
        Command::Rank { keyword, url } => {
            let keyword = validate_keyword(&keyword)?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("URL must start with http:// or https://");
            }

            let analyzer_config = file_config.analyzer_config(&args);
            let client = SearchClient::new(analyzer_config.search)?;
            let report = client.check_rank(&keyword, &url).await?;

            emit(&args, &report, Reporter::print_rank_report)
        }
    }
}

fn load_analysis_report(path: PathBuf) -> Result<AnalysisReport> {
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read analysis: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse analysis: {}", path.display()))
}

/// Prints `report` in the requested format and saves it when asked
fn emit<T: Serialize>(args: &Cli, report: &T, print_text: fn(&T)) -> Result<()> {
    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(report)?;
            println!("{}", json);
        }
        _ => print_text(report),
    }

    if let Some(filename) = &args.save {
        Reporter::save_json_report(report, filename)?;
    }

    Ok(())
}
