use crate::batch::batched_map;
use crate::cooccurrence::CooccurrenceExtractor;
use crate::fallback;
use crate::html_parser::HtmlParser;
use crate::http_client::{DEFAULT_USER_AGENT, build_http_client};
use crate::models::{
    AnalysisResult, CompetitorResult, HeadingFrequency, PageStructure, SearchResult,
};
use crate::search::{SearchClient, SearchConfig};
use anyhow::Result;
use governor::{
    Quota, RateLimiter, clock::DefaultClock, state::InMemoryState, state::direct::NotKeyed,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

/// Pages at or below this many characters are treated as failed fetches.
pub const MIN_COUNTED_WORDS: usize = 500;
pub const DEFAULT_AVG_WORD_COUNT: usize = 5000;
pub const MAX_HEADING_PATTERNS: usize = 50;

/// Configuration for the competitor analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub search: SearchConfig,
    /// Ranked results requested from the provider
    pub max_results: usize,
    /// Per-page fetch timeout
    pub fetch_timeout: Duration,
    /// Pages fetched concurrently per batch
    pub concurrency: usize,
    pub user_agent: String,
    pub requests_per_second: Option<f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            max_results: 10,
            fetch_timeout: Duration::from_secs(8),
            concurrency: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            requests_per_second: None,
        }
    }
}

pub struct CompetitorAnalyzer {
    client: reqwest::Client,
    search: SearchClient,
    extractor: CooccurrenceExtractor,
    max_results: usize,
    concurrency: usize,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    progress_bar: Option<ProgressBar>,
}

impl CompetitorAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let rate_limiter = config
            .requests_per_second
            .filter(|rps| *rps > 0.0)
            .and_then(|rps| NonZeroU32::new(rps.ceil() as u32))
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(Self {
            client: build_http_client(config.fetch_timeout, &config.user_agent)?,
            search: SearchClient::new(config.search)?,
            extractor: CooccurrenceExtractor::default(),
            max_results: config.max_results,
            concurrency: config.concurrency,
            rate_limiter,
            progress_bar: None,
        })
    }

    pub fn with_extractor(mut self, extractor: CooccurrenceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Enable progress bar for page fetching
    pub fn enable_progress_bar(&mut self) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:30.cyan/blue} Analyzing: {pos}/{len} pages")
                .expect("Progress bar template should be valid"),
        );
        self.progress_bar = Some(pb);
    }

    pub fn search_client(&self) -> &SearchClient {
        &self.search
    }

    /// Runs the full competitor analysis for `keyword`.
    ///
    /// Single-page failures degrade to empty records and a missing or failing
    /// ranking provider switches to the offline data set, so this never fails.
    pub async fn analyze(&self, keyword: &str) -> AnalysisResult {
        let results = self.search.search(keyword, self.max_results).await;

        let competitors = if fallback::is_fallback(&results) {
            tracing::info!(keyword = %keyword, "Using offline competitor data");
            fallback::competitors(keyword)
        } else {
            self.fetch_competitors(results).await
        };

        self.summarize(keyword, competitors)
    }

    /// Aggregates competitor records into an [`AnalysisResult`].
    pub fn summarize(&self, keyword: &str, competitors: Vec<CompetitorResult>) -> AnalysisResult {
        AnalysisResult {
            cooccurrence: self.extractor.extract(&competitors, keyword),
            avg_word_count: average_word_count(&competitors),
            all_headings: heading_frequencies(&competitors),
            competitors,
        }
    }

    /// Fetches every result page in batches; ranks follow the result order.
    pub async fn fetch_competitors(&self, results: Vec<SearchResult>) -> Vec<CompetitorResult> {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(results.len() as u64);
            pb.set_position(0);
        }

        let pages = batched_map(&results, self.concurrency, |result| {
            self.fetch_page(&result.url)
        })
        .await;

        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("Analyzed {} pages", pages.len()));
        }

        results
            .into_iter()
            .zip(pages)
            .enumerate()
            .map(|(i, (result, page))| CompetitorResult::from_search(i + 1, result, page))
            .collect()
    }

    async fn fetch_page(&self, url: &str) -> PageStructure {
        // Wait for rate limiter before making request
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let page = match self.try_fetch_page(url).await {
            Ok(page) => {
                tracing::debug!(url = %url, word_count = page.word_count, headings = page.headings.len(), "Analyzed competitor page");
                page
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to analyze competitor page");
                PageStructure::default()
            }
        };

        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }

        page
    }

    async fn try_fetch_page(&self, url: &str) -> Result<PageStructure> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        if let Some(ct) = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
        {
            let ct_lower = ct.to_lowercase();
            if !ct_lower.contains("text/html") && !ct_lower.contains("application/xhtml") {
                tracing::debug!(url = %url, content_type = %ct, "Non-HTML content type, parsing anyway");
            }
        }

        let html = response.text().await?;
        Ok(HtmlParser::parse(&html))
    }
}

/// Mean character count over pages above [`MIN_COUNTED_WORDS`], rounded.
pub fn average_word_count(competitors: &[CompetitorResult]) -> usize {
    let counted: Vec<usize> = competitors
        .iter()
        .map(|c| c.word_count)
        .filter(|&wc| wc > MIN_COUNTED_WORDS)
        .collect();

    if counted.is_empty() {
        return DEFAULT_AVG_WORD_COUNT;
    }

    (counted.iter().sum::<usize>() as f64 / counted.len() as f64).round() as usize
}

/// Occurrences of each distinct (tag, text) pair across all competitors.
pub fn heading_frequencies(competitors: &[CompetitorResult]) -> Vec<HeadingFrequency> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut frequencies: Vec<HeadingFrequency> = Vec::new();

    for heading in competitors.iter().flat_map(|c| &c.headings) {
        let key = (heading.tag.as_str(), heading.text.as_str());
        match index.get(&key) {
            Some(&i) => frequencies[i].frequency += 1,
            None => {
                index.insert(key, frequencies.len());
                frequencies.push(HeadingFrequency {
                    tag: heading.tag.clone(),
                    text: heading.text.clone(),
                    frequency: 1,
                });
            }
        }
    }

    frequencies.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    frequencies.truncate(MAX_HEADING_PATTERNS);
    frequencies
}
