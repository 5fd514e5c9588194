use crate::fallback;
use crate::models::{RankCheck, RankedEntry, SearchResult};
use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, ClientBuilder, header};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// The provider rejects offsets past this page index.
const MAX_PAGE_OFFSET: usize = 9;

/// Results checked when looking up a ranking position
const RANK_CHECK_DEPTH: usize = 20;
const RANK_CHECK_REPORTED: usize = 10;

/// Configuration for the ranked-search provider
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Without a key every search answers with the offline fallback data.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub country: String,
    /// Largest result count the provider returns per request.
    pub page_size: usize,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            country: "jp".to_string(),
            page_size: 20,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    web: Option<ProviderWeb>,
}

#[derive(Debug, Deserialize)]
struct ProviderWeb {
    #[serde(default)]
    results: Vec<ProviderResult>,
}

#[derive(Debug, Deserialize)]
struct ProviderResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
}

impl From<ProviderResult> for SearchResult {
    fn from(item: ProviderResult) -> Self {
        SearchResult {
            title: item.title,
            url: item.url,
            snippet: item.description,
        }
    }
}

pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .context("Failed to build search client")?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Returns up to `count` ranked results for `keyword`.
    ///
    /// Never fails: a missing key, a non-success response or a network error
    /// all answer with [`fallback::search_results`].
    pub async fn search(&self, keyword: &str, count: usize) -> Vec<SearchResult> {
        let Some(api_key) = self.api_key() else {
            tracing::debug!("No search API key configured, using fallback results");
            return Self::fallback(keyword, count);
        };

        match self.fetch_ranked(keyword, count, api_key).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "Search provider failed, using fallback results");
                Self::fallback(keyword, count)
            }
        }
    }

    fn fallback(keyword: &str, count: usize) -> Vec<SearchResult> {
        let mut results = fallback::search_results(keyword);
        results.truncate(count);
        results
    }

    /// Requests pages one after another until `count` results are collected
    /// or the provider runs out.
    async fn fetch_ranked(
        &self,
        keyword: &str,
        count: usize,
        api_key: &str,
    ) -> Result<Vec<SearchResult>> {
        let per_page = count.min(self.config.page_size.max(1));
        let mut results = Vec::with_capacity(count);

        for offset in 0..=MAX_PAGE_OFFSET {
            if results.len() >= count {
                break;
            }

            let page = match self.fetch_page(keyword, per_page, offset, api_key).await {
                Ok(page) => page,
                Err(e) if offset > 0 => {
                    tracing::warn!(offset, error = %e, "Stopping pagination after provider error");
                    break;
                }
                Err(e) => return Err(e),
            };

            let exhausted = page.len() < per_page;
            results.extend(page);
            if exhausted {
                break;
            }
        }

        results.truncate(count);
        Ok(results)
    }

    async fn fetch_page(
        &self,
        keyword: &str,
        count: usize,
        offset: usize,
        api_key: &str,
    ) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", keyword.to_string()),
                ("count", count.to_string()),
                ("offset", offset.to_string()),
                ("country", self.config.country.clone()),
            ])
            .header("X-Subscription-Token", api_key)
            .send()
            .await
            .context("Search request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Search provider returned HTTP {}", status.as_u16());
        }

        let body: ProviderResponse = response
            .json()
            .await
            .context("Failed to decode search response")?;

        Ok(body
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .map(SearchResult::from)
            .collect())
    }

    /// Looks up where `target_url`'s site ranks for `keyword`.
    ///
    /// Unlike [`search`](Self::search) this surfaces failures: a ranking
    /// position computed from fallback data would be meaningless.
    pub async fn check_rank(&self, keyword: &str, target_url: &str) -> Result<RankCheck> {
        let api_key = self
            .api_key()
            .ok_or_else(|| anyhow!("Search API key is not configured"))?;

        let target_domain = site_domain(target_url)
            .with_context(|| format!("Invalid target URL: {}", target_url))?;

        let results = self.fetch_ranked(keyword, RANK_CHECK_DEPTH, api_key).await?;

        let matched = results
            .iter()
            .enumerate()
            .find(|(_, r)| site_domain(&r.url).is_some_and(|d| d == target_domain));

        let (position, matched_url, matched_title) = match matched {
            Some((i, r)) => (Some(i + 1), r.url.clone(), r.title.clone()),
            None => (None, String::new(), String::new()),
        };

        let top_results = results
            .iter()
            .take(RANK_CHECK_REPORTED)
            .enumerate()
            .map(|(i, r)| RankedEntry {
                rank: i + 1,
                title: r.title.clone(),
                url: r.url.clone(),
            })
            .collect();

        Ok(RankCheck {
            keyword: keyword.to_string(),
            target_url: target_url.to_string(),
            position,
            matched_url,
            matched_title,
            checked_at: chrono::Utc::now().to_rfc3339(),
            top_results,
        })
    }
}

/// Host of `url` without a leading `www.`
pub fn site_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}
