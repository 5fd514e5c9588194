use anyhow::Result;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

/// User agent sent with every competitor page fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Kiji/1.0; +https://kiji.ai)";
const ACCEPT: &str = "text/html,application/xhtml+xml,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "ja,en-US;q=0.9,en;q=0.8";

/// Creates a reqwest client for fetching competitor pages.
///
/// The timeout covers the whole exchange, body included.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}
