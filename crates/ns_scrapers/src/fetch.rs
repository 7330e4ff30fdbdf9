//! HTTP fetching shared by the extraction strategies.

use ns_core::{Error, FetchConfig, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use url::Url;

/// A downloaded page and the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: Url,
    pub html: String,
}

/// Builds a client with the configured timeout and user agent.
/// Redirects are followed with reqwest's default policy.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(Error::from)
}

/// GETs `url` and returns the body, failing on any non-2xx status.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    let response = client
        .get(url.clone())
        .header(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Scraping(format!("{} returned HTTP {}", url, status)));
    }

    let final_url = response.url().clone();
    let html = response.text().await?;
    tracing::debug!(%url, %final_url, bytes = html.len(), "Fetched page");

    Ok(FetchedPage { final_url, html })
}
