//! The HTTP layer behind every provider.
//!
//! Providers talk to a `PageFetcher` trait object instead of a concrete
//! client so chain-level tests can serve fixture pages deterministically.
//! Status interpretation stays with the providers: a 404 on a direct
//! lyrics URL means "no such song" there, not a transport failure.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::NetworkError;

/// One fetched document.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    /// URL after redirects; relative hrefs resolve against this.
    pub final_url: String,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Page, NetworkError>;

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Page, NetworkError>;
}

/// Production fetcher over a shared `reqwest` client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn into_page(response: reqwest::Response) -> Result<Page, NetworkError> {
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        debug!("fetched {} ({} bytes, status {})", final_url, body.len(), status);
        Ok(Page {
            status,
            final_url,
            body,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Page, NetworkError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::into_page(response).await
    }

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Page, NetworkError> {
        debug!("POST {} ({} fields)", url, fields.len());
        let response = self.client.post(url).form(fields).send().await?;
        Self::into_page(response).await
    }
}

/// Resolve a possibly relative href against the page it appeared on.
pub fn resolve_href(page_url: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = url::Url::parse(page_url).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}
