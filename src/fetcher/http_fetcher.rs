use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::fetcher::Fetcher;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Every request made through this fetcher fails once `timeout` elapses.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("arxiv-digest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)?;
        tracing::debug!(url, "fetching");
        let response = self.client.get(parsed).send().await?;
        response.error_for_status_ref()?;
        let body = response.bytes().await?.to_vec();
        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
