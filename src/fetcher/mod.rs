pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Retrieves a web page or binary document by URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let body = self.fetch(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latin1Page;

    #[async_trait]
    impl Fetcher for Latin1Page {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(b"G\xf6del numbering".to_vec())
        }
    }

    #[test]
    fn test_fetch_text_is_lossy() {
        let text = tokio_test::block_on(Latin1Page.fetch_text("https://arxiv.org/abs/1206.0001")).unwrap();
        assert_eq!(text, "G\u{fffd}del numbering");
    }
}
