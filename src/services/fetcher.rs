use crate::error::FetchError;
use crate::io::FragmentSource;
use crate::services::cache::TextCache;
use std::sync::Arc;
use tracing::debug;

pub struct FragmentFetcher {
    source: Box<dyn FragmentSource>,
    cache: Arc<TextCache>,
}

impl FragmentFetcher {
    pub fn new(source: Box<dyn FragmentSource>, cache: Arc<TextCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<TextCache> {
        &self.cache
    }

    /// Returns the text at `url`, from the cache when it has been fetched before.
    ///
    /// Only successful fetches are stored. Two concurrent misses for the same
    /// url both reach the source; nothing deduplicates in-flight requests.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        if let Some(text) = self.cache.get(url).await {
            debug!("Fetcher: cache hit for {}", url);
            return Ok(text);
        }

        let text = self.source.fetch(url).await?;
        self.cache.set(url, text.clone()).await;
        debug!("Fetcher: cached {} ({} bytes)", url, text.len());

        Ok(text)
    }
}
