use crate::error::FetchError;
use crate::io::FragmentSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Fetches fragments relative to an HTTP origin.
pub struct HttpFragmentSource {
    pub client: Client,
    pub base: Url,
}

impl HttpFragmentSource {
    pub fn new(base: &str) -> Result<Self> {
        // without a trailing slash `join` would replace the last path segment
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized)
            .with_context(|| format!("Invalid site origin {}", base))?;

        Ok(Self {
            client: Client::new(),
            base,
        })
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = self
            .base
            .join(url)
            .map_err(|e| FetchError::transport(url, e))?;

        debug!("HttpFragmentSource: GET {}", target);
        let res = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        if !res.status().is_success() {
            return Err(FetchError::status(url, res.status().as_u16()));
        }

        res.text().await.map_err(|e| FetchError::transport(url, e))
    }
}
