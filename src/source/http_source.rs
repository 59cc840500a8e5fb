use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::source::traits::ImageSource;

/// HTTP(S) image source backed by a shared reqwest client.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Build a source with the configured timeout and User-Agent.
    pub fn with_config(config: &LoaderConfig) -> Result<Self, LoadError> {
        let mut builder =
            Client::builder().timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, LoadError> {
        let parsed =
            Url::parse(url).map_err(|_| LoadError::InvalidUrl(url.to_string()))?;

        let resp = self.client.get(parsed).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!("image fetch failed status={} url={}", status.as_u16(), url);
            return Err(LoadError::HttpStatus(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        debug!("image fetched url={} bytes={}", url, bytes.len());
        Ok(bytes)
    }
}
