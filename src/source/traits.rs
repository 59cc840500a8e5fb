use async_trait::async_trait;
use bytes::Bytes;

use crate::error::LoadError;

/// Retrieves the raw bytes of an image resource.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, LoadError>;
}
