use thiserror::Error;

/// Failures surfaced by a load as a `Failure` outcome.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid image url '{0}'")]
    InvalidUrl(String),

    #[error("transfer failed: {0}")]
    Transfer(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Failures signaled by a cache write.
///
/// `OutOfMemory` is handled inside the fetch pipeline (clear the cache, drop
/// the write) and never becomes a `Failure` outcome.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache out of memory")]
    OutOfMemory,
}
