use serde::Deserialize;

/// Default timeout applied to each image request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default byte budget for the in-memory cache (64 MiB).
pub const DEFAULT_MAX_CACHE_BYTES: u64 = 64 * 1024 * 1024;

/// Top-level configuration for the image loader.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Optional User-Agent header sent with every request.
    pub user_agent: Option<String>,
    /// Byte budget for `MemoryCache` instances built from this config.
    pub max_cache_bytes: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: None,
            max_cache_bytes: DEFAULT_MAX_CACHE_BYTES,
        }
    }
}
