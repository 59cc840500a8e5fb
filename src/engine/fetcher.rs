// One fetch pass — consult the cache, download and decode on a miss,
// store the result back under the cache's pressure policy.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::traits::ImageCache;
use crate::engine::dispatcher::Outcome;
use crate::engine::stats::LoaderStats;
use crate::error::CacheError;
use crate::image::{DecodedImage, ImageDecoder};
use crate::source::traits::ImageSource;

/// Everything one fetch task needs; cheap to clone into the task.
#[derive(Clone)]
pub struct Fetcher {
    pub source: Arc<dyn ImageSource>,
    pub cache: Option<Arc<dyn ImageCache>>,
    pub decoder: Arc<dyn ImageDecoder>,
    pub stats: Arc<LoaderStats>,
}

impl Fetcher {
    /// Run one full fetch for `url`. Never panics; every failure comes back
    /// as a `Failure` outcome.
    pub async fn fetch(&self, url: Option<&str>) -> Outcome {
        // An absent url clears the image without touching cache or network.
        let Some(url) = url else {
            return Outcome::Success(None);
        };

        if let Some(cache) = &self.cache {
            if let Some(image) = cache.get(url) {
                debug!("cache hit url={}", url);
                self.stats.record_cache_hit();
                return Outcome::Success(Some(image));
            }
            self.stats.record_cache_miss();
        }

        let bytes = match self.source.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.stats.record_failure();
                return Outcome::Failure(e);
            }
        };
        self.stats.record_downloaded(bytes.len() as u64);

        let image = match self.decoder.decode(&bytes) {
            Ok(image) => image,
            Err(e) => {
                self.stats.record_failure();
                return Outcome::Failure(e);
            }
        };

        if let Some(cache) = &self.cache {
            put_with_pressure_relief(cache.as_ref(), url, &image);
        }

        Outcome::Success(Some(image))
    }
}

/// Store `image` under `url`. If the cache signals memory pressure, clear it
/// in full and abandon the write — the image is still delivered to the
/// caller, it just isn't retained.
pub(crate) fn put_with_pressure_relief(cache: &dyn ImageCache, url: &str, image: &DecodedImage) {
    match cache.put(url, image.clone()) {
        Ok(()) => {}
        Err(CacheError::OutOfMemory) => {
            warn!("cache out of memory, clearing url={}", url);
            cache.clear();
        }
    }
}
