// Budget-bounded in-memory image cache.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::cache::traits::ImageCache;
use crate::config::LoaderConfig;
use crate::error::CacheError;
use crate::image::DecodedImage;

struct Inner {
    entries: HashMap<String, DecodedImage>,
    used_bytes: u64,
}

/// In-memory cache with a fixed byte budget.
///
/// A `put` that would exceed the budget fails with
/// `CacheError::OutOfMemory`; nothing is evicted to make room.
pub struct MemoryCache {
    inner: Mutex<Inner>,
    max_bytes: u64,
}

impl MemoryCache {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                used_bytes: 0,
            }),
            max_bytes,
        }
    }

    pub fn with_config(config: &LoaderConfig) -> Self {
        Self::new(config.max_cache_bytes)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn used_bytes(&self) -> u64 {
        self.inner.lock().used_bytes
    }
}

impl ImageCache for MemoryCache {
    fn get(&self, url: &str) -> Option<DecodedImage> {
        self.inner.lock().entries.get(url).cloned()
    }

    fn put(&self, url: &str, image: DecodedImage) -> Result<(), CacheError> {
        let size = image.approx_bytes();
        let mut inner = self.inner.lock();

        // Replacing an entry reclaims its footprint first.
        let reclaimed = inner
            .entries
            .get(url)
            .map(DecodedImage::approx_bytes)
            .unwrap_or(0);

        if inner.used_bytes - reclaimed + size > self.max_bytes {
            return Err(CacheError::OutOfMemory);
        }

        inner.entries.insert(url.to_string(), image);
        inner.used_bytes = inner.used_bytes - reclaimed + size;
        Ok(())
    }

    fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.used_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn img(w: u32, h: u32) -> DecodedImage {
        DecodedImage::new(DynamicImage::new_rgba8(w, h))
    }

    #[test]
    fn test_replace_reclaims_footprint() {
        // Budget fits exactly one 4x4 image (64 bytes).
        let cache = MemoryCache::new(64);

        cache.put("a", img(4, 4)).unwrap();
        assert_eq!(cache.used_bytes(), 64);

        // Replacing under the same key must not double-count.
        cache.put("a", img(2, 2)).unwrap();
        assert_eq!(cache.used_bytes(), 16);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_over_budget_signals_pressure() {
        let cache = MemoryCache::new(64);
        cache.put("a", img(4, 4)).unwrap();

        assert!(matches!(
            cache.put("b", img(1, 1)),
            Err(CacheError::OutOfMemory)
        ));
        // The failed put left the cache untouched.
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.used_bytes(), 64);
    }
}
