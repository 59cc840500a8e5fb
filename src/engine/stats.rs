// Load statistics — issued loads, cache hit rates, downloaded bytes.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub loads: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub downloaded_bytes: u64,
    pub failures: u64,
    pub cache_hit_rate: f64,
}

#[derive(Default)]
pub struct LoaderStats {
    loads: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    downloaded_bytes: AtomicU64,
    failures: AtomicU64,
}

impl LoaderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_downloaded(&self, bytes: u64) {
        self.downloaded_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let looked_up = hits + misses;
        let cache_hit_rate = if looked_up > 0 {
            hits as f64 / looked_up as f64
        } else {
            0.0
        };

        StatsSnapshot {
            loads: self.loads.load(Ordering::Relaxed),
            cache_hits: hits,
            cache_misses: misses,
            downloaded_bytes: self.downloaded_bytes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            cache_hit_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = LoaderStats::new();
        stats.record_load();
        stats.record_load();
        stats.record_cache_hit();
        stats.record_cache_miss();
        stats.record_downloaded(2048);
        stats.record_failure();

        let snap = stats.snapshot();
        assert_eq!(snap.loads, 2);
        assert_eq!(snap.cache_hits, 1);
        assert_eq!(snap.cache_misses, 1);
        assert_eq!(snap.downloaded_bytes, 2048);
        assert_eq!(snap.failures, 1);
        assert!((snap.cache_hit_rate - 0.5).abs() < f64::EPSILON);
    }
}
