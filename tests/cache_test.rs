use image::DynamicImage;

use imageview_loader::{CacheError, DecodedImage, ImageCache, MemoryCache};

fn img(w: u32, h: u32) -> DecodedImage {
    DecodedImage::new(DynamicImage::new_rgba8(w, h))
}

#[test]
fn test_memory_cache_get_and_put() {
    let cache = MemoryCache::new(1024 * 1024);

    assert!(cache.get("http://example.com/a.png").is_none());

    cache.put("http://example.com/a.png", img(8, 8)).unwrap();

    let cached = cache.get("http://example.com/a.png").unwrap();
    assert_eq!(cached.width(), 8);
    assert_eq!(cached.height(), 8);

    // The key is used verbatim — no normalization.
    assert!(cache.get("http://example.com/A.png").is_none());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.used_bytes(), 8 * 8 * 4);
}

#[test]
fn test_memory_cache_budget_pressure() {
    // Budget fits one 16x16 image (1024 bytes) and nothing more.
    let cache = MemoryCache::new(1024);

    cache.put("a", img(16, 16)).unwrap();

    let err = cache.put("b", img(1, 1)).unwrap_err();
    assert!(matches!(err, CacheError::OutOfMemory));

    // Pressure does not evict on its own; the entry is still there.
    assert!(cache.get("a").is_some());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_memory_cache_clear() {
    let cache = MemoryCache::new(1024 * 1024);
    cache.put("a", img(4, 4)).unwrap();
    cache.put("b", img(4, 4)).unwrap();
    assert_eq!(cache.len(), 2);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.used_bytes(), 0);
    assert!(cache.get("a").is_none());

    // Cleared caches accept writes again.
    cache.put("c", img(4, 4)).unwrap();
    assert_eq!(cache.len(), 1);
}
