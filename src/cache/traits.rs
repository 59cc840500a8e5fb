use crate::error::CacheError;
use crate::image::DecodedImage;

/// A pluggable url -> decoded image store shared across sessions.
///
/// Implementations own their internal synchronization; `get`/`put`/`clear`
/// may be called concurrently from any number of fetch tasks.
pub trait ImageCache: Send + Sync {
    /// Look up a cached image. Pure lookup, no side effects.
    fn get(&self, url: &str) -> Option<DecodedImage>;

    /// Store an image under `url`. May signal `CacheError::OutOfMemory`
    /// when the entry does not fit; the cache must not self-clear on
    /// pressure — recovery is the caller's policy.
    fn put(&self, url: &str, image: DecodedImage) -> Result<(), CacheError>;

    /// Evict all entries.
    fn clear(&self);
}
