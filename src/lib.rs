// Asynchronous image loading engine — fetch, decode, cache and deliver
// remote images to a display target without blocking its owning context.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod image;
pub mod source;

pub use crate::cache::memory::MemoryCache;
pub use crate::cache::traits::ImageCache;
pub use crate::config::LoaderConfig;
pub use crate::engine::dispatcher::Outcome;
pub use crate::engine::session::{DisplayTarget, LoadListener, LoadState, LoaderSession};
pub use crate::error::{CacheError, LoadError};
pub use crate::image::{DecodedImage, ImageCodec, ImageDecoder};
pub use crate::source::http_source::HttpSource;
pub use crate::source::traits::ImageSource;

use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Initialize the global tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        info!("image loader tracing initialized");
    });
}
