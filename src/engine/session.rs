// Loader session state machine — coordinates cache, fetcher and delivery
// for one display target.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::traits::ImageCache;
use crate::engine::dispatcher::{self, Delivery, Dispatcher, Deliveries, Outcome};
use crate::engine::fetcher::{put_with_pressure_relief, Fetcher};
use crate::engine::stats::{LoaderStats, StatsSnapshot};
use crate::error::LoadError;
use crate::image::{DecodedImage, ImageCodec, ImageDecoder};
use crate::source::http_source::HttpSource;
use crate::source::traits::ImageSource;

/// Attribute key consulted by `from_attributes` for an initial image url.
pub const SRC_ATTRIBUTE: &str = "src";

/// The surface a session renders into. Mutated only on the session's
/// consuming context. `None` clears the displayed image.
pub trait DisplayTarget: Send {
    fn set_image(&mut self, image: Option<DecodedImage>);
}

/// Optional observer of load results.
///
/// `on_image` fires on every delivery — including failures, where it
/// observes the absent/unchanged image. `on_error` additionally fires on
/// failures, after `on_image`.
pub trait LoadListener: Send {
    fn on_image(&self, image: Option<&DecodedImage>);
    fn on_error(&self, error: &LoadError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    /// Equivalent to `Idle` for future loads.
    Delivered,
}

/// Public-facing loader bound to one display target.
///
/// `load` spawns one fetch task per call; outcomes come back through a
/// single-consumer channel and are applied by `deliver_next` /
/// `drain_pending`, which the owning context drives. Display mutation and
/// listener hooks therefore never run concurrently with each other.
///
/// Overlapping loads have no ordering protection: the last-delivered
/// outcome wins the current image and the display, regardless of which
/// load was issued more recently. `set_discard_stale` opts into a
/// sequence-number guard that drops superseded deliveries.
pub struct LoaderSession {
    source: Arc<dyn ImageSource>,
    cache: Option<Arc<dyn ImageCache>>,
    decoder: Arc<dyn ImageDecoder>,
    listener: Option<Box<dyn LoadListener>>,
    target: Box<dyn DisplayTarget>,
    current_image: Option<DecodedImage>,
    dispatcher: Dispatcher,
    deliveries: Deliveries,
    stats: Arc<LoaderStats>,
    state: LoadState,
    next_seq: u64,
    latest_seq: u64,
    discard_stale: bool,
}

impl LoaderSession {
    /// Create an idle session with the default HTTP source and codec.
    pub fn new(target: impl DisplayTarget + 'static) -> Self {
        let (dispatcher, deliveries) = dispatcher::channel();
        Self {
            source: Arc::new(HttpSource::new()),
            cache: None,
            decoder: Arc::new(ImageCodec),
            listener: None,
            target: Box::new(target),
            current_image: None,
            dispatcher,
            deliveries,
            stats: Arc::new(LoaderStats::new()),
            state: LoadState::Idle,
            next_seq: 0,
            latest_seq: 0,
            discard_stale: false,
        }
    }

    /// Create a session and immediately start loading `url`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_url(target: impl DisplayTarget + 'static, url: &str) -> Self {
        let mut session = Self::new(target);
        session.load(Some(url));
        session
    }

    /// Declarative construction from a string attribute map: if the map
    /// carries a `"src"` key, its value is loaded right away.
    pub fn from_attributes(
        target: impl DisplayTarget + 'static,
        attrs: &HashMap<String, String>,
    ) -> Self {
        let mut session = Self::new(target);
        if let Some(url) = attrs.get(SRC_ATTRIBUTE) {
            session.load(Some(url));
        }
        session
    }

    /// Attach a cache shared with other sessions. No cache is attached by
    /// default; without one every load performs a full fetch.
    pub fn set_cache(&mut self, cache: Arc<dyn ImageCache>) {
        self.cache = Some(cache);
    }

    pub fn set_source(&mut self, source: Arc<dyn ImageSource>) {
        self.source = source;
    }

    pub fn set_decoder(&mut self, decoder: Arc<dyn ImageDecoder>) {
        self.decoder = decoder;
    }

    pub fn set_listener(&mut self, listener: impl LoadListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Opt into dropping deliveries superseded by a newer `load` call.
    /// Off by default.
    pub fn set_discard_stale(&mut self, discard: bool) {
        self.discard_stale = discard;
    }

    /// Start loading `url`. Clears the current image and spawns a fetch
    /// task; the outcome arrives via `deliver_next` / `drain_pending`.
    /// `None` requests a cleared image and completes without touching the
    /// cache or the network.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load(&mut self, url: Option<&str>) {
        self.current_image = None;
        self.state = LoadState::Loading;
        self.stats.record_load();

        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = seq;

        let fetcher = Fetcher {
            source: Arc::clone(&self.source),
            cache: self.cache.clone(),
            decoder: Arc::clone(&self.decoder),
            stats: Arc::clone(&self.stats),
        };
        let dispatcher = self.dispatcher.clone();
        let url = url.map(str::to_owned);

        tokio::spawn(async move {
            let outcome = fetcher.fetch(url.as_deref()).await;
            dispatcher.post(seq, outcome);
        });
    }

    /// Wait for the next outcome and apply it. Returns `false` only if the
    /// delivery channel is closed.
    pub async fn deliver_next(&mut self) -> bool {
        match self.deliveries.recv().await {
            Some(delivery) => {
                self.apply(delivery);
                true
            }
            None => false,
        }
    }

    /// Apply every already-queued outcome without waiting. Returns the
    /// number applied.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(delivery) = self.deliveries.try_recv() {
            self.apply(delivery);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, delivery: Delivery) {
        if self.discard_stale && delivery.seq != self.latest_seq {
            debug!(
                "discarding stale delivery seq={} latest={}",
                delivery.seq, self.latest_seq
            );
            return;
        }

        self.state = LoadState::Delivered;

        // Adopt a successful image before the hook fires, so the hook
        // observes what this delivery produced. A failure leaves the image
        // as the latest `load` left it.
        let error = match delivery.outcome {
            Outcome::Success(image) => {
                self.current_image = image;
                None
            }
            Outcome::Failure(e) => Some(e),
        };

        // The image hook fires on every delivery, failures included.
        if let Some(listener) = &self.listener {
            listener.on_image(self.current_image.as_ref());
        }

        match error {
            None => {
                debug!("delivery seq={} applied to display", delivery.seq);
                self.target.set_image(self.current_image.clone());
            }
            Some(e) => {
                debug!("delivery seq={} failed: {}", delivery.seq, e);
                if let Some(listener) = &self.listener {
                    listener.on_error(&e);
                }
            }
        }
    }

    /// Look up `url` in the attached cache, if any.
    pub fn cache_get(&self, url: &str) -> Option<DecodedImage> {
        self.cache.as_ref().and_then(|cache| cache.get(url))
    }

    /// Store `image` in the attached cache under the same pressure policy
    /// the fetch path uses (clear on out-of-memory, drop the write).
    /// A no-op without a cache.
    pub fn cache_put(&self, url: &str, image: &DecodedImage) {
        if let Some(cache) = &self.cache {
            put_with_pressure_relief(cache.as_ref(), url, image);
        }
    }

    pub fn current_image(&self) -> Option<&DecodedImage> {
        self.current_image.as_ref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
