// Decoded image value type and the decoder seam.

use std::sync::Arc;

use image::{DynamicImage, GenericImageView};

use crate::error::LoadError;

/// A decoded, displayable image. Cloning is cheap (shared pixel buffer).
#[derive(Clone)]
pub struct DecodedImage {
    pixels: Arc<DynamicImage>,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Estimated in-memory footprint, used for cache accounting.
    pub fn approx_bytes(&self) -> u64 {
        let (w, h) = self.pixels.dimensions();
        u64::from(w) * u64::from(h) * 4
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Decodes a raw byte payload into a displayable image.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoadError>;
}

/// Default decoder: format sniffing and decoding via the `image` crate.
pub struct ImageCodec;

impl ImageDecoder for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoadError> {
        let image = image::load_from_memory(bytes)?;
        Ok(DecodedImage::new(image))
    }
}
